use super::Offer;
use crate::error::HelloError;
use crate::model::{ProbeOutcome, ProtocolVersion};

const EXT_SUPPORTED_VERSIONS: u16 = 0x002b;

/// `random` value that marks a ServerHello as a TLS 1.3 HelloRetryRequest.
const HELLO_RETRY_RANDOM: [u8; 32] = [
    0xcf, 0x21, 0xad, 0x74, 0xe5, 0x9a, 0x61, 0x11, 0xbe, 0x1d, 0x8c, 0x02, 0x1e, 0x65, 0xb8, 0x91,
    0xc2, 0xa2, 0x11, 0x16, 0x7a, 0xbb, 0x8c, 0x5e, 0x07, 0x9e, 0x09, 0xe2, 0xc8, 0xa8, 0x33, 0x9c,
];

/// First meaningful message a server sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFlight {
    Hello(ServerHello),
    Alert { level: u8, description: u8 },
    Sslv2Hello { cipher_specs: usize },
    Sslv2Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello {
    pub legacy_version: u16,
    /// Version actually chosen: `supported_versions` when present.
    pub selected_version: u16,
    pub cipher_suite: u16,
    pub retry_request: bool,
}

impl ServerHello {
    /// Whether the server settled on `version`. A HelloRetryRequest exists
    /// only in TLS 1.3, so it commits the server to that version.
    pub fn selects(&self, version: ProtocolVersion) -> bool {
        if self.retry_request {
            version == ProtocolVersion::TLS1_3
        } else {
            self.selected_version == version.wire_version()
        }
    }
}

struct Cursor<'a> {
    buf: &'a [u8],
    at: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], HelloError> {
        let slice = self
            .buf
            .get(self.at..self.at + n)
            .ok_or(HelloError::Truncated(what))?;
        self.at += n;
        Ok(slice)
    }

    fn u8(&mut self, what: &'static str) -> Result<u8, HelloError> {
        Ok(self.take(1, what)?[0])
    }

    fn u16(&mut self, what: &'static str) -> Result<u16, HelloError> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.at)
    }
}

/// Parses a ServerHello handshake message (starting at the handshake type byte).
pub fn parse_server_hello(handshake: &[u8]) -> Result<ServerHello, HelloError> {
    let mut cur = Cursor { buf: handshake, at: 0 };
    let msg_type = cur.u8("handshake type")?;
    if msg_type != 0x02 {
        return Err(HelloError::UnexpectedHandshake(msg_type));
    }
    cur.take(3, "handshake length")?;
    let legacy_version = cur.u16("server version")?;
    let random = cur.take(32, "server random")?;
    let session_len = cur.u8("session id length")? as usize;
    cur.take(session_len, "session id")?;
    let cipher_suite = cur.u16("cipher suite")?;
    cur.u8("compression method")?;

    let mut selected_version = legacy_version;
    if cur.remaining() >= 2 {
        let ext_len = cur.u16("extensions length")? as usize;
        let mut ext = Cursor {
            buf: cur.take(ext_len, "extensions")?,
            at: 0,
        };
        while ext.remaining() >= 4 {
            let ext_type = ext.u16("extension type")?;
            let len = ext.u16("extension length")? as usize;
            let data = ext.take(len, "extension data")?;
            if ext_type == EXT_SUPPORTED_VERSIONS && data.len() == 2 {
                selected_version = u16::from_be_bytes([data[0], data[1]]);
            }
        }
    }

    Ok(ServerHello {
        legacy_version,
        selected_version,
        cipher_suite,
        retry_request: random == HELLO_RETRY_RANDOM,
    })
}

/// Parses an SSLv2 server message (after the two-byte record header).
pub fn parse_sslv2(message: &[u8]) -> Result<ServerFlight, HelloError> {
    let mut cur = Cursor { buf: message, at: 0 };
    match cur.u8("SSLv2 message type")? {
        0x00 => Ok(ServerFlight::Sslv2Error),
        0x04 => {
            // session-id-hit, certificate type, version, certificate length
            cur.take(1 + 1 + 2 + 2, "SSLv2 server hello")?;
            let cipher_specs = cur.u16("SSLv2 cipher specs length")? as usize / 3;
            Ok(ServerFlight::Sslv2Hello { cipher_specs })
        }
        other => Err(HelloError::UnexpectedHandshake(other)),
    }
}

/// Maps the server's reply to the outcome of the offer that provoked it.
pub fn classify(offer: &Offer, flight: &ServerFlight) -> ProbeOutcome {
    match (offer, flight) {
        (_, ServerFlight::Alert { .. }) | (_, ServerFlight::Sslv2Error) => ProbeOutcome::Rejected,
        (Offer::Protocol(ProtocolVersion::SSLv2), ServerFlight::Sslv2Hello { cipher_specs }) => {
            if *cipher_specs > 0 {
                ProbeOutcome::Negotiated
            } else {
                ProbeOutcome::Rejected
            }
        }
        (_, ServerFlight::Sslv2Hello { .. }) => {
            ProbeOutcome::Error("SSLv2 server hello in reply to a TLS client hello".into())
        }
        (Offer::Protocol(version), ServerFlight::Hello(hello)) => {
            if hello.selects(*version) {
                ProbeOutcome::Negotiated
            } else {
                ProbeOutcome::Rejected
            }
        }
        (Offer::Cipher { suite, version }, ServerFlight::Hello(hello)) => {
            if hello.selects(*version) && hello.cipher_suite == suite.code {
                ProbeOutcome::Negotiated
            } else {
                ProbeOutcome::Rejected
            }
        }
    }
}
