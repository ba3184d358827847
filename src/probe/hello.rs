//! ClientHello construction for every probed protocol version.

use crate::model::ProtocolVersion;
use bytes::{BufMut, BytesMut};
use rand::RngCore;

const EXT_SERVER_NAME: u16 = 0x0000;
const EXT_SUPPORTED_GROUPS: u16 = 0x000a;
const EXT_EC_POINT_FORMATS: u16 = 0x000b;
const EXT_SIGNATURE_ALGORITHMS: u16 = 0x000d;
const EXT_SUPPORTED_VERSIONS: u16 = 0x002b;
const EXT_PSK_KEY_EXCHANGE_MODES: u16 = 0x002d;
const EXT_KEY_SHARE: u16 = 0x0033;
const EXT_RENEGOTIATION_INFO: u16 = 0xff01;

const GROUP_X25519: u16 = 0x001d;
const GROUPS: &[u16] = &[GROUP_X25519, 0x0017, 0x0018, 0x0019];

const SIGNATURE_SCHEMES: &[u16] = &[
    0x0403, // ecdsa_secp256r1_sha256
    0x0503, // ecdsa_secp384r1_sha384
    0x0603, // ecdsa_secp521r1_sha512
    0x0807, // ed25519
    0x0804, // rsa_pss_rsae_sha256
    0x0805, // rsa_pss_rsae_sha384
    0x0806, // rsa_pss_rsae_sha512
    0x0401, // rsa_pkcs1_sha256
    0x0501, // rsa_pkcs1_sha384
    0x0601, // rsa_pkcs1_sha512
    0x0201, // rsa_pkcs1_sha1
    0x0203, // ecdsa_sha1
    0x0402, // dsa_sha256
    0x0202, // dsa_sha1
];

/// SSLv2 cipher kinds: RC4, RC4 export, RC2, RC2 export, IDEA, DES, 3DES.
const SSLV2_CIPHER_KINDS: &[[u8; 3]] = &[
    [0x01, 0x00, 0x80],
    [0x02, 0x00, 0x80],
    [0x03, 0x00, 0x80],
    [0x04, 0x00, 0x80],
    [0x05, 0x00, 0x80],
    [0x06, 0x00, 0x40],
    [0x07, 0x00, 0xc0],
];

pub struct ClientHelloBuilder {
    version: ProtocolVersion,
    cipher_suites: Vec<u16>,
    extensions: Vec<(u16, Vec<u8>)>,
    random: [u8; 32],
}

impl ClientHelloBuilder {
    pub fn new(version: ProtocolVersion) -> Self {
        let mut random = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut random);
        Self {
            version,
            cipher_suites: Vec::new(),
            extensions: Vec::new(),
            random,
        }
    }

    pub fn ciphers(&mut self, codes: &[u16]) -> &mut Self {
        self.cipher_suites.extend_from_slice(codes);
        self
    }

    fn extension(&mut self, ext_type: u16, data: Vec<u8>) -> &mut Self {
        self.extensions.push((ext_type, data));
        self
    }

    pub fn server_name(&mut self, host: &str) -> &mut Self {
        let mut data = BytesMut::new();
        data.put_u16(3 + host.len() as u16);
        data.put_u8(0);
        data.put_u16(host.len() as u16);
        data.put_slice(host.as_bytes());
        self.extension(EXT_SERVER_NAME, data.to_vec())
    }

    fn u16_list(values: &[u16]) -> Vec<u8> {
        let mut data = BytesMut::new();
        data.put_u16((values.len() * 2) as u16);
        for v in values {
            data.put_u16(*v);
        }
        data.to_vec()
    }

    /// Adds the extensions a mainstream client sends for this version.
    /// SSLv3 predates extensions and gets none.
    pub fn default_extensions(&mut self, sni: Option<&str>) -> &mut Self {
        if self.version == ProtocolVersion::SSLv3 {
            return self;
        }
        if let Some(host) = sni {
            self.server_name(host);
        }
        self.extension(EXT_SUPPORTED_GROUPS, Self::u16_list(GROUPS));
        self.extension(EXT_EC_POINT_FORMATS, vec![1, 0]);
        if self.version >= ProtocolVersion::TLS1_2 {
            self.extension(EXT_SIGNATURE_ALGORITHMS, Self::u16_list(SIGNATURE_SCHEMES));
        }
        if self.version == ProtocolVersion::TLS1_3 {
            self.extension(EXT_SUPPORTED_VERSIONS, vec![2, 0x03, 0x04]);
            self.extension(EXT_PSK_KEY_EXCHANGE_MODES, vec![1, 1]);
            // The handshake is abandoned after ServerHello, so any 32 bytes
            // serve as the X25519 public value.
            let mut share = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut share);
            let mut data = BytesMut::new();
            data.put_u16(4 + share.len() as u16);
            data.put_u16(GROUP_X25519);
            data.put_u16(share.len() as u16);
            data.put_slice(&share);
            self.extension(EXT_KEY_SHARE, data.to_vec());
        } else {
            self.extension(EXT_RENEGOTIATION_INFO, vec![0]);
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = BytesMut::new();
        // TLS 1.3 hides behind a TLS 1.2 legacy_version
        let client_version = self.version.min(ProtocolVersion::TLS1_2).wire_version();
        body.put_u16(client_version);
        body.put_slice(&self.random);
        body.put_u8(0);
        body.put_u16((self.cipher_suites.len() * 2) as u16);
        for code in &self.cipher_suites {
            body.put_u16(*code);
        }
        body.put_u8(1);
        body.put_u8(0);
        if !self.extensions.is_empty() {
            let total: usize = self.extensions.iter().map(|(_, d)| 4 + d.len()).sum();
            body.put_u16(total as u16);
            for (ext_type, data) in &self.extensions {
                body.put_u16(*ext_type);
                body.put_u16(data.len() as u16);
                body.put_slice(data);
            }
        }

        let mut out = BytesMut::with_capacity(body.len() + 9);
        out.put_u8(0x16);
        out.put_u16(match self.version {
            ProtocolVersion::SSLv3 => 0x0300,
            _ => 0x0301,
        });
        out.put_u16((body.len() + 4) as u16);
        out.put_u8(0x01);
        out.put_u8(((body.len() >> 16) & 0xff) as u8);
        out.put_u16((body.len() & 0xffff) as u16);
        out.put_slice(&body);
        out.to_vec()
    }
}

/// SSLv2 CLIENT-HELLO offering every SSLv2 cipher kind.
pub fn sslv2_client_hello() -> Vec<u8> {
    let mut challenge = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut challenge);

    let mut msg = BytesMut::new();
    msg.put_u8(0x01);
    msg.put_u16(ProtocolVersion::SSLv2.wire_version());
    msg.put_u16((SSLV2_CIPHER_KINDS.len() * 3) as u16);
    msg.put_u16(0);
    msg.put_u16(challenge.len() as u16);
    for kind in SSLV2_CIPHER_KINDS {
        msg.put_slice(kind);
    }
    msg.put_slice(&challenge);

    let mut out = BytesMut::with_capacity(msg.len() + 2);
    out.put_u16(0x8000 | msg.len() as u16);
    out.put_slice(&msg);
    out.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extension_types(hello: &[u8]) -> Vec<u16> {
        // record(5) + handshake header(4) + version(2) + random(32)
        let mut at = 5 + 4 + 2 + 32;
        at += 1 + hello[at] as usize;
        let suites = u16::from_be_bytes([hello[at], hello[at + 1]]) as usize;
        at += 2 + suites;
        at += 1 + hello[at] as usize;
        if at >= hello.len() {
            return Vec::new();
        }
        let end = at + 2 + u16::from_be_bytes([hello[at], hello[at + 1]]) as usize;
        at += 2;
        let mut types = Vec::new();
        while at < end {
            types.push(u16::from_be_bytes([hello[at], hello[at + 1]]));
            at += 4 + u16::from_be_bytes([hello[at + 2], hello[at + 3]]) as usize;
        }
        types
    }

    #[test]
    fn frames_record_and_handshake_lengths() {
        let hello = ClientHelloBuilder::new(ProtocolVersion::TLS1_2)
            .ciphers(&[0xc02f])
            .default_extensions(Some("scanhost"))
            .build();
        assert_eq!(hello[0], 0x16);
        assert_eq!(&hello[1..3], &[0x03, 0x01]);
        let record_len = u16::from_be_bytes([hello[3], hello[4]]) as usize;
        assert_eq!(record_len, hello.len() - 5);
        assert_eq!(hello[5], 0x01);
        let hs_len = u32::from_be_bytes([0, hello[6], hello[7], hello[8]]) as usize;
        assert_eq!(hs_len, hello.len() - 9);
        assert_eq!(&hello[9..11], &[0x03, 0x03]);
        // single suite offered
        assert_eq!(&hello[44..48], &[0x00, 0x02, 0xc0, 0x2f]);
        assert!(extension_types(&hello).contains(&EXT_SERVER_NAME));
    }

    #[test]
    fn tls13_uses_supported_versions() {
        let hello = ClientHelloBuilder::new(ProtocolVersion::TLS1_3)
            .ciphers(&[0x1301])
            .default_extensions(None)
            .build();
        assert_eq!(&hello[9..11], &[0x03, 0x03]);
        let types = extension_types(&hello);
        assert!(types.contains(&EXT_SUPPORTED_VERSIONS));
        assert!(types.contains(&EXT_KEY_SHARE));
        assert!(!types.contains(&EXT_SERVER_NAME));
    }

    #[test]
    fn sslv3_has_no_extensions() {
        let hello = ClientHelloBuilder::new(ProtocolVersion::SSLv3)
            .ciphers(&[0x0005])
            .default_extensions(Some("scanhost"))
            .build();
        assert_eq!(&hello[1..3], &[0x03, 0x00]);
        assert_eq!(&hello[9..11], &[0x03, 0x00]);
        assert!(extension_types(&hello).is_empty());
    }

    #[test]
    fn sslv2_hello_shape() {
        let hello = sslv2_client_hello();
        assert_eq!(hello[0] & 0x80, 0x80);
        let len = (((hello[0] & 0x7f) as usize) << 8) | hello[1] as usize;
        assert_eq!(len, hello.len() - 2);
        assert_eq!(hello[2], 0x01);
        assert_eq!(&hello[3..5], &[0x00, 0x02]);
    }
}
