mod catalog;

use crate::model::ProtocolVersion;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

pub use catalog::CATALOG;

macro_rules! labelled {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

labelled!(
    /// Key exchange role (Kx).
    KeyExchange {
        Rsa => "RSA",
        Dh => "DH",
        Dhe => "DHE",
        Ecdh => "ECDH",
        Ecdhe => "ECDHE",
        Psk => "PSK",
        DhePsk => "DHEPSK",
        EcdhePsk => "ECDHEPSK",
        Srp => "SRP",
        Any => "any",
    }
);

labelled!(
    /// Authentication role (Au).
    Authentication {
        Rsa => "RSA",
        Dss => "DSS",
        Ecdsa => "ECDSA",
        Psk => "PSK",
        Srp => "SRP",
        Anon => "anon",
        Any => "any",
    }
);

labelled!(
    /// Bulk encryption role (Enc).
    Encryption {
        Null => "NULL",
        Rc4_40 => "RC4(40)",
        Rc4_128 => "RC4(128)",
        Rc2_40 => "RC2(40)",
        Des40 => "DES(40)",
        Des => "DES(56)",
        TripleDes => "3DES(168)",
        Idea => "IDEA(128)",
        Seed => "SEED(128)",
        Aes128 => "AES(128)",
        Aes256 => "AES(256)",
        Aes128Gcm => "AESGCM(128)",
        Aes256Gcm => "AESGCM(256)",
        Aes128Ccm => "AESCCM(128)",
        Aes128Ccm8 => "AESCCM8(128)",
        Aes256Ccm => "AESCCM(256)",
        Camellia128 => "Camellia(128)",
        Camellia256 => "Camellia(256)",
        Aria128Gcm => "ARIAGCM(128)",
        Aria256Gcm => "ARIAGCM(256)",
        ChaCha20Poly1305 => "CHACHA20/POLY1305(256)",
    }
);

labelled!(
    /// Message authentication role (Mac).
    Mac {
        Null => "NULL",
        Md5 => "MD5",
        Sha1 => "SHA1",
        Sha256 => "SHA256",
        Sha384 => "SHA384",
        Aead => "AEAD",
    }
);

impl Encryption {
    pub fn is_export(self) -> bool {
        matches!(self, Encryption::Rc4_40 | Encryption::Rc2_40 | Encryption::Des40)
    }
}

/// Catalog entry for one cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CipherSuite {
    #[serde(serialize_with = "serialize_code")]
    pub code: u16,
    pub name: &'static str,
    pub openssl_name: &'static str,
    pub key_exchange: KeyExchange,
    pub authentication: Authentication,
    pub encryption: Encryption,
    pub mac: Mac,
    #[serde(skip)]
    pub tls13: bool,
}

fn serialize_code<S: Serializer>(code: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{code:04X}"))
}

impl CipherSuite {
    /// Whether the suite may be offered in a hello for `version`.
    pub fn usable_with(&self, version: ProtocolVersion) -> bool {
        match version {
            ProtocolVersion::SSLv2 => false,
            ProtocolVersion::TLS1_3 => self.tls13,
            ProtocolVersion::TLS1_2 => !self.tls13,
            // AEAD and SHA-2 suites arrived with TLS 1.2.
            _ => !self.tls13 && matches!(self.mac, Mac::Null | Mac::Md5 | Mac::Sha1),
        }
    }
}

impl PartialOrd for CipherSuite {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CipherSuite {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Looks a suite up by IANA name, OpenSSL name or `0x` wire code.
pub fn lookup(identifier: &str) -> Option<&'static CipherSuite> {
    let ident = identifier.trim();
    if let Some(hex) = ident.strip_prefix("0x").or_else(|| ident.strip_prefix("0X")) {
        let code = u16::from_str_radix(hex, 16).ok()?;
        return by_code(code);
    }
    CATALOG
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(ident) || s.openssl_name.eq_ignore_ascii_case(ident))
}

pub fn by_code(code: u16) -> Option<&'static CipherSuite> {
    CATALOG.iter().find(|s| s.code == code)
}

/// The full catalog, or the subset whose IANA or OpenSSL name matches `filter`.
pub fn catalog(filter: Option<&Regex>) -> Vec<CipherSuite> {
    CATALOG
        .iter()
        .filter(|s| filter.map_or(true, |re| re.is_match(s.name) || re.is_match(s.openssl_name)))
        .copied()
        .collect()
}

/// Wire codes a protocol probe offers so the server may pick any suite it likes.
pub fn codes_for(version: ProtocolVersion) -> Vec<u16> {
    CATALOG
        .iter()
        .filter(|s| s.usable_with(version))
        .map(|s| s.code)
        .collect()
}
