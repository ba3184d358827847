use super::Authentication as Au;
use super::CipherSuite;
use super::Encryption as Enc;
use super::KeyExchange as Kx;
use super::Mac;

const fn legacy(
    code: u16,
    name: &'static str,
    openssl_name: &'static str,
    key_exchange: Kx,
    authentication: Au,
    encryption: Enc,
    mac: Mac,
) -> CipherSuite {
    CipherSuite {
        code,
        name,
        openssl_name,
        key_exchange,
        authentication,
        encryption,
        mac,
        tls13: false,
    }
}

const fn tls13(code: u16, name: &'static str, encryption: Enc) -> CipherSuite {
    CipherSuite {
        code,
        name,
        openssl_name: name,
        key_exchange: Kx::Any,
        authentication: Au::Any,
        encryption,
        mac: Mac::Aead,
        tls13: true,
    }
}

/// Well-known IANA cipher suites, ordered by wire code within each family.
pub static CATALOG: &[CipherSuite] = &[
    // TLS 1.3
    tls13(0x1301, "TLS_AES_128_GCM_SHA256", Enc::Aes128Gcm),
    tls13(0x1302, "TLS_AES_256_GCM_SHA384", Enc::Aes256Gcm),
    tls13(0x1303, "TLS_CHACHA20_POLY1305_SHA256", Enc::ChaCha20Poly1305),
    tls13(0x1304, "TLS_AES_128_CCM_SHA256", Enc::Aes128Ccm),
    tls13(0x1305, "TLS_AES_128_CCM_8_SHA256", Enc::Aes128Ccm8),
    // RSA key transport
    legacy(0x0001, "TLS_RSA_WITH_NULL_MD5", "NULL-MD5", Kx::Rsa, Au::Rsa, Enc::Null, Mac::Md5),
    legacy(0x0002, "TLS_RSA_WITH_NULL_SHA", "NULL-SHA", Kx::Rsa, Au::Rsa, Enc::Null, Mac::Sha1),
    legacy(0x0003, "TLS_RSA_EXPORT_WITH_RC4_40_MD5", "EXP-RC4-MD5", Kx::Rsa, Au::Rsa, Enc::Rc4_40, Mac::Md5),
    legacy(0x0004, "TLS_RSA_WITH_RC4_128_MD5", "RC4-MD5", Kx::Rsa, Au::Rsa, Enc::Rc4_128, Mac::Md5),
    legacy(0x0005, "TLS_RSA_WITH_RC4_128_SHA", "RC4-SHA", Kx::Rsa, Au::Rsa, Enc::Rc4_128, Mac::Sha1),
    legacy(0x0006, "TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5", "EXP-RC2-CBC-MD5", Kx::Rsa, Au::Rsa, Enc::Rc2_40, Mac::Md5),
    legacy(0x0007, "TLS_RSA_WITH_IDEA_CBC_SHA", "IDEA-CBC-SHA", Kx::Rsa, Au::Rsa, Enc::Idea, Mac::Sha1),
    legacy(0x0008, "TLS_RSA_EXPORT_WITH_DES40_CBC_SHA", "EXP-DES-CBC-SHA", Kx::Rsa, Au::Rsa, Enc::Des40, Mac::Sha1),
    legacy(0x0009, "TLS_RSA_WITH_DES_CBC_SHA", "DES-CBC-SHA", Kx::Rsa, Au::Rsa, Enc::Des, Mac::Sha1),
    legacy(0x000A, "TLS_RSA_WITH_3DES_EDE_CBC_SHA", "DES-CBC3-SHA", Kx::Rsa, Au::Rsa, Enc::TripleDes, Mac::Sha1),
    legacy(0x002F, "TLS_RSA_WITH_AES_128_CBC_SHA", "AES128-SHA", Kx::Rsa, Au::Rsa, Enc::Aes128, Mac::Sha1),
    legacy(0x0035, "TLS_RSA_WITH_AES_256_CBC_SHA", "AES256-SHA", Kx::Rsa, Au::Rsa, Enc::Aes256, Mac::Sha1),
    legacy(0x003B, "TLS_RSA_WITH_NULL_SHA256", "NULL-SHA256", Kx::Rsa, Au::Rsa, Enc::Null, Mac::Sha256),
    legacy(0x003C, "TLS_RSA_WITH_AES_128_CBC_SHA256", "AES128-SHA256", Kx::Rsa, Au::Rsa, Enc::Aes128, Mac::Sha256),
    legacy(0x003D, "TLS_RSA_WITH_AES_256_CBC_SHA256", "AES256-SHA256", Kx::Rsa, Au::Rsa, Enc::Aes256, Mac::Sha256),
    legacy(0x0041, "TLS_RSA_WITH_CAMELLIA_128_CBC_SHA", "CAMELLIA128-SHA", Kx::Rsa, Au::Rsa, Enc::Camellia128, Mac::Sha1),
    legacy(0x0084, "TLS_RSA_WITH_CAMELLIA_256_CBC_SHA", "CAMELLIA256-SHA", Kx::Rsa, Au::Rsa, Enc::Camellia256, Mac::Sha1),
    legacy(0x0096, "TLS_RSA_WITH_SEED_CBC_SHA", "SEED-SHA", Kx::Rsa, Au::Rsa, Enc::Seed, Mac::Sha1),
    legacy(0x009C, "TLS_RSA_WITH_AES_128_GCM_SHA256", "AES128-GCM-SHA256", Kx::Rsa, Au::Rsa, Enc::Aes128Gcm, Mac::Aead),
    legacy(0x009D, "TLS_RSA_WITH_AES_256_GCM_SHA384", "AES256-GCM-SHA384", Kx::Rsa, Au::Rsa, Enc::Aes256Gcm, Mac::Aead),
    legacy(0xC050, "TLS_RSA_WITH_ARIA_128_GCM_SHA256", "ARIA128-GCM-SHA256", Kx::Rsa, Au::Rsa, Enc::Aria128Gcm, Mac::Aead),
    legacy(0xC09C, "TLS_RSA_WITH_AES_128_CCM", "AES128-CCM", Kx::Rsa, Au::Rsa, Enc::Aes128Ccm, Mac::Aead),
    legacy(0xC09D, "TLS_RSA_WITH_AES_256_CCM", "AES256-CCM", Kx::Rsa, Au::Rsa, Enc::Aes256Ccm, Mac::Aead),
    // Static DH
    legacy(0x0030, "TLS_DH_DSS_WITH_AES_128_CBC_SHA", "DH-DSS-AES128-SHA", Kx::Dh, Au::Dss, Enc::Aes128, Mac::Sha1),
    legacy(0x0031, "TLS_DH_RSA_WITH_AES_128_CBC_SHA", "DH-RSA-AES128-SHA", Kx::Dh, Au::Rsa, Enc::Aes128, Mac::Sha1),
    // DHE-DSS
    legacy(0x0013, "TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA", "EDH-DSS-DES-CBC3-SHA", Kx::Dhe, Au::Dss, Enc::TripleDes, Mac::Sha1),
    legacy(0x0032, "TLS_DHE_DSS_WITH_AES_128_CBC_SHA", "DHE-DSS-AES128-SHA", Kx::Dhe, Au::Dss, Enc::Aes128, Mac::Sha1),
    legacy(0x0038, "TLS_DHE_DSS_WITH_AES_256_CBC_SHA", "DHE-DSS-AES256-SHA", Kx::Dhe, Au::Dss, Enc::Aes256, Mac::Sha1),
    legacy(0x0040, "TLS_DHE_DSS_WITH_AES_128_CBC_SHA256", "DHE-DSS-AES128-SHA256", Kx::Dhe, Au::Dss, Enc::Aes128, Mac::Sha256),
    legacy(0x006A, "TLS_DHE_DSS_WITH_AES_256_CBC_SHA256", "DHE-DSS-AES256-SHA256", Kx::Dhe, Au::Dss, Enc::Aes256, Mac::Sha256),
    legacy(0x00A2, "TLS_DHE_DSS_WITH_AES_128_GCM_SHA256", "DHE-DSS-AES128-GCM-SHA256", Kx::Dhe, Au::Dss, Enc::Aes128Gcm, Mac::Aead),
    legacy(0x00A3, "TLS_DHE_DSS_WITH_AES_256_GCM_SHA384", "DHE-DSS-AES256-GCM-SHA384", Kx::Dhe, Au::Dss, Enc::Aes256Gcm, Mac::Aead),
    // DHE-RSA
    legacy(0x0014, "TLS_DHE_RSA_EXPORT_WITH_DES40_CBC_SHA", "EXP-EDH-RSA-DES-CBC-SHA", Kx::Dhe, Au::Rsa, Enc::Des40, Mac::Sha1),
    legacy(0x0015, "TLS_DHE_RSA_WITH_DES_CBC_SHA", "EDH-RSA-DES-CBC-SHA", Kx::Dhe, Au::Rsa, Enc::Des, Mac::Sha1),
    legacy(0x0016, "TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA", "EDH-RSA-DES-CBC3-SHA", Kx::Dhe, Au::Rsa, Enc::TripleDes, Mac::Sha1),
    legacy(0x0033, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA", "DHE-RSA-AES128-SHA", Kx::Dhe, Au::Rsa, Enc::Aes128, Mac::Sha1),
    legacy(0x0039, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA", "DHE-RSA-AES256-SHA", Kx::Dhe, Au::Rsa, Enc::Aes256, Mac::Sha1),
    legacy(0x0045, "TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA", "DHE-RSA-CAMELLIA128-SHA", Kx::Dhe, Au::Rsa, Enc::Camellia128, Mac::Sha1),
    legacy(0x0067, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA256", "DHE-RSA-AES128-SHA256", Kx::Dhe, Au::Rsa, Enc::Aes128, Mac::Sha256),
    legacy(0x006B, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA256", "DHE-RSA-AES256-SHA256", Kx::Dhe, Au::Rsa, Enc::Aes256, Mac::Sha256),
    legacy(0x0088, "TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA", "DHE-RSA-CAMELLIA256-SHA", Kx::Dhe, Au::Rsa, Enc::Camellia256, Mac::Sha1),
    legacy(0x009E, "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256", "DHE-RSA-AES128-GCM-SHA256", Kx::Dhe, Au::Rsa, Enc::Aes128Gcm, Mac::Aead),
    legacy(0x009F, "TLS_DHE_RSA_WITH_AES_256_GCM_SHA384", "DHE-RSA-AES256-GCM-SHA384", Kx::Dhe, Au::Rsa, Enc::Aes256Gcm, Mac::Aead),
    legacy(0xC09E, "TLS_DHE_RSA_WITH_AES_128_CCM", "DHE-RSA-AES128-CCM", Kx::Dhe, Au::Rsa, Enc::Aes128Ccm, Mac::Aead),
    legacy(0xC09F, "TLS_DHE_RSA_WITH_AES_256_CCM", "DHE-RSA-AES256-CCM", Kx::Dhe, Au::Rsa, Enc::Aes256Ccm, Mac::Aead),
    legacy(0xCCAA, "TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256", "DHE-RSA-CHACHA20-POLY1305", Kx::Dhe, Au::Rsa, Enc::ChaCha20Poly1305, Mac::Aead),
    // Anonymous DH
    legacy(0x0017, "TLS_DH_anon_EXPORT_WITH_RC4_40_MD5", "EXP-ADH-RC4-MD5", Kx::Dhe, Au::Anon, Enc::Rc4_40, Mac::Md5),
    legacy(0x0018, "TLS_DH_anon_WITH_RC4_128_MD5", "ADH-RC4-MD5", Kx::Dhe, Au::Anon, Enc::Rc4_128, Mac::Md5),
    legacy(0x001B, "TLS_DH_anon_WITH_3DES_EDE_CBC_SHA", "ADH-DES-CBC3-SHA", Kx::Dhe, Au::Anon, Enc::TripleDes, Mac::Sha1),
    legacy(0x0034, "TLS_DH_anon_WITH_AES_128_CBC_SHA", "ADH-AES128-SHA", Kx::Dhe, Au::Anon, Enc::Aes128, Mac::Sha1),
    legacy(0x003A, "TLS_DH_anon_WITH_AES_256_CBC_SHA", "ADH-AES256-SHA", Kx::Dhe, Au::Anon, Enc::Aes256, Mac::Sha1),
    legacy(0x00A6, "TLS_DH_anon_WITH_AES_128_GCM_SHA256", "ADH-AES128-GCM-SHA256", Kx::Dhe, Au::Anon, Enc::Aes128Gcm, Mac::Aead),
    legacy(0x00A7, "TLS_DH_anon_WITH_AES_256_GCM_SHA384", "ADH-AES256-GCM-SHA384", Kx::Dhe, Au::Anon, Enc::Aes256Gcm, Mac::Aead),
    // PSK
    legacy(0x008C, "TLS_PSK_WITH_AES_128_CBC_SHA", "PSK-AES128-CBC-SHA", Kx::Psk, Au::Psk, Enc::Aes128, Mac::Sha1),
    legacy(0x00A8, "TLS_PSK_WITH_AES_128_GCM_SHA256", "PSK-AES128-GCM-SHA256", Kx::Psk, Au::Psk, Enc::Aes128Gcm, Mac::Aead),
    legacy(0xCCAB, "TLS_PSK_WITH_CHACHA20_POLY1305_SHA256", "PSK-CHACHA20-POLY1305", Kx::Psk, Au::Psk, Enc::ChaCha20Poly1305, Mac::Aead),
    legacy(0xCCAC, "TLS_ECDHE_PSK_WITH_CHACHA20_POLY1305_SHA256", "ECDHE-PSK-CHACHA20-POLY1305", Kx::EcdhePsk, Au::Psk, Enc::ChaCha20Poly1305, Mac::Aead),
    legacy(0xCCAD, "TLS_DHE_PSK_WITH_CHACHA20_POLY1305_SHA256", "DHE-PSK-CHACHA20-POLY1305", Kx::DhePsk, Au::Psk, Enc::ChaCha20Poly1305, Mac::Aead),
    // SRP
    legacy(0xC01D, "TLS_SRP_SHA_WITH_AES_128_CBC_SHA", "SRP-AES-128-CBC-SHA", Kx::Srp, Au::Srp, Enc::Aes128, Mac::Sha1),
    // Static ECDH
    legacy(0xC004, "TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA", "ECDH-ECDSA-AES128-SHA", Kx::Ecdh, Au::Ecdsa, Enc::Aes128, Mac::Sha1),
    legacy(0xC005, "TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA", "ECDH-ECDSA-AES256-SHA", Kx::Ecdh, Au::Ecdsa, Enc::Aes256, Mac::Sha1),
    legacy(0xC00E, "TLS_ECDH_RSA_WITH_AES_128_CBC_SHA", "ECDH-RSA-AES128-SHA", Kx::Ecdh, Au::Rsa, Enc::Aes128, Mac::Sha1),
    legacy(0xC00F, "TLS_ECDH_RSA_WITH_AES_256_CBC_SHA", "ECDH-RSA-AES256-SHA", Kx::Ecdh, Au::Rsa, Enc::Aes256, Mac::Sha1),
    // ECDHE-ECDSA
    legacy(0xC006, "TLS_ECDHE_ECDSA_WITH_NULL_SHA", "ECDHE-ECDSA-NULL-SHA", Kx::Ecdhe, Au::Ecdsa, Enc::Null, Mac::Sha1),
    legacy(0xC007, "TLS_ECDHE_ECDSA_WITH_RC4_128_SHA", "ECDHE-ECDSA-RC4-SHA", Kx::Ecdhe, Au::Ecdsa, Enc::Rc4_128, Mac::Sha1),
    legacy(0xC008, "TLS_ECDHE_ECDSA_WITH_3DES_EDE_CBC_SHA", "ECDHE-ECDSA-DES-CBC3-SHA", Kx::Ecdhe, Au::Ecdsa, Enc::TripleDes, Mac::Sha1),
    legacy(0xC009, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA", "ECDHE-ECDSA-AES128-SHA", Kx::Ecdhe, Au::Ecdsa, Enc::Aes128, Mac::Sha1),
    legacy(0xC00A, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA", "ECDHE-ECDSA-AES256-SHA", Kx::Ecdhe, Au::Ecdsa, Enc::Aes256, Mac::Sha1),
    legacy(0xC023, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256", "ECDHE-ECDSA-AES128-SHA256", Kx::Ecdhe, Au::Ecdsa, Enc::Aes128, Mac::Sha256),
    legacy(0xC024, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384", "ECDHE-ECDSA-AES256-SHA384", Kx::Ecdhe, Au::Ecdsa, Enc::Aes256, Mac::Sha384),
    legacy(0xC02B, "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", "ECDHE-ECDSA-AES128-GCM-SHA256", Kx::Ecdhe, Au::Ecdsa, Enc::Aes128Gcm, Mac::Aead),
    legacy(0xC02C, "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384", "ECDHE-ECDSA-AES256-GCM-SHA384", Kx::Ecdhe, Au::Ecdsa, Enc::Aes256Gcm, Mac::Aead),
    legacy(0xC0AC, "TLS_ECDHE_ECDSA_WITH_AES_128_CCM", "ECDHE-ECDSA-AES128-CCM", Kx::Ecdhe, Au::Ecdsa, Enc::Aes128Ccm, Mac::Aead),
    legacy(0xC0AD, "TLS_ECDHE_ECDSA_WITH_AES_256_CCM", "ECDHE-ECDSA-AES256-CCM", Kx::Ecdhe, Au::Ecdsa, Enc::Aes256Ccm, Mac::Aead),
    legacy(0xCCA9, "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256", "ECDHE-ECDSA-CHACHA20-POLY1305", Kx::Ecdhe, Au::Ecdsa, Enc::ChaCha20Poly1305, Mac::Aead),
    // ECDHE-RSA
    legacy(0xC010, "TLS_ECDHE_RSA_WITH_NULL_SHA", "ECDHE-RSA-NULL-SHA", Kx::Ecdhe, Au::Rsa, Enc::Null, Mac::Sha1),
    legacy(0xC011, "TLS_ECDHE_RSA_WITH_RC4_128_SHA", "ECDHE-RSA-RC4-SHA", Kx::Ecdhe, Au::Rsa, Enc::Rc4_128, Mac::Sha1),
    legacy(0xC012, "TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA", "ECDHE-RSA-DES-CBC3-SHA", Kx::Ecdhe, Au::Rsa, Enc::TripleDes, Mac::Sha1),
    legacy(0xC013, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA", "ECDHE-RSA-AES128-SHA", Kx::Ecdhe, Au::Rsa, Enc::Aes128, Mac::Sha1),
    legacy(0xC014, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA", "ECDHE-RSA-AES256-SHA", Kx::Ecdhe, Au::Rsa, Enc::Aes256, Mac::Sha1),
    legacy(0xC027, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256", "ECDHE-RSA-AES128-SHA256", Kx::Ecdhe, Au::Rsa, Enc::Aes128, Mac::Sha256),
    legacy(0xC028, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384", "ECDHE-RSA-AES256-SHA384", Kx::Ecdhe, Au::Rsa, Enc::Aes256, Mac::Sha384),
    legacy(0xC02F, "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", "ECDHE-RSA-AES128-GCM-SHA256", Kx::Ecdhe, Au::Rsa, Enc::Aes128Gcm, Mac::Aead),
    legacy(0xC030, "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384", "ECDHE-RSA-AES256-GCM-SHA384", Kx::Ecdhe, Au::Rsa, Enc::Aes256Gcm, Mac::Aead),
    legacy(0xC061, "TLS_ECDHE_RSA_WITH_ARIA_256_GCM_SHA384", "ECDHE-ARIA256-GCM-SHA384", Kx::Ecdhe, Au::Rsa, Enc::Aria256Gcm, Mac::Aead),
    legacy(0xC076, "TLS_ECDHE_RSA_WITH_CAMELLIA_128_CBC_SHA256", "ECDHE-RSA-CAMELLIA128-SHA256", Kx::Ecdhe, Au::Rsa, Enc::Camellia128, Mac::Sha256),
    legacy(0xCCA8, "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256", "ECDHE-RSA-CHACHA20-POLY1305", Kx::Ecdhe, Au::Rsa, Enc::ChaCha20Poly1305, Mac::Aead),
    // Anonymous ECDH
    legacy(0xC016, "TLS_ECDH_anon_WITH_RC4_128_SHA", "AECDH-RC4-SHA", Kx::Ecdhe, Au::Anon, Enc::Rc4_128, Mac::Sha1),
    legacy(0xC018, "TLS_ECDH_anon_WITH_AES_128_CBC_SHA", "AECDH-AES128-SHA", Kx::Ecdhe, Au::Anon, Enc::Aes128, Mac::Sha1),
    legacy(0xC019, "TLS_ECDH_anon_WITH_AES_256_CBC_SHA", "AECDH-AES256-SHA", Kx::Ecdhe, Au::Anon, Enc::Aes256, Mac::Sha1),
];
