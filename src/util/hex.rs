/// Space-separated lowercase hex, used when a reply is not SSL/TLS at all.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_record_header() {
        assert_eq!(to_hex(&[0x48, 0x54, 0x54, 0x50, 0x2f]), "48 54 54 50 2f");
        assert_eq!(to_hex(&[]), "");
    }
}
