pub mod hex;

/// Name of this host as reported by the resolver, for labelling summaries.
pub fn local_hostname() -> String {
    match dns_lookup::get_hostname() {
        Ok(name) if !name.is_empty() => name,
        Ok(_) | Err(_) => "localhost".to_string(),
    }
}
