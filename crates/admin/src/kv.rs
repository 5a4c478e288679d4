//! Parsing for the cluster's textual key-value configuration format.
//!
//! A subsystem config reads as `hub api_key=abc license=` — the subsystem
//! label followed by whitespace-separated `key=value` pairs. Values are
//! opaque and may be empty.

/// Parse a subsystem config line into key/value pairs. Tokens without an
/// `=` (the subsystem label itself) are skipped.
pub fn parse_kv(raw: &str) -> Vec<(String, String)> {
    raw.split_whitespace()
        .filter_map(|token| token.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Look up one key in a subsystem config line. `Some("")` means the key is
/// present with an empty value, which is distinct from absence.
pub fn lookup(raw: &str, key: &str) -> Option<String> {
    parse_kv(raw)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}
