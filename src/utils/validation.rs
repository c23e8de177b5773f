//! Per-field predicates used by the resolver.
//!
//! Flag checks return `None` when the flag is unusable so the resolver can fall
//! back to the environment. Environment parsers return `None` on any value that
//! should be reported as invalid.

pub fn non_empty_address(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Accepts 1..=65535. Larger values are rejected instead of wrapping.
pub fn port_in_range(value: i64) -> Option<u16> {
    u16::try_from(value).ok().filter(|port| *port > 0)
}

pub fn non_negative_timeout(value: i64) -> Option<u64> {
    u64::try_from(value).ok()
}

pub fn parse_env_port(raw: &str) -> Option<u16> {
    raw.parse::<i64>().ok().and_then(port_in_range)
}

/// Environment timeouts must fit in a signed 32-bit integer.
pub fn parse_env_timeout(raw: &str) -> Option<u64> {
    raw.parse::<i32>()
        .ok()
        .and_then(|value| non_negative_timeout(i64::from(value)))
}
