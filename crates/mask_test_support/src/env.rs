use std::env;

/// Decimal or `0x`-prefixed hex.
pub fn parse_u64(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(hex) = trimmed.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        trimmed.parse::<u64>().ok()
    }
}

/// Read a seed or run count override, falling back to `default` when the
/// variable is unset.
pub fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => parse_u64(&value)
            .unwrap_or_else(|| panic!("unsupported {key} value '{value}'; expected an integer")),
        Err(_) => default,
    }
}
