//! Percentage helpers shared by every tier.

/// Pull any integer into `[0, 100]`
pub fn clamp_percentage(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Parse a run of ASCII digits captured by the tag grammar and clamp it.
/// Digit strings too long for an integer saturate at 100.
pub fn parse_percentage(digits: &str) -> u8 {
    match digits.parse::<u64>() {
        Ok(value) => clamp_percentage(value.min(i64::MAX as u64) as i64),
        Err(_) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => 100,
        Err(_) => 0,
    }
}

/// Clamp into an arbitrary inclusive range, used for factor jitter
pub(crate) fn clamp_between(value: i64, min: u8, max: u8) -> u8 {
    value.clamp(min as i64, max as i64) as u8
}
