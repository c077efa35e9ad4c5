//! Centralized validation and helper functions.

/// Upper bound accepted for a search budget from user input
pub const MAX_SEARCH_ATTEMPTS: usize = 100_000;

/// Largest decompressed archive entry accepted (128 MiB)
pub const MAX_ROM_SIZE: u64 = 128 * 1024 * 1024;

/// Validation error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid CRC-32: expected up to 8 hex digits")]
    InvalidCrc32,
    #[error("Invalid SHA-1: expected 40 hex digits")]
    InvalidSha1,
    #[error("Search attempts must be between 1 and {MAX_SEARCH_ATTEMPTS}")]
    InvalidAttemptLimit,
}

/// Parse a CRC-32 written as hex, with or without a `0x` prefix.
///
/// # Examples
///
/// ```
/// use romident::utils::validation::parse_crc32;
///
/// assert_eq!(parse_crc32("CBF43926"), Ok(0xCBF4_3926));
/// assert_eq!(parse_crc32("0x1f"), Ok(0x1F));
/// ```
///
/// # Errors
///
/// Returns `ValidationError::InvalidCrc32` for empty, non-hex or overlong input.
pub fn parse_crc32(s: &str) -> Result<u32, ValidationError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidCrc32);
    }
    u32::from_str_radix(digits, 16).map_err(|_| ValidationError::InvalidCrc32)
}

/// Check a user-supplied search budget.
///
/// # Errors
///
/// Returns `ValidationError::InvalidAttemptLimit` if `attempts` is zero or too large.
pub fn validate_attempt_limit(attempts: usize) -> Result<usize, ValidationError> {
    if attempts == 0 || attempts > MAX_SEARCH_ATTEMPTS {
        Err(ValidationError::InvalidAttemptLimit)
    } else {
        Ok(attempts)
    }
}
