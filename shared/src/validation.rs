//! Validation utilities for the crop advisory platform

/// Longest key the realtime database accepts, in UTF-8 bytes
pub const MAX_STORE_KEY_BYTES: usize = 768;

/// Validate a single path segment for the realtime database
/// (user ids, crop keys, log ids)
pub fn validate_store_key(key: &str) -> Result<(), &'static str> {
    if key.trim().is_empty() {
        return Err("Key must not be empty");
    }
    if key.len() > MAX_STORE_KEY_BYTES {
        return Err("Key must be at most 768 bytes");
    }
    if key
        .chars()
        .any(|c| matches!(c, '.' | '$' | '#' | '[' | ']' | '/') || c.is_control())
    {
        return Err("Key must not contain '.', '$', '#', '[', ']', '/' or control characters");
    }
    Ok(())
}

/// Validate a translation target such as "kn" or "zh-TW"
pub fn validate_language_code(code: &str) -> Result<(), &'static str> {
    let mut parts = code.split('-');
    let primary = parts.next().unwrap_or_default();
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Language code must start with a 2-3 letter language subtag");
    }
    for region in parts {
        if region.is_empty() || region.len() > 8 || !region.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("Invalid language subtag");
        }
    }
    Ok(())
}
