//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates SKU / code style identifiers.
///
/// Requirements:
/// - 1-40 characters in length
/// - Only ASCII alphanumerics, `-` and `_`
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    let trimmed = code.trim();
    if trimmed.is_empty() || trimmed.len() > 40 {
        return Err(ValidationError::new("code_invalid_length"));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::new("code_invalid_characters"));
    }

    Ok(())
}

/// Rejects strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validates an optional URL produced by the storage client.
pub fn validate_url_like(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") || trimmed.starts_with('/')
    {
        return Ok(());
    }
    Err(ValidationError::new("url_invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_rejects_empty() {
        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
    }

    #[test]
    fn code_rejects_special_chars() {
        assert!(validate_code("SKU 01").is_err());
        assert!(validate_code("sku/01").is_err());
    }

    #[test]
    fn code_accepts_valid() {
        assert!(validate_code("CMP-0001_a").is_ok());
    }

    #[test]
    fn url_like_accepts_blank_and_http() {
        assert!(validate_url_like("").is_ok());
        assert!(validate_url_like("https://cdn.example.com/a.png").is_ok());
        assert!(validate_url_like("/storage/a.png").is_ok());
        assert!(validate_url_like("ftp://x").is_err());
    }
}
