//! Data models shared across database access and API handlers.

pub mod attendance;
pub mod employee;
pub mod inventory;
pub mod kss;
pub mod sales;

/// Trims an optional text field, mapping blank input to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::normalize_optional;

    #[test]
    fn normalize_optional_drops_blank_values() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(Some(" x ".into())), Some("x".into()));
    }
}
