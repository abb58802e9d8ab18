//! JSON output formatting.

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campcheck_core::inventory::Settings;

    #[test]
    fn test_format_json_is_compact() {
        assert_eq!(
            format_json(&Settings::default()),
            r#"{"darkMode":false,"notifications":true}"#
        );
    }
}
