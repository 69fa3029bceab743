//! Field normalization for raw spreadsheet and JSON values.
//!
//! Every value that enters a [`Record`](crate::Record) passes through
//! [`normalize_value`]: whitespace is collapsed, the text is recomposed to
//! Unicode NFC, and empty results become `None`.

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::error::CatalogError;

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// ```
/// use exhibitor_catalog::normalize_space;
///
/// assert_eq!(normalize_space("\nFoo   lish "), "Foo lish");
/// ```
pub fn normalize_space(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Clean a single raw value.
///
/// Returns `None` for absent, empty, or whitespace-only input.
pub fn normalize_value(raw: Option<&str>) -> Option<String> {
    let collapsed = normalize_space(raw?);
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.nfc().collect())
}

/// Clean a raw JSON value from the given column.
///
/// Only strings and `null` are accepted; any other JSON type is a caller
/// error.
pub fn normalize_raw(column: &str, raw: &Value) -> Result<Option<String>, CatalogError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) => Ok(normalize_value(Some(s))),
        other => Err(CatalogError::InvalidArgument {
            column: column.to_string(),
            kind: json_kind(other),
        }),
    }
}

/// Human-readable name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collapses_internal_runs() {
        assert_eq!(normalize_space("a \t b\n\nc"), "a b c");
        assert_eq!(normalize_space("   "), "");
    }

    #[test]
    fn empty_and_blank_become_absent() {
        assert_eq!(normalize_value(None), None);
        assert_eq!(normalize_value(Some("")), None);
        assert_eq!(normalize_value(Some(" \n\t ")), None);
    }

    #[test]
    fn recomposes_to_nfc() {
        // ε + combining acute accent
        let decomposed = "μ\u{03b5}\u{0301}γα";
        let cleaned = normalize_value(Some(decomposed)).unwrap();
        assert_eq!(cleaned, "μ\u{03ad}γα");
        assert_eq!(cleaned.chars().count(), 4);
    }

    #[test]
    fn raw_rejects_non_strings() {
        assert_eq!(normalize_raw("title", &json!(null)).unwrap(), None);
        assert_eq!(
            normalize_raw("title", &json!("  Foo ")).unwrap().as_deref(),
            Some("Foo")
        );
        let err = normalize_raw("title", &json!(42)).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidArgument { kind: "number", .. }
        ));
    }
}
