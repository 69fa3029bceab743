//! Combining two records that share an identifier.
//!
//! Spreadsheet exports list multi-part objects as several rows with the same
//! catalogue number. Merging keeps every distinct value instead of letting
//! the later row win.

use exhibitor_catalog::{Field, Record};

/// Delimiter placed between divergent values.
pub const DEFAULT_DELIMITER: &str = "; ";

/// Merge one field's values, existing first.
///
/// ```
/// use exhibitor_import::merge_value;
///
/// assert_eq!(merge_value(Some("VA 17462"), Some("VA 17479"), "; ").as_deref(), Some("VA 17462; VA 17479"));
/// assert_eq!(merge_value(Some("Brick"), Some("Brick"), "; ").as_deref(), Some("Brick"));
/// assert_eq!(merge_value(None, Some("Brick"), "; ").as_deref(), Some("Brick"));
/// assert_eq!(merge_value(None, None, "; "), None);
/// ```
pub fn merge_value(existing: Option<&str>, incoming: Option<&str>, delimiter: &str) -> Option<String> {
    match (existing, incoming) {
        (None, None) => None,
        (Some(value), None) | (None, Some(value)) => Some(value.to_string()),
        (Some(a), Some(b)) if a == b => Some(a.to_string()),
        (Some(a), Some(b)) => Some(format!("{a}{delimiter}{b}")),
    }
}

/// Combine `existing` and `incoming` field by field.
///
/// The result keeps the identifier of `existing`; the identifier of
/// `incoming` is ignored.
pub fn merge_records(existing: &Record, incoming: &Record, delimiter: &str) -> Record {
    let mut merged = Record::new(existing.id());
    for field in Field::ALL {
        if field == Field::Id {
            continue;
        }
        merged.set(
            field,
            merge_value(existing.get(field), incoming.get(field), delimiter),
        );
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divergent_values_are_joined_in_order() {
        let a = Record::new("2")
            .with(Field::Title, "Brick fragment")
            .with(Field::InventoryNum, "VA 17462");
        let b = Record::new("2")
            .with(Field::Title, "Brick fragment")
            .with(Field::InventoryNum, "VA 17479")
            .with(Field::Medium, "Glazed clay");
        let merged = merge_records(&a, &b, DEFAULT_DELIMITER);
        assert_eq!(merged.get(Field::Title), Some("Brick fragment"));
        assert_eq!(merged.get(Field::InventoryNum), Some("VA 17462; VA 17479"));
        assert_eq!(merged.get(Field::Medium), Some("Glazed clay"));
        assert_eq!(merged.get(Field::Artist), None);
    }

    #[test]
    fn keeps_existing_identifier() {
        let foo = Record::new("foo").with(Field::Title, "Foo");
        let bar = Record::new("bar").with(Field::Title, "Bar");
        let merged = merge_records(&foo, &bar, DEFAULT_DELIMITER);
        assert_eq!(merged.id(), "foo");
        assert_eq!(merged.get(Field::Title), Some("Foo; Bar"));
    }

    #[test]
    fn custom_delimiter() {
        let a = Record::new("x").with(Field::Date, "600 BCE");
        let b = Record::new("x").with(Field::Date, "580 BCE");
        let merged = merge_records(&a, &b, " | ");
        assert_eq!(merged.get(Field::Date), Some("600 BCE | 580 BCE"));
    }
}
