//! Record adapter: raw rows into schema records.

use serde_json::Value;

use crate::crosswalk::Crosswalk;
use crate::error::CatalogError;
use crate::normalize::{json_kind, normalize_raw};
use crate::types::{Field, Record};

/// Build a [`Record`] from one raw row.
///
/// Every value is normalized and stored under its crosswalked field. The
/// identifier is resolved in this order:
///
/// 1. `explicit_id` and the row's own identifier must agree when both exist.
/// 2. Otherwise `explicit_id`, then the row's identifier, is used.
/// 3. With neither, a fresh v4 UUID is generated.
///
/// # Examples
///
/// ```
/// use exhibitor_catalog::{Crosswalk, Field, adapt_row};
/// use serde_json::json;
///
/// let row = json!({"id": "foo", "title": "  Foo "});
/// let record = adapt_row(&row, None, &Crosswalk::identity()).unwrap();
/// assert_eq!(record.id(), "foo");
/// assert_eq!(record.get(Field::Title), Some("Foo"));
/// ```
pub fn adapt_row(
    row: &Value,
    explicit_id: Option<&str>,
    crosswalk: &Crosswalk,
) -> Result<Record, CatalogError> {
    let Value::Object(columns) = row else {
        return Err(CatalogError::InvalidInput(json_kind(row)));
    };
    if explicit_id.is_some_and(str::is_empty) {
        return Err(CatalogError::EmptyIdentifier);
    }

    let mut internal_id = None;
    let mut values = Vec::with_capacity(columns.len());
    for (column, raw) in columns {
        let field = crosswalk.resolve(column)?;
        let value = normalize_raw(column, raw)?;
        if field == Field::Id {
            internal_id = value;
        } else {
            values.push((field, value));
        }
    }

    let mut record = match (explicit_id, internal_id) {
        (Some(explicit), Some(internal)) if explicit != internal => {
            return Err(CatalogError::IdentifierConflict {
                internal,
                explicit: explicit.to_string(),
            });
        }
        (Some(explicit), _) => Record::new(explicit),
        (None, Some(internal)) => Record::new(internal),
        (None, None) => Record::with_generated_id(),
    };
    for (field, value) in values {
        record.set(field, value);
    }
    Ok(record)
}
