//! CMS import payload.

use serde_json::{Map, Value, json};

use exhibitor_catalog::Field;

use crate::collection::Collection;
use crate::error::ExhibitError;

/// Build the bulk-import payload for the CMS.
///
/// Each record becomes `{url_path: item}` where `item` carries every present
/// field except `id` and `slug`, and the slug becomes the item's `id`. Items
/// follow collection order.
///
/// # Errors
///
/// [`ExhibitError::DataIntegrity`] for a record without a slug.
pub fn plone_payload(collection: &Collection, url_path: &str) -> Result<Value, ExhibitError> {
    let items = collection
        .iter()
        .map(|record| {
            let slug = record
                .get(Field::Slug)
                .ok_or_else(|| ExhibitError::data_integrity(record.id(), "no slug to publish under"))?;
            let mut item: Map<String, Value> = record
                .fields()
                .filter(|(field, _)| !matches!(field, Field::Id | Field::Slug))
                .filter_map(|(field, value)| Some((field.as_str().to_string(), Value::from(value?))))
                .collect();
            item.insert("id".to_string(), Value::from(slug));

            let mut entry = Map::new();
            entry.insert(url_path.to_string(), Value::Object(item));
            Ok(Value::Object(entry))
        })
        .collect::<Result<Vec<_>, ExhibitError>>()?;

    log::debug!("Built payload of {} items for {url_path}", items.len());
    Ok(json!({ "items": items }))
}
