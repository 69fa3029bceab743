//! Mapping from an external source's column names onto the record schema.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;
use crate::types::Field;

/// How raw row keys are translated into schema [`Field`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Crosswalk {
    /// Row keys are already schema field names.
    #[default]
    Identity,
    /// Row keys are external column names, each mapped to one field.
    Mapped(IndexMap<String, Field>),
}

impl Crosswalk {
    pub fn identity() -> Self {
        Self::Identity
    }

    /// Build a mapped crosswalk from `(column, field)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Field)>,
        S: Into<String>,
    {
        Self::Mapped(
            pairs
                .into_iter()
                .map(|(column, field)| (column.into(), field))
                .collect(),
        )
    }

    /// Resolve a raw row key to its schema field.
    ///
    /// Unknown names are rejected rather than silently dropped.
    pub fn resolve(&self, column: &str) -> Result<Field, CatalogError> {
        match self {
            Self::Identity => column.parse(),
            Self::Mapped(columns) => columns
                .get(column)
                .copied()
                .ok_or_else(|| CatalogError::unknown_column(column)),
        }
    }

    /// The external column that carries the identifier, if any.
    pub fn id_column(&self) -> Option<&str> {
        match self {
            Self::Identity => Some(Field::Id.as_str()),
            Self::Mapped(columns) => columns
                .iter()
                .find(|(_, field)| **field == Field::Id)
                .map(|(column, _)| column.as_str()),
        }
    }
}

impl Serialize for Crosswalk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Identity => IndexMap::<String, Field>::new().serialize(serializer),
            Self::Mapped(columns) => columns.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Crosswalk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let columns = IndexMap::<String, Field>::deserialize(deserializer)?;
        if columns.is_empty() {
            Ok(Self::Identity)
        } else {
            Ok(Self::Mapped(columns))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_schema_names_only() {
        let xwalk = Crosswalk::identity();
        assert_eq!(xwalk.resolve("inventory_num").unwrap(), Field::InventoryNum);
        assert!(matches!(
            xwalk.resolve("Inv. No."),
            Err(CatalogError::UnknownField(_))
        ));
    }

    #[test]
    fn mapped_rejects_unmapped_columns() {
        let xwalk = Crosswalk::from_pairs([("Title", Field::Title), ("Inv. No.", Field::InventoryNum)]);
        assert_eq!(xwalk.resolve("Inv. No.").unwrap(), Field::InventoryNum);
        let err = xwalk.resolve("title").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownColumn(ref c) if c == "title"));
    }

    #[test]
    fn finds_identifier_column() {
        let xwalk = Crosswalk::from_pairs([("Catalogue Check. #", Field::Id), ("Title", Field::Title)]);
        assert_eq!(xwalk.id_column(), Some("Catalogue Check. #"));
        assert_eq!(Crosswalk::identity().id_column(), Some("id"));
        let no_id = Crosswalk::from_pairs([("Title", Field::Title)]);
        assert_eq!(no_id.id_column(), None);
    }
}
