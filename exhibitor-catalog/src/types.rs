//! Data model types for exhibition objects.
//!
//! These types represent one catalog entry ([`Record`]), its fixed schema
//! ([`Field`]), and the curator-authored tables loaded from YAML.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::crosswalk::Crosswalk;
use crate::error::CatalogError;

// ── Field ───────────────────────────────────────────────────────────────────

/// A named field of the exhibition object schema.
///
/// The serialized names match the field names of the CMS exhibition object
/// content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Title,
    Summary,
    FullTitle,
    TitleDetail,
    Artist,
    Author,
    Copyist,
    DownloadLink,
    DownloadLinkText,
    DownloadLinkType,
    Translator,
    Copyright,
    Credits,
    Date,
    Dimensions,
    ExhibitionContext,
    Image,
    Alt,
    InventoryNum,
    Lender,
    LenderLink,
    Medium,
    NotAfter,
    NotBefore,
    Notes,
    ObjectLanguage,
    ObjectLocation,
    Text,
    Label,
    Slug,
}

impl Field {
    /// Every field of the schema, identifier first.
    pub const ALL: [Field; 31] = [
        Field::Id,
        Field::Title,
        Field::Summary,
        Field::FullTitle,
        Field::TitleDetail,
        Field::Artist,
        Field::Author,
        Field::Copyist,
        Field::DownloadLink,
        Field::DownloadLinkText,
        Field::DownloadLinkType,
        Field::Translator,
        Field::Copyright,
        Field::Credits,
        Field::Date,
        Field::Dimensions,
        Field::ExhibitionContext,
        Field::Image,
        Field::Alt,
        Field::InventoryNum,
        Field::Lender,
        Field::LenderLink,
        Field::Medium,
        Field::NotAfter,
        Field::NotBefore,
        Field::Notes,
        Field::ObjectLanguage,
        Field::ObjectLocation,
        Field::Text,
        Field::Label,
        Field::Slug,
    ];

    /// Fields that must be present before a record is considered complete.
    pub const REQUIRED: [Field; 2] = [Field::Title, Field::InventoryNum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Summary => "summary",
            Self::FullTitle => "full_title",
            Self::TitleDetail => "title_detail",
            Self::Artist => "artist",
            Self::Author => "author",
            Self::Copyist => "copyist",
            Self::DownloadLink => "download_link",
            Self::DownloadLinkText => "download_link_text",
            Self::DownloadLinkType => "download_link_type",
            Self::Translator => "translator",
            Self::Copyright => "copyright",
            Self::Credits => "credits",
            Self::Date => "date",
            Self::Dimensions => "dimensions",
            Self::ExhibitionContext => "exhibition_context",
            Self::Image => "image",
            Self::Alt => "alt",
            Self::InventoryNum => "inventory_num",
            Self::Lender => "lender",
            Self::LenderLink => "lender_link",
            Self::Medium => "medium",
            Self::NotAfter => "not_after",
            Self::NotBefore => "not_before",
            Self::Notes => "notes",
            Self::ObjectLanguage => "object_language",
            Self::ObjectLocation => "object_location",
            Self::Text => "text",
            Self::Label => "label",
            Self::Slug => "slug",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CatalogError::unknown_field(s))
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// One catalog entry: an object or object group on a single exhibition page.
///
/// The identifier is always present. Every other schema field is either a
/// normalized string or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: String,
    values: BTreeMap<Field, String>,
}

impl Record {
    /// Create an empty record with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Create an empty record with a fresh random (v4 UUID) identifier.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value of a schema field. `Field::Id` always yields the identifier.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => Some(&self.id),
            _ => self.values.get(&field).map(String::as_str),
        }
    }

    /// Store (or clear) a field value.
    ///
    /// `Field::Id` is ignored: the identifier is fixed at construction, so a
    /// record stored in a collection always matches its key. Use
    /// [`with_id`](Self::with_id) for a retargeted copy.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        match (field, value) {
            (Field::Id, _) => {}
            (_, Some(v)) => {
                self.values.insert(field, v);
            }
            (_, None) => {
                self.values.remove(&field);
            }
        }
    }

    /// Builder-style [`set`](Self::set) for a present value.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// A copy of this record with only the identifier replaced.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: self.values.clone(),
        }
    }

    /// Every schema field with its value, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Required fields that are still absent.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}

impl Serialize for Record {
    /// Serializes every schema field, absent ones as `null`, keys sorted.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&'static str, Option<&str>> = self
            .fields()
            .map(|(field, value)| (field.as_str(), value))
            .collect();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (key, value) in sorted {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

// ── Curated exhibition data ─────────────────────────────────────────────────

/// General exhibition settings from `exhibition.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExhibitionInfo {
    #[serde(default)]
    pub name: String,
    /// Sentence appended to every synthesized summary.
    #[serde(default)]
    pub blurb: Option<String>,
    /// Default CMS location for published payloads.
    #[serde(default)]
    pub url_path: Option<String>,
    /// Delimiter used when merging divergent values.
    #[serde(default)]
    pub delimiter: Option<String>,
    /// External column name -> schema field, for spreadsheet exports.
    #[serde(default)]
    pub crosswalk: Option<Crosswalk>,
}

/// A curated title correction for one record.
///
/// Only applied while the stored title still equals `original_title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleFixup {
    pub original_title: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub full_title: Option<String>,
    #[serde(default)]
    pub title_detail: Option<String>,
}

/// Summary phrasing tables from `phrasing.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phrasing {
    /// Medium -> lead-in noun phrase for records titled "Illustration".
    #[serde(default)]
    pub illustration_media: BTreeMap<String, String>,
}

/// Per-identifier correction data, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct FixupTables {
    pub titles: BTreeMap<String, TitleFixup>,
    pub slugs: BTreeMap<String, String>,
    pub summaries: BTreeMap<String, String>,
    pub phrasing: Phrasing,
}

/// Everything curated for one exhibition.
#[derive(Debug, Clone, Default)]
pub struct Exhibition {
    pub info: ExhibitionInfo,
    pub fixups: FixupTables,
    /// Lower-cased words the spelling report accepts.
    pub permitted_words: BTreeSet<String>,
}

impl Exhibition {
    /// The crosswalk for spreadsheet exports, identity when none is curated.
    pub fn crosswalk(&self) -> Crosswalk {
        self.info.crosswalk.clone().unwrap_or_default()
    }
}
