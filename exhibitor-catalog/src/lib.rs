//! Exhibition object data model, field normalization, and curated YAML data.
//!
//! This crate defines the fixed record schema and the curator-authored
//! correction tables without any pipeline logic. Consumers adapt raw rows
//! into [`Record`]s here and hand them to `exhibitor-import` for merging,
//! fix-ups, slugs, and summaries.

pub mod adapter;
pub mod crosswalk;
pub mod error;
pub mod normalize;
pub mod types;
pub mod yaml;

pub use adapter::adapt_row;
pub use crosswalk::Crosswalk;
pub use error::CatalogError;
pub use normalize::{normalize_raw, normalize_space, normalize_value};
pub use types::*;
pub use yaml::{
    YamlError, load_exhibition, load_permitted_words, load_phrasing, load_slug_fixups,
    load_summary_fixups, load_title_fixups,
};
