//! Exhibition object ETL: merging, curatorial fix-ups, slugs, and summaries.
//!
//! This crate owns all pipeline logic: loading raw rows into a
//! [`Collection`], merging rows that share an identifier, applying the
//! curated title corrections, deriving slugs and summaries, attaching images,
//! and emitting the JSON documents consumed by the CMS.

pub mod collection;
pub mod error;
pub mod fixups;
pub mod media;
pub mod merge;
pub mod publish;
pub mod slugs;
pub mod spelling;
pub mod summary;

pub use collection::{Collection, Format, Incoming, InsertOutcome, write_json};
pub use error::ExhibitError;
pub use fixups::{FixupStats, fix_titles};
pub use media::{AltTextOptions, AltTextStats, ImageStats, attach_alt_text, attach_images};
pub use merge::{DEFAULT_DELIMITER, merge_records, merge_value};
pub use publish::plone_payload;
pub use slugs::{base_slug, make_slugs, slugify};
pub use spelling::{Locus, unknown_words};
pub use summary::{make_summaries, synthesize_summary};
