//! YAML loading for human-curated exhibition data.
//!
//! Loads the crosswalk, fix-up tables, and phrasing tables from one
//! exhibition directory under `catalog/`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{Exhibition, ExhibitionInfo, FixupTables, Phrasing, TitleFixup};

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("Invalid data in {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Load the title fix-up table (`titles.yaml`): id -> [`TitleFixup`].
pub fn load_title_fixups(path: &Path) -> Result<BTreeMap<String, TitleFixup>, YamlError> {
    let titles: BTreeMap<String, TitleFixup> = load_yaml_file(path)?.unwrap_or_default();
    for (id, fixup) in &titles {
        if fixup.title.is_none() && fixup.full_title.is_none() && fixup.title_detail.is_none() {
            return Err(YamlError::Invalid {
                path: path.display().to_string(),
                message: format!("title fix-up for id \"{id}\" changes nothing"),
            });
        }
    }
    Ok(titles)
}

/// Load the slug override table (`slugs.yaml`): id -> slug.
pub fn load_slug_fixups(path: &Path) -> Result<BTreeMap<String, String>, YamlError> {
    Ok(load_yaml_file(path)?.unwrap_or_default())
}

/// Load the literal summary table (`summaries.yaml`): id -> summary.
pub fn load_summary_fixups(path: &Path) -> Result<BTreeMap<String, String>, YamlError> {
    Ok(load_yaml_file(path)?.unwrap_or_default())
}

/// Load summary phrasing tables (`phrasing.yaml`).
pub fn load_phrasing(path: &Path) -> Result<Phrasing, YamlError> {
    Ok(load_yaml_file(path)?.unwrap_or_default())
}

/// Load the permitted-words list (`words.yaml`), lower-cased.
pub fn load_permitted_words(path: &Path) -> Result<BTreeSet<String>, YamlError> {
    let words: Vec<String> = load_yaml_file(path)?.unwrap_or_default();
    Ok(words.into_iter().map(|w| w.trim().to_lowercase()).collect())
}

/// Load all curated data for one exhibition.
///
/// Expected structure (every file is optional):
/// ```text
/// exhibition_dir/
///   exhibition.yaml   name, blurb, delimiter, crosswalk
///   titles.yaml       title fix-ups
///   slugs.yaml        slug overrides
///   summaries.yaml    literal summaries
///   phrasing.yaml     illustration media phrases
///   words.yaml        permitted words for the spelling report
/// ```
pub fn load_exhibition(exhibition_dir: &Path) -> Result<Exhibition, YamlError> {
    if !exhibition_dir.is_dir() {
        return Err(YamlError::DirNotFound(exhibition_dir.display().to_string()));
    }

    let info: ExhibitionInfo =
        load_yaml_file(&exhibition_dir.join("exhibition.yaml"))?.unwrap_or_default();
    let fixups = FixupTables {
        titles: load_title_fixups(&exhibition_dir.join("titles.yaml"))?,
        slugs: load_slug_fixups(&exhibition_dir.join("slugs.yaml"))?,
        summaries: load_summary_fixups(&exhibition_dir.join("summaries.yaml"))?,
        phrasing: load_phrasing(&exhibition_dir.join("phrasing.yaml"))?,
    };
    let permitted_words = load_permitted_words(&exhibition_dir.join("words.yaml"))?;

    Ok(Exhibition {
        info,
        fixups,
        permitted_words,
    })
}

/// Read and parse a single YAML file. A missing file yields `Ok(None)`.
fn load_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, YamlError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let item: T = serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(item))
}
