//! Image and alt-text attachment.
//!
//! Image files are named `<anything>_<id>.<ext>`; the identifier after the
//! last underscore links the file to its record. Alt text arrives as a
//! separate CSV written by the accessibility reviewers.

use std::path::Path;

use exhibitor_catalog::{Field, normalize_value};

use crate::collection::Collection;
use crate::error::ExhibitError;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Outcome counts of an [`attach_images`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    pub attached: usize,
    /// Files naming an identifier the collection does not have
    pub unmatched: usize,
    /// Image files without an `_<id>` suffix
    pub skipped: usize,
}

/// How strictly [`attach_alt_text`] treats rows that do not line up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AltTextOptions {
    /// Fail when a described record has no image
    pub fail_on_image_missing: bool,
    /// Fail on unknown identifiers or a disagreeing `image` column
    pub fail_on_mismatch: bool,
}

/// Outcome counts of an [`attach_alt_text`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AltTextStats {
    pub attached: usize,
    pub mismatched: usize,
    pub missing_image: usize,
}

/// The identifier encoded in an image file name, if the file is an image.
fn image_id(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    if !IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.rsplit_once('_').map(|(_, id)| id)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Set `image` on every record that has a file in `dir`.
///
/// Files are visited in name order, so when two files name the same record
/// the later one wins.
pub fn attach_images(
    collection: &mut Collection,
    dir: &Path,
    fail_on_mismatch: bool,
) -> Result<ImageStats, ExhibitError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| ExhibitError::io(dir.display().to_string(), e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .collect();
    entries.sort();

    let mut stats = ImageStats::default();
    for path in entries {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            stats.skipped += 1;
            continue;
        };
        let Some(id) = image_id(&path) else {
            log::debug!("Skipping {file_name}: no identifier in file name");
            stats.skipped += 1;
            continue;
        };
        match collection.get_mut(id) {
            Some(record) => {
                record.set(Field::Image, Some(file_name.to_string()));
                stats.attached += 1;
            }
            None if fail_on_mismatch => {
                return Err(ExhibitError::ImageMismatch {
                    file: file_name.to_string(),
                    id: id.to_string(),
                });
            }
            None => {
                log::warn!("Image {file_name} names id \"{id}\", which is not in the collection");
                stats.unmatched += 1;
            }
        }
    }

    log::info!(
        "Attached {} images from {} ({} unmatched, {} skipped)",
        stats.attached,
        dir.display(),
        stats.unmatched,
        stats.skipped
    );
    Ok(stats)
}

/// Set `alt` from a CSV with `id` and `alt` columns (and optionally `image`).
pub fn attach_alt_text(
    collection: &mut Collection,
    path: &Path,
    options: AltTextOptions,
) -> Result<AltTextStats, ExhibitError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &'static str| headers.iter().position(|h| h.trim_start_matches('\u{feff}') == name);
    let missing = |column: &'static str| ExhibitError::MissingColumn {
        path: path.display().to_string(),
        column,
    };
    let id_col = column("id").ok_or_else(|| missing("id"))?;
    let alt_col = column("alt").ok_or_else(|| missing("alt"))?;
    let image_col = column("image");

    let mut stats = AltTextStats::default();
    for result in reader.records() {
        let row = result?;
        let Some(id) = row.get(id_col).map(str::trim).filter(|id| !id.is_empty()) else {
            continue;
        };
        let alt = normalize_value(row.get(alt_col));
        let expected_image = image_col.and_then(|i| normalize_value(row.get(i)));

        let Some(record) = collection.get_mut(id) else {
            mismatch(&mut stats, options, id, "not in the collection".to_string())?;
            continue;
        };

        let Some(image) = record.get(Field::Image).map(str::to_string) else {
            if options.fail_on_image_missing {
                return Err(ExhibitError::MissingImage { id: id.to_string() });
            }
            log::warn!("Record \"{id}\" has alt text but no image");
            stats.missing_image += 1;
            continue;
        };

        if let Some(expected) = expected_image.filter(|expected| *expected != image) {
            mismatch(
                &mut stats,
                options,
                id,
                format!("describes image \"{expected}\" but the record has \"{image}\""),
            )?;
            continue;
        }

        record.set(Field::Alt, alt);
        stats.attached += 1;
    }

    log::info!(
        "Attached alt text to {} records ({} mismatched, {} without images)",
        stats.attached,
        stats.mismatched,
        stats.missing_image
    );
    Ok(stats)
}

fn mismatch(
    stats: &mut AltTextStats,
    options: AltTextOptions,
    id: &str,
    reason: String,
) -> Result<(), ExhibitError> {
    if options.fail_on_mismatch {
        return Err(ExhibitError::AltTextMismatch {
            id: id.to_string(),
            reason,
        });
    }
    log::warn!("Alt text for id \"{id}\": {reason}");
    stats.mismatched += 1;
    Ok(())
}
