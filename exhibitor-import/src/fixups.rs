//! Curated title corrections.
//!
//! Source titles are long descriptive phrases; the published pages want a
//! short title plus the fuller forms. Each correction is guarded by the
//! title it expects to find, so upstream edits are reported instead of being
//! silently overwritten.

use std::collections::BTreeMap;

use exhibitor_catalog::{Field, TitleFixup};

use crate::collection::Collection;

/// Outcome counts of a [`fix_titles`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixupStats {
    /// Records whose titles were rewritten
    pub applied: usize,
    /// Records skipped because the stored title no longer matches
    pub drifted: usize,
}

/// Apply title fix-ups to every record that has one.
///
/// On a match, `title`, `full_title`, and `title_detail` are overwritten with
/// whichever values the fix-up supplies. If the record then has no
/// `full_title` and its title changed, the original title becomes the full
/// title. On a mismatch the record is left alone and the drift is logged.
pub fn fix_titles(collection: &mut Collection, titles: &BTreeMap<String, TitleFixup>) -> FixupStats {
    let mut stats = FixupStats::default();

    for record in collection.records_mut() {
        let Some(fixup) = titles.get(record.id()) else {
            continue;
        };

        if record.get(Field::Title) != Some(fixup.original_title.as_str()) {
            log::error!(
                "Title/ID drift for id=\"{}\". Expected \"{}\". Got \"{}\"",
                record.id(),
                fixup.original_title,
                record.get(Field::Title).unwrap_or("<none>"),
            );
            stats.drifted += 1;
            continue;
        }

        for (field, value) in [
            (Field::Title, &fixup.title),
            (Field::FullTitle, &fixup.full_title),
            (Field::TitleDetail, &fixup.title_detail),
        ] {
            if let Some(value) = value {
                record.set(field, Some(value.clone()));
            }
        }
        if record.get(Field::FullTitle).is_none()
            && record.get(Field::Title) != Some(fixup.original_title.as_str())
        {
            record.set(Field::FullTitle, Some(fixup.original_title.clone()));
        }
        stats.applied += 1;
    }

    log::debug!(
        "Applied {} title fix-ups ({} drifted)",
        stats.applied,
        stats.drifted
    );
    stats
}
