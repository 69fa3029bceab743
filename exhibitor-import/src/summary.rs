//! Summary synthesis.
//!
//! Each published object page carries a one-paragraph description built from
//! the record's title, artist, find spot, lender, and inventory number,
//! followed by the exhibition blurb. Curators can replace the synthesized
//! text per identifier.

use exhibitor_catalog::{Field, FixupTables, Record, normalize_space};

use crate::collection::Collection;
use crate::error::ExhibitError;

/// Lead-in phrases for records titled "Illustration", keyed by medium.
/// Entries from `phrasing.yaml` take precedence.
const ILLUSTRATION_MEDIA: [(&str, &str); 7] = [
    ("Graphite on paper", "Graphite drawing"),
    ("Watercolor on paper", "Watercolor illustration"),
    ("Ink on paper", "Ink drawing"),
    ("Pencil on paper", "Pencil drawing"),
    ("Gouache on paper", "Gouache illustration"),
    ("Digital illustration", "Digital illustration"),
    ("Photograph", "Photograph"),
];

/// Synthesize and store a summary for every record.
///
/// All summaries are computed before any is stored, so a failure on one
/// record leaves the whole collection unchanged.
pub fn make_summaries(
    collection: &mut Collection,
    fixups: &FixupTables,
    blurb: Option<&str>,
) -> Result<usize, ExhibitError> {
    let summaries = collection
        .iter()
        .map(|record| synthesize_summary(record, fixups, blurb))
        .collect::<Result<Vec<_>, _>>()?;

    let total = summaries.len();
    for (record, summary) in collection.records_mut().zip(summaries) {
        record.set(Field::Summary, Some(summary));
    }
    Ok(total)
}

/// Build the summary sentence(s) for one record.
///
/// # Errors
///
/// [`ExhibitError::DataIntegrity`] when the record has no usable title, no
/// lender, or is an illustration in an unrecognized medium.
pub fn synthesize_summary(
    record: &Record,
    fixups: &FixupTables,
    blurb: Option<&str>,
) -> Result<String, ExhibitError> {
    if let Some(curated) = fixups.summaries.get(record.id()) {
        let mut summary = curated.clone();
        if let Some(blurb) = blurb {
            summary.push(' ');
            summary.push_str(blurb);
        }
        return Ok(finish(&summary));
    }

    let mut summary = lead_phrase(record, fixups)?;

    if let Some(artist) = attribution(record) {
        summary.push_str(" by ");
        summary.push_str(artist);
    }
    if let Some(location) = record.get(Field::ObjectLocation) {
        summary.push(' ');
        summary.push_str(&location_clause(location));
    }
    if !summary.ends_with('.') {
        summary.push('.');
    }
    summary.push(' ');
    summary.push_str(&lender_clause(record)?);

    if let Some(blurb) = blurb {
        summary.push(' ');
        summary.push_str(blurb);
    }
    Ok(finish(&summary))
}

/// The most detailed available title, in order: detail, full, short.
fn title_phrase(record: &Record) -> Result<&str, ExhibitError> {
    [Field::TitleDetail, Field::FullTitle, Field::Title]
        .into_iter()
        .find_map(|field| record.get(field))
        .ok_or_else(|| ExhibitError::data_integrity(record.id(), "no valid titles"))
}

/// The opening phrase: the title, with category-specific phrasing.
///
/// An illustration reads `"{medium lead} of a {title}"`. When `Illustration`
/// is the only title there is nothing to follow "of a", so the medium lead
/// (`"Graphite drawing"`) stands alone.
fn lead_phrase(record: &Record, fixups: &FixupTables) -> Result<String, ExhibitError> {
    let phrase = title_phrase(record)?;
    match record.get(Field::Title) {
        Some("Illustration") => {
            let lead = illustration_lead(record, fixups)?;
            if phrase == "Illustration" {
                Ok(lead.to_string())
            } else {
                Ok(format!("{lead} of a {}", lowercase_first(phrase)))
            }
        }
        Some("Ingot") => match record.get(Field::Medium) {
            Some(medium) => Ok(format!("{medium} ingot")),
            None => Ok(phrase.to_string()),
        },
        _ => Ok(phrase.to_string()),
    }
}

fn illustration_lead<'a>(record: &Record, fixups: &'a FixupTables) -> Result<&'a str, ExhibitError> {
    let medium = record.get(Field::Medium).ok_or_else(|| {
        ExhibitError::data_integrity(record.id(), "illustration has no medium")
    })?;
    fixups
        .phrasing
        .illustration_media
        .iter()
        .find(|(m, _)| m.eq_ignore_ascii_case(medium))
        .map(|(_, lead)| lead.as_str())
        .or_else(|| {
            ILLUSTRATION_MEDIA
                .iter()
                .find(|(m, _)| m.eq_ignore_ascii_case(medium))
                .map(|(_, lead)| *lead)
        })
        .ok_or_else(|| {
            ExhibitError::data_integrity(
                record.id(),
                format!("unrecognized medium \"{medium}\" for an illustration"),
            )
        })
}

/// The artist, unless it is an "unknown" placeholder.
fn attribution(record: &Record) -> Option<&str> {
    record
        .get(Field::Artist)
        .filter(|artist| !artist.to_lowercase().contains("unknown"))
}

/// The inventory number, unless it is a placeholder.
fn inventory_number(record: &Record) -> Option<&str> {
    record
        .get(Field::InventoryNum)
        .filter(|num| !num.contains("unknown") && *num != "N/A")
}

/// Rewrite a find-spot into a clause following the title.
fn location_clause(location: &str) -> String {
    if let Some(rest) = strip_prefix_ignore_case(location, "Said to be from") {
        return format!("said to be from{rest}");
    }
    if location == "Probably Mesopotamia, Iraq" {
        return "probably from Mesopotamia (Iraq)".to_string();
    }
    if let Some(rest) = strip_prefix_ignore_case(location, "Probably ") {
        return format!("probably from {rest}");
    }
    if let Some(rest) = strip_prefix_ignore_case(location, "Near ") {
        return format!("from near {rest}");
    }
    format!("from {location}")
}

fn lender_clause(record: &Record) -> Result<String, ExhibitError> {
    let lender = record
        .get(Field::Lender)
        .ok_or_else(|| ExhibitError::data_integrity(record.id(), "no lender"))?;
    Ok(match inventory_number(record) {
        Some(num) => format!("Lent by {lender} (inventory number: {num})."),
        None => format!("Lent by {lender}."),
    })
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize whitespace and end with exactly one period.
fn finish(summary: &str) -> String {
    let normalized = normalize_space(summary);
    format!("{}.", normalized.trim_end_matches('.'))
}

#[cfg(test)]
#[path = "tests/summary_tests.rs"]
mod tests;
