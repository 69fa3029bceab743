//! URL slug generation.
//!
//! Slugs are published URLs, so the derivation and the collision suffixes
//! must stay stable from run to run: the first record to claim a slug keeps
//! it bare, later ones get `-b`, `-c`, ... in collection order.

use std::collections::BTreeMap;

use exhibitor_catalog::{Field, normalize_space};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::collection::Collection;
use crate::error::ExhibitError;

/// Characters that end the part of a title used for its slug.
const SLUG_BREAKS: [char; 5] = [':', '(', '.', ';', ','];

/// Words dropped from slugs (first occurrence of each).
const STOP_WORDS: [&str; 3] = ["of", "with", "from"];

/// Convert a string to a lowercase ASCII URL slug.
///
/// Accented letters lose their marks, every other run of non-alphanumeric
/// characters becomes a single hyphen.
///
/// ```
/// use exhibitor_import::slugify;
///
/// assert_eq!(slugify("Mušhuššu Dragon"), "mushussu-dragon");
/// assert_eq!(slugify("Throne room façade"), "throne-room-facade");
/// assert_eq!(slugify("  Dog's paw  "), "dog-s-paw");
/// ```
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_separator = false;

    for c in s.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if let Some(ascii) = transliterate(c) {
            result.push_str(ascii);
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push('-');
            last_was_separator = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// ASCII spellings for letters that do not decompose.
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ø' | 'Ø' => "o",
        'đ' | 'Đ' | 'ð' | 'Ð' => "d",
        'ł' | 'Ł' => "l",
        'þ' | 'Þ' => "th",
        'ı' => "i",
        _ => return None,
    };
    Some(ascii)
}

/// Derive the unsuffixed slug for a title.
///
/// The title is cut at the first of `: ( . ; ,`, the stop-words `of`,
/// `with`, and `from` lose their first occurrence, and the rest is
/// slugified. Leading segments with nothing to slugify (as in
/// `"(Untitled) bowl"`) are skipped, so only a title without any letters or
/// digits yields an empty slug.
///
/// ```
/// use exhibitor_import::base_slug;
///
/// assert_eq!(base_slug("Bowl with Bulls"), "bowl-bulls");
/// assert_eq!(base_slug("Stamp Seal (modern impression)"), "stamp-seal");
/// assert_eq!(base_slug("Crate of bricks from Babylon: shipping"), "crate-bricks-babylon");
/// assert_eq!(base_slug("(Untitled) bowl"), "untitled-bowl");
/// ```
pub fn base_slug(title: &str) -> String {
    let mut rest = title;
    while let Some(i) = rest.find(SLUG_BREAKS) {
        if !slugify(&rest[..i]).is_empty() {
            break;
        }
        rest = &rest[i + 1..];
    }
    let head = rest.find(SLUG_BREAKS).map_or(rest, |i| &rest[..i]);
    let head = normalize_space(head);
    let mut words: Vec<&str> = head.split(' ').collect();
    for stop in STOP_WORDS {
        if let Some(pos) = words.iter().position(|w| *w == stop) {
            words.remove(pos);
        }
    }
    slugify(&words.join(" "))
}

/// Letter suffix for the `count`-th repeat of a slug (1 -> `b`, 2 -> `c`,
/// 26 -> `aa`).
fn collision_suffix(count: usize) -> String {
    let mut n = count + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Assign a unique slug to every record, in collection order.
///
/// A slug override from `overrides` wins over the title-derived slug; both
/// take part in collision counting. Claimed slugs are remembered on the
/// collection, so a second call without
/// [`Collection::reset_slug_counts`] suffixes everything again.
///
/// Fails without touching any record when a record has neither an override
/// nor a title with any letters or digits.
pub fn make_slugs(collection: &mut Collection, overrides: &BTreeMap<String, String>) -> Result<usize, ExhibitError> {
    let mut counts = collection.slug_counts_mut().clone();
    let mut assigned = Vec::with_capacity(collection.len());

    for record in collection.iter() {
        let base = match overrides.get(record.id()) {
            Some(slug) => slug.clone(),
            None => {
                let title = record.get(Field::Title).ok_or_else(|| {
                    ExhibitError::data_integrity(record.id(), "no title to derive a slug from")
                })?;
                let slug = base_slug(title);
                if slug.is_empty() {
                    return Err(ExhibitError::data_integrity(
                        record.id(),
                        format!("title \"{title}\" yields an empty slug"),
                    ));
                }
                slug
            }
        };

        let slug = match counts.get(&base).copied().unwrap_or(0) {
            0 => {
                counts.insert(base.clone(), 1);
                base
            }
            claimed => {
                let mut n = claimed;
                let candidate = loop {
                    let candidate = format!("{base}-{}", collision_suffix(n));
                    n += 1;
                    if !counts.contains_key(&candidate) {
                        break candidate;
                    }
                };
                log::debug!("Slug \"{base}\" already claimed; using \"{candidate}\" for {}", record.id());
                counts.insert(base, n);
                counts.insert(candidate.clone(), 1);
                candidate
            }
        };
        assigned.push(slug);
    }

    let total = assigned.len();
    for (record, slug) in collection.records_mut().zip(assigned) {
        record.set(Field::Slug, Some(slug));
    }
    *collection.slug_counts_mut() = counts;
    Ok(total)
}
