//! Spelling report over the text fields of a collection.
//!
//! Not a spell checker: it lists every word that is neither a permitted
//! word nor shaped like a number or catalog reference, so a proofreader can
//! scan the list.

use std::collections::{BTreeMap, BTreeSet};

use exhibitor_catalog::Field;

use crate::collection::Collection;

/// Fields holding identifiers, file names, or measurements.
const SKIPPED_FIELDS: [Field; 6] = [
    Field::Slug,
    Field::Id,
    Field::InventoryNum,
    Field::Image,
    Field::Date,
    Field::Dimensions,
];

/// Characters treated as word separators besides whitespace.
const SEPARATORS: [char; 16] = [
    ',', ':', '-', '(', ')', '.', '&', '+', '/', '–', '_', ';', '[', ']', '"', '©',
];

const EXCERPT_CHARS: usize = 80;

/// Where an unknown word was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
    pub id: String,
    pub field: Field,
    /// Start of the field value
    pub excerpt: String,
}

/// Unknown words, sorted, each with every place it occurs.
pub fn unknown_words(collection: &Collection, permitted: &BTreeSet<String>) -> BTreeMap<String, Vec<Locus>> {
    let mut words: BTreeMap<String, Vec<Locus>> = BTreeMap::new();

    for record in collection.iter() {
        for (field, value) in record.fields() {
            let Some(value) = value else { continue };
            if SKIPPED_FIELDS.contains(&field) {
                continue;
            }
            for token in tokenize(value) {
                if is_canonical_integer(token) {
                    continue;
                }
                let word = token.to_lowercase();
                if permitted.contains(&word) || is_reference(&word) {
                    continue;
                }
                words.entry(word).or_default().push(Locus {
                    id: record.id().to_string(),
                    field,
                    excerpt: value.chars().take(EXCERPT_CHARS).collect(),
                });
            }
        }
    }

    log::debug!("Found {} unknown words", words.len());
    words
}

fn tokenize(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
}

/// Digits with no leading zero (or a lone zero).
fn is_canonical_integer(token: &str) -> bool {
    !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'))
}

/// Item numbers (`12a`), zero-padded numbers (`0042`), and letter-number
/// references (`a12`, `a12b`).
fn is_reference(word: &str) -> bool {
    let bytes = word.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();

    // 12a, 12ab
    if digits > 0 && digits < bytes.len() && bytes[digits..].iter().all(u8::is_ascii_lowercase) {
        return true;
    }
    // 0042
    if digits == bytes.len() && bytes.len() > 1 && bytes[0] == b'0' {
        return true;
    }
    // a12, a12b
    if let Some((first, rest)) = bytes.split_first() {
        if first.is_ascii_lowercase() {
            let inner = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            let tail = &rest[inner..];
            return inner > 0 && (tail.is_empty() || (tail.len() == 1 && tail[0].is_ascii_lowercase()));
        }
    }
    false
}
