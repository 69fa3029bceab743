use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use exhibitor_catalog::Crosswalk;
use exhibitor_import::{Collection, Format, unknown_words};

use super::CatalogContext;
use crate::error::CliError;

/// Print every unknown word with the places it occurs.
pub(crate) fn run_spelling(ctx: &CatalogContext, source: &Path, words: Option<&Path>) -> Result<(), CliError> {
    let exhibition = ctx.load()?;
    let mut permitted = exhibition.permitted_words;
    if let Some(path) = words {
        let contents = std::fs::read_to_string(path)?;
        permitted.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase),
        );
    }

    let mut collection = Collection::new(Crosswalk::identity());
    collection.load(source, Format::Json, false)?;

    let report = unknown_words(&collection, &permitted);
    for (word, loci) in &report {
        println!("{}", word.if_supports_color(Stdout, |t| t.bold()));
        for locus in loci {
            println!(
                "\t{}[{}]: {}",
                locus.id.if_supports_color(Stdout, |t| t.cyan()),
                locus.field,
                locus.excerpt,
            );
        }
    }
    log::info!("{} unknown words in {} records", report.len(), collection.len());
    Ok(())
}
