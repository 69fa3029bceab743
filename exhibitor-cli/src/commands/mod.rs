pub(crate) mod config;
pub(crate) mod convert;
pub(crate) mod prepare;
pub(crate) mod publish;
pub(crate) mod spelling;

use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use exhibitor_catalog::{Exhibition, load_exhibition};
use exhibitor_import::{Collection, DEFAULT_DELIMITER};

use crate::error::CliError;
use crate::settings::{Settings, Source};

/// Catalog location resolved from flags and settings.
pub(crate) struct CatalogContext {
    pub catalog_dir: PathBuf,
    pub catalog_dir_source: Source,
    pub exhibition: String,
    pub exhibition_source: Source,
}

impl CatalogContext {
    pub(crate) fn resolve(settings: &Settings, catalog_dir: Option<PathBuf>, exhibition: Option<String>) -> Self {
        let (catalog_dir, catalog_dir_source) = settings.resolve_catalog_dir(catalog_dir);
        let (exhibition, exhibition_source) = settings.resolve_exhibition(exhibition);
        Self {
            catalog_dir,
            catalog_dir_source,
            exhibition,
            exhibition_source,
        }
    }

    pub(crate) fn exhibition_dir(&self) -> PathBuf {
        self.catalog_dir.join(&self.exhibition)
    }

    /// Load the curated data for the selected exhibition.
    pub(crate) fn load(&self) -> Result<Exhibition, CliError> {
        let dir = self.exhibition_dir();
        let exhibition = load_exhibition(&dir)?;
        log::debug!(
            "Loaded exhibition \"{}\" from {}: {} title fix-ups, {} slug overrides, {} summary overrides",
            exhibition.info.name,
            dir.display(),
            exhibition.fixups.titles.len(),
            exhibition.fixups.slugs.len(),
            exhibition.fixups.summaries.len(),
        );
        Ok(exhibition)
    }
}

/// The merge delimiter curated for an exhibition.
pub(crate) fn delimiter(exhibition: &Exhibition) -> &str {
    exhibition.info.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER)
}

/// Open a destination for writing; `-` is stdout.
pub(crate) fn open_destination(path: &Path) -> Result<Box<dyn Write>, CliError> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(std::io::stdout().lock()));
    }
    let file = std::fs::File::create(path)?;
    Ok(Box::new(std::io::BufWriter::new(file)))
}

/// Report where results went, unless they went to stdout.
pub(crate) fn report_written(path: &Path) {
    if path.as_os_str() == "-" {
        return;
    }
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    log::info!(
        "Results written to {}",
        shown.display().if_supports_color(Stdout, |t| t.cyan()),
    );
}

/// Warn about every record still missing a required field.
pub(crate) fn warn_incomplete(collection: &Collection) {
    for (id, missing) in collection.incomplete() {
        let names: Vec<_> = missing.iter().map(|f| f.as_str()).collect();
        log::warn!(
            "  {} Record \"{}\" is missing {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            id,
            names.join(", "),
        );
    }
}
