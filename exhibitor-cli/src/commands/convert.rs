use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use exhibitor_catalog::Crosswalk;
use exhibitor_import::{Collection, Format};

use super::{CatalogContext, delimiter, open_destination, report_written, warn_incomplete};
use crate::error::CliError;

/// Convert a spreadsheet export to exhibitor JSON.
///
/// Rows sharing an identifier are merged, each merge logged as a warning.
pub(crate) fn run_convert(ctx: &CatalogContext, source: &Path, destination: &Path) -> Result<(), CliError> {
    let exhibition = ctx.load()?;
    let crosswalk = exhibition.crosswalk();
    report_id_column(&crosswalk);
    let mut collection = Collection::new(crosswalk).with_delimiter(delimiter(&exhibition));

    let rows = collection.load(source, Format::Csv, true)?;
    log::info!(
        "Read {} rows from {} into {} records",
        rows,
        source.display().if_supports_color(Stdout, |t| t.cyan()),
        collection.len().if_supports_color(Stdout, |t| t.bold()),
    );
    warn_incomplete(&collection);

    let mut out = open_destination(destination)?;
    collection.dump(&mut out, Format::Json)?;
    out.flush()?;
    report_written(destination);
    Ok(())
}

/// Log which column supplies identifiers. Without one every row gets a
/// generated identifier and no rows merge.
fn report_id_column(crosswalk: &Crosswalk) -> Option<&str> {
    let column = crosswalk.id_column();
    match column {
        Some(column) => log::debug!("Identifiers read from column \"{column}\""),
        None => log::warn!("The crosswalk maps no column to id; rows will not be merged"),
    }
    column
}
