use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use exhibitor_catalog::{Crosswalk, ExhibitionInfo};
use exhibitor_import::{Collection, Format, plone_payload, write_json};

use super::{CatalogContext, open_destination, report_written};
use crate::error::CliError;

/// Write the CMS import payload for a prepared collection.
///
/// The exhibition is only loaded when no `url_path` flag was given.
pub(crate) fn run_publish(
    ctx: &CatalogContext,
    source: &Path,
    destination: &Path,
    url_path: Option<String>,
) -> Result<(), CliError> {
    let url_path = match url_path {
        Some(path) => path,
        None => resolve_url_path(None, &ctx.load()?.info)?,
    };

    let mut collection = Collection::new(Crosswalk::identity());
    collection.load(source, Format::Json, false)?;

    let payload = plone_payload(&collection, &url_path)?;
    let mut out = open_destination(destination)?;
    write_json(&mut out, &payload)?;
    out.flush()?;

    log::info!(
        "Published {} items under {}",
        collection.len().if_supports_color(Stdout, |t| t.bold()),
        url_path.if_supports_color(Stdout, |t| t.cyan()),
    );
    report_written(destination);
    Ok(())
}

/// The flag wins over the exhibition's curated `url_path`.
fn resolve_url_path(flag: Option<String>, info: &ExhibitionInfo) -> Result<String, CliError> {
    flag.or_else(|| info.url_path.clone())
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| {
            CliError::config(format!(
                "no url path for exhibition \"{}\"; pass --url-path or set url_path in exhibition.yaml",
                info.name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(url_path: Option<&str>) -> ExhibitionInfo {
        ExhibitionInfo {
            name: "Ishtar Gate".into(),
            url_path: url_path.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn flag_overrides_exhibition() {
        let path = resolve_url_path(Some("/flag".into()), &info(Some("/curated"))).unwrap();
        assert_eq!(path, "/flag");
    }

    #[test]
    fn exhibition_url_path_is_the_default() {
        assert_eq!(resolve_url_path(None, &info(Some("/curated"))).unwrap(), "/curated");
    }

    #[test]
    fn missing_url_path_is_a_config_error() {
        assert!(matches!(resolve_url_path(None, &info(None)), Err(CliError::Config(_))));
        assert!(matches!(resolve_url_path(None, &info(Some("  "))), Err(CliError::Config(_))));
    }
}
