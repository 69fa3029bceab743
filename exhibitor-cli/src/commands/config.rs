use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::CatalogContext;
use crate::settings::settings_path;

/// Show resolved settings and where each came from.
pub(crate) fn run_config_show(ctx: &CatalogContext) {
    let path = settings_path();

    log::info!("{}", "Exhibitor Configuration".if_supports_color(Stdout, |t| t.bold()));
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    log::info!(
        "  catalog.dir:        {} {}",
        ctx.catalog_dir.display(),
        format!("({})", ctx.catalog_dir_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  catalog.exhibition: {} {}",
        ctx.exhibition,
        format!("({})", ctx.exhibition_source).if_supports_color(Stdout, |t| t.dimmed()),
    );

    let dir = ctx.exhibition_dir();
    if dir.is_dir() {
        log::info!(
            "  Exhibition data:    {}",
            dir.display().if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::warn!(
            "  Exhibition data:    {} {}",
            dir.display(),
            "(not found)".if_supports_color(Stdout, |t| t.red()),
        );
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
