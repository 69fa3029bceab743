//! exhibitor CLI
//!
//! Command-line interface for converting, preparing, and publishing
//! exhibition catalog data.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};

use cli_types::{Cli, Commands, ConfigAction};
use commands::CatalogContext;
use error::CliError;
use settings::{Settings, settings_path};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(&settings_path())?;
    let ctx = CatalogContext::resolve(&settings, cli.catalog_dir, cli.exhibition);

    match cli.command {
        Commands::Convert { source, destination } => {
            commands::convert::run_convert(&ctx, &source, &destination)
        }
        Commands::Prepare {
            source,
            destination,
            blurb,
            media,
        } => commands::prepare::run_prepare(&ctx, &source, &destination, blurb, media),
        Commands::Publish {
            source,
            destination,
            url_path,
        } => commands::publish::run_publish(&ctx, &source, &destination, url_path),
        Commands::Spelling { source, words } => {
            commands::spelling::run_spelling(&ctx, &source, words.as_deref())
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::run_config_show(&ctx),
                ConfigAction::Path => commands::config::run_config_path(),
            }
            Ok(())
        }
    }
}

/// Install the logger. `RUST_LOG` overrides the flag-derived level.
///
/// Info lines are user-facing output and print bare; other levels carry a
/// prefix.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Warn => writeln!(buf, "warning: {}", record.args()),
            Level::Error => writeln!(buf, "error: {}", record.args()),
            level => writeln!(
                buf,
                "[{} {}] {}",
                level.as_str().to_lowercase(),
                record.target(),
                record.args()
            ),
        })
        .init();
}
