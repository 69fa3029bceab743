//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "exhibitor")]
#[command(about = "Prepare museum exhibition catalog data for publication", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding curated exhibition data (default: ./catalog)
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Exhibition sub-directory of the catalog (default: ishtar-2019)
    #[arg(short, long, global = true)]
    pub exhibition: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that attach images.
#[derive(Args, Clone, Default)]
pub(crate) struct MediaArgs {
    /// Directory of image files named <anything>_<id>.<ext>
    #[arg(short, long)]
    pub images: Option<PathBuf>,

    /// CSV file with id, alt, and optional image columns
    #[arg(short, long)]
    pub alt: Option<PathBuf>,

    /// Fail on images or alt text that do not match the collection
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert a spreadsheet export to exhibitor JSON, merging duplicate ids
    Convert {
        /// Delimited source file with a header row
        source: PathBuf,

        /// JSON destination ("-" for stdout)
        destination: PathBuf,
    },

    /// Fix titles, assign slugs, synthesize summaries, and attach images
    Prepare {
        /// Exhibitor JSON produced by `convert`
        source: PathBuf,

        /// JSON destination ("-" for stdout)
        destination: PathBuf,

        /// Sentence appended to every summary (default: the exhibition blurb)
        #[arg(long)]
        blurb: Option<String>,

        #[command(flatten)]
        media: MediaArgs,
    },

    /// Reshape prepared JSON into a CMS import payload
    Publish {
        /// Exhibitor JSON produced by `prepare`
        source: PathBuf,

        /// JSON destination ("-" for stdout)
        destination: PathBuf,

        /// Path on the server where the collection will reside
        /// (default: the exhibition's url_path)
        #[arg(short, long)]
        url_path: Option<String>,
    },

    /// List words in text fields that are not known to be correct
    Spelling {
        /// Exhibitor JSON to check
        source: PathBuf,

        /// Text file of additional valid words, one per line
        #[arg(short, long)]
        words: Option<PathBuf>,
    },

    /// Show or locate the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the settings file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "exhibitor",
            "prepare",
            "raw.json",
            "out.json",
            "--images",
            "img",
            "-e",
            "ishtar-2019",
            "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.exhibition.as_deref(), Some("ishtar-2019"));
        match cli.command {
            Commands::Prepare { media, blurb, .. } => {
                assert_eq!(media.images, Some(PathBuf::from("img")));
                assert!(media.alt.is_none());
                assert!(blurb.is_none());
            }
            _ => panic!("Expected prepare"),
        }
    }

    #[test]
    fn publish_url_path_is_optional() {
        let cli = Cli::try_parse_from(["exhibitor", "publish", "in.json", "-", "--url-path", "/ishtar"]).unwrap();
        match cli.command {
            Commands::Publish {
                url_path,
                destination,
                ..
            } => {
                assert_eq!(url_path.as_deref(), Some("/ishtar"));
                assert_eq!(destination, PathBuf::from("-"));
            }
            _ => panic!("Expected publish"),
        }

        let cli = Cli::try_parse_from(["exhibitor", "publish", "in.json", "out.json"]).unwrap();
        match cli.command {
            Commands::Publish { url_path, .. } => assert!(url_path.is_none()),
            _ => panic!("Expected publish"),
        }
        assert!(Cli::try_parse_from(["exhibitor", "publish", "in.json"]).is_err());
    }
}
