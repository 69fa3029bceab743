use exhibitor_catalog::YamlError;
use exhibitor_import::ExhibitError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Pipeline fault
    #[error(transparent)]
    Exhibit(#[from] ExhibitError),

    /// Curated exhibition data could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] YamlError),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
