use exhibitor_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur while building or exporting a collection.
#[derive(Debug, Error)]
pub enum ExhibitError {
    /// A raw row could not be adapted into a record
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Duplicate identifier inserted without merge permission
    #[error("ID collision in record insertion: there is already a record with id \"{id}\"")]
    Collision { id: String },

    /// A record lacks data needed to derive a field
    #[error("Data integrity error in record \"{id}\": {reason}")]
    DataIntegrity { id: String, reason: String },

    /// Load or dump requested in a format the operation does not support
    #[error("Unsupported format \"{format}\" for {operation}. Supported formats: {supported}")]
    UnsupportedFormat {
        format: String,
        operation: &'static str,
        supported: &'static str,
    },

    /// I/O error on a source or destination
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Malformed delimited file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed or unwritable JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An image file names an identifier that is not in the collection
    #[error("Image {file} names id \"{id}\", which is not in the collection")]
    ImageMismatch { file: String, id: String },

    /// An alt-text row does not line up with the collection
    #[error("Alt text for id \"{id}\": {reason}")]
    AltTextMismatch { id: String, reason: String },

    /// Alt text supplied for a record that has no image
    #[error("Record \"{id}\" has no image to describe")]
    MissingImage { id: String },

    /// A delimited file lacks a required header column
    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },
}

impl ExhibitError {
    pub fn data_integrity(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataIntegrity {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
