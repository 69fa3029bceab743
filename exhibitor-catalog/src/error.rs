use thiserror::Error;

/// Errors raised while turning raw rows into records.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The raw row is not a mapping of column names to values
    #[error("Unable to adapt row data of type {0}")]
    InvalidInput(&'static str),

    /// A raw value is neither a string nor null
    #[error("Invalid value in column '{column}': expected a string or null, got {kind}")]
    InvalidArgument { column: String, kind: &'static str },

    /// The row's own identifier disagrees with the one supplied by the caller
    #[error("Internal id ({internal}) does not match explicit id ({explicit})")]
    IdentifierConflict { internal: String, explicit: String },

    /// The explicit identifier handed to the adapter is empty
    #[error("Explicit identifier must not be empty")]
    EmptyIdentifier,

    /// An external column name has no crosswalk entry
    #[error("Column '{0}' is not mapped to any schema field")]
    UnknownColumn(String),

    /// A name that is not part of the record schema
    #[error("Unknown schema field: {0}")]
    UnknownField(String),
}

impl CatalogError {
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn(name.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }
}
