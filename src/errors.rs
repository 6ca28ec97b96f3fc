use thiserror::Error;

/// Errors raised by the product catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// Input that cannot be turned into a valid product, or an operation that
    /// needs a persisted product but was given one without an id.
    #[error("Data validation error: {message}")]
    DataValidation {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Details about the failure
        message: String,
    },

    /// Filesystem failure while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store errors are passed through untranslated.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
