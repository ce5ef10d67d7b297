use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures a catalog operation can report back to the caller. Loading never
/// produces one of these: a broken data file degrades to an empty library.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required text field was left empty on add. The library is untouched.
    #[error("Please fill all fields.")]
    MissingField { field: &'static str },

    #[error("failed to create data directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write library file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode library")]
    Serialize(#[from] serde_json::Error),
}

impl CatalogError {
    /// True for input problems the user can fix from the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::MissingField { .. })
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
