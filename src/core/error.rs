//! Error types shared by the catalog scanner and the inventory engine

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum InventoryError {
    /// A root file or the base directory failed validation before any catalog was read
    #[error("{0}")]
    Invocation(String),

    /// An include or image target could not be canonicalized
    #[error("Cannot resolve '{target}' from {}", dir.display())]
    Resolve {
        target: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document tree could not be read while building the catalog
    #[error("Cannot read document {}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A nested include points at a document that does not exist
    #[error("Include file not found: {} (included from {})", target.display(), parent.display())]
    MissingInclude { target: PathBuf, parent: PathBuf },

    #[error("Cannot write output")]
    Output {
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    pub fn invocation(message: impl Into<String>) -> Self {
        InventoryError::Invocation(message.into())
    }
}
