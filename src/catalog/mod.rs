//! Catalog module - Include and image references discovered in a document tree
//!
//! The inventory engine only sees the `CatalogSource` trait. `AsciidocScanner`
//! is the line-oriented implementation used by the binary.

use std::path::{Path, PathBuf};

use crate::core::error::Result;

pub mod attributes;
pub mod scan;

pub use scan::AsciidocScanner;

/// An include directive pointing at a nested document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeReference {
    /// Target as written, without its file extension
    pub target: String,
    /// Directory of the document containing the directive
    pub dir: PathBuf,
}

/// An image macro found in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub target: String,
    /// Value of the `imagesdir` attribute at the point of reference
    pub imagesdir: Option<String>,
    /// Directory the reference resolves against
    pub dir: PathBuf,
}

/// Ordered references for one root document, complete across nesting levels
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub includes: Vec<IncludeReference>,
    pub images: Vec<ImageReference>,
}

/// Produces the catalog for a root document
pub trait CatalogSource {
    fn catalog(&self, root: &Path) -> Result<Catalog>;
}
