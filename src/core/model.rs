//! Inventory Model
//!
//! Every reference discovered in a document tree is mapped to an Entry
//! before it is rendered as an output line.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::error::{InventoryError, Result};
use crate::core::paths::make_relative;

/// Default field delimiter
pub const DEFAULT_DELIMITER: &str = ": ";

/// Content type label derived for a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Concept,
    Procedure,
    Reference,
    Assembly,
    Image,
    None,
    /// Attribute value outside the fixed label set, kept verbatim
    Unlisted(String),
}

impl ContentType {
    /// Map an attribute value onto the label set without normalizing it.
    ///
    /// Matching is exact, so `procedure` stays `Unlisted("procedure")`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "CONCEPT" => ContentType::Concept,
            "PROCEDURE" => ContentType::Procedure,
            "REFERENCE" => ContentType::Reference,
            "ASSEMBLY" => ContentType::Assembly,
            "IMAGE" => ContentType::Image,
            "NONE" => ContentType::None,
            other => ContentType::Unlisted(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Concept => "CONCEPT",
            ContentType::Procedure => "PROCEDURE",
            ContentType::Reference => "REFERENCE",
            ContentType::Assembly => "ASSEMBLY",
            ContentType::Image => "IMAGE",
            ContentType::None => "NONE",
            ContentType::Unlisted(value) => value,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of reference an entry was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Include,
    Image,
}

/// Immutable run configuration, built once from the command line
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Canonical directory all output paths are relative to
    pub base: PathBuf,
    /// List image references after the includes
    pub images: bool,
    pub with_filename: bool,
    pub with_prefix_type: bool,
    pub with_attribute_type: bool,
    pub delimiter: String,
}

impl InventoryConfig {
    /// Create a config with every optional field disabled
    pub fn new(base: PathBuf) -> Self {
        Self {
            base,
            images: false,
            with_filename: false,
            with_prefix_type: false,
            with_attribute_type: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Validate a user-supplied base directory and build a config around it
    pub fn relative_to(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            return Err(InventoryError::invocation(format!(
                "Directory does not exist: {}",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(InventoryError::invocation(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }
        let base = dir.canonicalize().map_err(|e| {
            InventoryError::invocation(format!("Cannot access directory {}: {}", dir.display(), e))
        })?;
        Ok(Self::new(base))
    }
}

/// A root document supplied on the command line
#[derive(Debug, Clone)]
pub struct RootDocument {
    /// Canonical absolute path
    pub path: PathBuf,
    /// Directory containing the document
    pub dir: PathBuf,
    /// Path relative to the base directory, as printed by --with-filename
    pub display: String,
}

impl RootDocument {
    /// Validate a root file and resolve it against the base directory
    pub fn open(file: &Path, base: &Path) -> Result<Self> {
        if !file.exists() {
            return Err(InventoryError::invocation(format!(
                "File does not exist: {}",
                file.display()
            )));
        }
        if !file.is_file() {
            return Err(InventoryError::invocation(format!(
                "Not a file: {}",
                file.display()
            )));
        }
        if File::open(file).is_err() {
            return Err(InventoryError::invocation(format!(
                "File not readable: {}",
                file.display()
            )));
        }

        let path = file.canonicalize().map_err(|e| {
            InventoryError::invocation(format!("Cannot access file {}: {}", file.display(), e))
        })?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let display = make_relative(&path, base);

        Ok(Self { path, dir, display })
    }
}

/// One resolved and classified reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: ReferenceKind,
    /// Root document path relative to the base
    pub source: String,
    /// Resolved target path relative to the base
    pub path: String,
    pub prefix_type: Option<ContentType>,
    pub attribute_type: Option<ContentType>,
}
