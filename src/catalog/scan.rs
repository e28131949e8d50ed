//! AsciiDoc catalog scanner
//!
//! Walks a root document line by line, following `include::` directives into
//! nested documents and collecting block `image::` macros, in document order:
//! include::modules/con_intro.adoc[leveloffset=+1]
//! image::diagram.png[Diagram]
//!
//! Inline `image:` macros belong to paragraph text and are not catalogued.
//!
//! Only the preprocessor-level structure is understood: attribute entries,
//! `ifdef`/`ifndef`/`endif`, comments and delimited verbatim blocks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::catalog::attributes::{Attributes, Conditional, ConditionalStack};
use crate::catalog::{Catalog, CatalogSource, ImageReference, IncludeReference};
use crate::core::error::{InventoryError, Result};
use crate::core::file_reader::read_text;
use crate::core::paths::DOCUMENT_EXTENSION;

/// Maximum nesting level of includes unless `max-include-depth` is set
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Include directive: `include::target[attrs]`
pub static INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\\)?include::([^\s\[](?:[^\[]*[^\s\[])?)\[(.+)?\]$")
        .expect("Invalid INCLUDE_RE regex")
});

/// Block image macro: `image::target[attrs]`
pub static BLOCK_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^image::(\S|\S.*?\S)\[(.*)\]$").expect("Invalid BLOCK_IMAGE_RE regex")
});

static URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9.+-]+:/{0,2}").expect("Invalid URI_RE regex"));

static COMMENT_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/{4,}$").expect("Invalid COMMENT_DELIMITER_RE regex"));

static VERBATIM_DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:-{4,}|\.{4,}|\+{4,})$").expect("Invalid VERBATIM_DELIMITER_RE regex")
});

/// Delimited block the scanner is currently inside
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Normal,
    /// Comment block; nothing inside is processed
    Comment(String),
    /// Listing, literal or passthrough block; includes are still expanded
    Verbatim(String),
}

/// Line-oriented `CatalogSource` for AsciiDoc documents
#[derive(Debug, Clone)]
pub struct AsciidocScanner {
    max_depth: usize,
}

impl Default for AsciidocScanner {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl AsciidocScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default include depth limit
    #[allow(dead_code)]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl CatalogSource for AsciidocScanner {
    fn catalog(&self, root: &Path) -> Result<Catalog> {
        let base_dir = parent_dir(root);
        let mut scan = Scan {
            attributes: Attributes::for_document(root),
            catalog: Catalog::default(),
            base_dir,
            max_depth: self.max_depth,
        };
        scan.document(root, 0)?;

        log::debug!(
            "catalog for {}: {} includes, {} images",
            root.display(),
            scan.catalog.includes.len(),
            scan.catalog.images.len()
        );
        Ok(scan.catalog)
    }
}

/// State of one catalog run, shared across nested documents
struct Scan {
    attributes: Attributes,
    catalog: Catalog,
    /// Directory of the root document; images resolve against it
    base_dir: PathBuf,
    max_depth: usize,
}

/// Per-document cursor state
struct Cursor<'a> {
    path: &'a Path,
    dir: &'a Path,
    depth: usize,
    conditionals: ConditionalStack,
    block: Block,
}

impl Scan {
    fn document(&mut self, path: &Path, depth: usize) -> Result<()> {
        let content = read_text(path).map_err(|source| InventoryError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
        let dir = parent_dir(path);
        let mut cursor = Cursor {
            path,
            dir: &dir,
            depth,
            conditionals: ConditionalStack::default(),
            block: Block::Normal,
        };

        for line in content.lines() {
            self.line(line.trim_end(), &mut cursor)?;
        }

        if cursor.conditionals.depth() > 0 {
            log::debug!("unterminated conditional in {}", path.display());
        }
        Ok(())
    }

    fn line(&mut self, line: &str, cursor: &mut Cursor<'_>) -> Result<()> {
        if let Block::Comment(delimiter) = &cursor.block {
            if line == delimiter {
                cursor.block = Block::Normal;
            }
            return Ok(());
        }

        if let Some(conditional) = Conditional::parse(line, &self.attributes) {
            match conditional {
                Conditional::Close => cursor.conditionals.pop(),
                Conditional::Open {
                    active,
                    content: Some(content),
                } => {
                    if active && cursor.conditionals.active() {
                        self.line(content, cursor)?;
                    }
                }
                Conditional::Open {
                    active,
                    content: None,
                } => cursor.conditionals.push(active),
            }
            return Ok(());
        }

        if !cursor.conditionals.active() {
            return Ok(());
        }

        if let Some(caps) = INCLUDE_RE.captures(line) {
            if caps.get(1).is_none() {
                return self.include(&caps[2], cursor);
            }
        }

        if let Block::Verbatim(delimiter) = &cursor.block {
            if line == delimiter {
                cursor.block = Block::Normal;
            }
            return Ok(());
        }

        if COMMENT_DELIMITER_RE.is_match(line) {
            cursor.block = Block::Comment(line.to_string());
            return Ok(());
        }
        if VERBATIM_DELIMITER_RE.is_match(line) {
            cursor.block = Block::Verbatim(line.to_string());
            return Ok(());
        }
        if line.starts_with("//") {
            return Ok(());
        }

        if self.attributes.apply_entry(line) {
            return Ok(());
        }

        if let Some(caps) = BLOCK_IMAGE_RE.captures(line) {
            self.image(&caps[1]);
        }

        Ok(())
    }

    fn include(&mut self, raw_target: &str, cursor: &Cursor<'_>) -> Result<()> {
        let target = match self.attributes.substitute(raw_target) {
            Ok(target) => target,
            Err(missing) => {
                log::warn!(
                    "dropping include in {} with reference to missing attribute: {}",
                    cursor.path.display(),
                    missing
                );
                return Ok(());
            }
        };

        if URI_RE.is_match(&target) {
            log::warn!("skipping URI include in {}: {}", cursor.path.display(), target);
            return Ok(());
        }

        let Some(stem) = strip_document_extension(&target) else {
            if has_asciidoc_extension(&target) {
                log::warn!(
                    "not following {} from {}: only .{} includes are listed",
                    target,
                    cursor.path.display(),
                    DOCUMENT_EXTENSION
                );
            } else {
                log::debug!("not a document include, skipping: {}", target);
            }
            return Ok(());
        };

        let max_depth = self
            .attributes
            .get("max-include-depth")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(self.max_depth);
        if cursor.depth + 1 > max_depth {
            log::warn!(
                "maximum include depth of {} exceeded in {}, not following {}",
                max_depth,
                cursor.path.display(),
                target
            );
            return Ok(());
        }

        let nested = cursor.dir.join(&target);
        if !nested.is_file() {
            return Err(InventoryError::MissingInclude {
                target: nested,
                parent: cursor.path.to_path_buf(),
            });
        }

        log::debug!("include {} from {}", target, cursor.path.display());
        self.catalog.includes.push(IncludeReference {
            target: stem.to_string(),
            dir: cursor.dir.to_path_buf(),
        });
        self.document(&nested, cursor.depth + 1)
    }

    fn image(&mut self, raw_target: &str) {
        let target = match self.attributes.substitute(raw_target) {
            Ok(target) => target,
            Err(missing) => {
                log::warn!(
                    "dropping image with reference to missing attribute {}: {}",
                    missing,
                    raw_target
                );
                return;
            }
        };

        if URI_RE.is_match(&target) {
            log::debug!("skipping remote image: {}", target);
            return;
        }

        self.catalog.images.push(ImageReference {
            target,
            imagesdir: self.attributes.get("imagesdir").map(str::to_string),
            dir: self.base_dir.clone(),
        });
    }
}

/// Strip the document extension, or None if the target is not a document
fn strip_document_extension(target: &str) -> Option<&str> {
    let stem = target.strip_suffix(DOCUMENT_EXTENSION)?.strip_suffix('.')?;
    let name_start = stem.rfind('/').map_or(0, |i| i + 1);
    if stem[name_start..].is_empty() {
        return None;
    }
    Some(stem)
}

/// AsciiDoc extensions other than the listed document extension
const OTHER_ASCIIDOC_EXTENSIONS: [&str; 3] = ["asciidoc", "asc", "ad"];

fn has_asciidoc_extension(target: &str) -> bool {
    Path::new(target)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| OTHER_ASCIIDOC_EXTENSIONS.contains(&ext))
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
