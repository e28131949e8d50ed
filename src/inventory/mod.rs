//! Inventory module - Resolves, classifies and prints catalog entries
//!
//! Root documents are processed in order; each entry is written as soon as
//! it is resolved, so output before a fatal error is kept.

use std::io::Write;

use crate::catalog::CatalogSource;
use crate::core::error::{InventoryError, Result};
use crate::core::model::{InventoryConfig, RootDocument};
use crate::core::render::LineFormatter;

pub mod classify;
pub mod walk;

/// Write one line per catalog entry of every root document
pub fn write_inventory<S, W>(
    source: &S,
    roots: &[RootDocument],
    config: &InventoryConfig,
    mut writer: W,
) -> Result<usize>
where
    S: CatalogSource + ?Sized,
    W: Write,
{
    let formatter = LineFormatter::new(config);
    let mut count = 0;

    for root in roots {
        log::debug!("listing content of {} in {}", root.display, root.dir.display());
        for entry in walk::walk(source, root, config)? {
            let entry = entry?;
            log::trace!("{:?} {}", entry.kind, entry.path);
            formatter
                .write_to(&entry, &mut writer)
                .map_err(|source| InventoryError::Output { source })?;
            count += 1;
        }
    }

    writer
        .flush()
        .map_err(|source| InventoryError::Output { source })?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AsciidocScanner;
    use std::fs;
    use std::path::Path;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_write_inventory_multiple_roots_in_order() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().canonicalize().unwrap();
        write_file(&base.join("a/book.adoc"), "include::con_a.adoc[]\n");
        write_file(&base.join("a/con_a.adoc"), "A\n");
        write_file(&base.join("b/book.adoc"), "include::proc_b.adoc[]\n");
        write_file(&base.join("b/proc_b.adoc"), ":_content-type: PROCEDURE\n");

        let roots = vec![
            RootDocument::open(&base.join("b/book.adoc"), &base).unwrap(),
            RootDocument::open(&base.join("a/book.adoc"), &base).unwrap(),
        ];
        let mut config = InventoryConfig::new(base.clone());
        config.with_filename = true;
        config.with_attribute_type = true;
        config.delimiter = ",".to_string();

        let mut out = Vec::new();
        let count = write_inventory(&AsciidocScanner::new(), &roots, &config, &mut out).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "b/book.adoc,PROCEDURE,b/proc_b.adoc\na/book.adoc,NONE,a/con_a.adoc\n"
        );
    }

    #[test]
    fn test_write_inventory_keeps_output_before_failure() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path().canonicalize().unwrap();
        write_file(&base.join("good.adoc"), "include::con_a.adoc[]\n");
        write_file(&base.join("con_a.adoc"), "A\n");
        write_file(&base.join("bad.adoc"), "include::con_missing.adoc[]\n");

        let roots = vec![
            RootDocument::open(&base.join("good.adoc"), &base).unwrap(),
            RootDocument::open(&base.join("bad.adoc"), &base).unwrap(),
        ];
        let config = InventoryConfig::new(base.clone());

        let mut out = Vec::new();
        let err = write_inventory(&AsciidocScanner::new(), &roots, &config, &mut out).unwrap_err();
        assert!(matches!(err, InventoryError::MissingInclude { .. }));
        assert_eq!(String::from_utf8(out).unwrap(), "con_a.adoc\n");
    }
}
