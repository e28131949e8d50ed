//! Catalog walker
//!
//! Turns one root document's catalog into a lazy sequence of resolved and
//! classified entries: includes first, then images when requested. Every
//! catalog entry yields one item, duplicates included.

use std::vec;

use crate::catalog::{CatalogSource, ImageReference, IncludeReference};
use crate::core::error::Result;
use crate::core::model::{ContentType, Entry, InventoryConfig, ReferenceKind, RootDocument};
use crate::core::paths::resolve;
use crate::inventory::classify::{classify_by_attribute, classify_by_prefix};

/// Single-pass iterator over a root document's entries
pub struct Walk<'a> {
    root: &'a RootDocument,
    config: &'a InventoryConfig,
    includes: vec::IntoIter<IncludeReference>,
    images: vec::IntoIter<ImageReference>,
}

/// Build the catalog for `root` once and walk it
pub fn walk<'a, S>(
    source: &S,
    root: &'a RootDocument,
    config: &'a InventoryConfig,
) -> Result<Walk<'a>>
where
    S: CatalogSource + ?Sized,
{
    let catalog = source.catalog(&root.path)?;
    let images = if config.images {
        catalog.images
    } else {
        Vec::new()
    };

    Ok(Walk {
        root,
        config,
        includes: catalog.includes.into_iter(),
        images: images.into_iter(),
    })
}

impl Walk<'_> {
    fn include(&self, reference: IncludeReference) -> Result<Entry> {
        let resolved = resolve(
            &reference.target,
            &reference.dir,
            &self.config.base,
            ReferenceKind::Include,
            None,
        )?;

        let prefix_type = self
            .config
            .with_prefix_type
            .then(|| classify_by_prefix(&resolved.canonical));
        let attribute_type = self
            .config
            .with_attribute_type
            .then(|| classify_by_attribute(&resolved.canonical));

        Ok(Entry {
            kind: ReferenceKind::Include,
            source: self.root.display.clone(),
            path: resolved.relative,
            prefix_type,
            attribute_type,
        })
    }

    fn image(&self, reference: ImageReference) -> Result<Entry> {
        let resolved = resolve(
            &reference.target,
            &reference.dir,
            &self.config.base,
            ReferenceKind::Image,
            reference.imagesdir.as_deref(),
        )?;

        Ok(Entry {
            kind: ReferenceKind::Image,
            source: self.root.display.clone(),
            path: resolved.relative,
            prefix_type: self.config.with_prefix_type.then_some(ContentType::Image),
            attribute_type: self.config.with_attribute_type.then_some(ContentType::Image),
        })
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(reference) = self.includes.next() {
            return Some(self.include(reference));
        }
        self.images.next().map(|reference| self.image(reference))
    }
}
