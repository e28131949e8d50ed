//! Line renderer
//!
//! Renders entries as delimited text lines: the enabled optional fields
//! (source file, prefix type, attribute type), each followed by the
//! delimiter, then the resolved path.

use std::io::Write;

use crate::core::model::{Entry, InventoryConfig};

/// Join the enabled field values and the final path into one line
pub fn format_line(fields: &[&str], path: &str, delimiter: &str) -> String {
    let mut line = String::new();
    for field in fields {
        line.push_str(field);
        line.push_str(delimiter);
    }
    line.push_str(path);
    line.push('\n');
    line
}

/// Renderer for inventory entries
pub struct LineFormatter<'a> {
    config: &'a InventoryConfig,
}

impl<'a> LineFormatter<'a> {
    pub fn new(config: &'a InventoryConfig) -> Self {
        Self { config }
    }

    /// Render an entry as a single line, including the terminator
    pub fn format(&self, entry: &Entry) -> String {
        let mut fields: Vec<&str> = Vec::with_capacity(3);

        if self.config.with_filename {
            fields.push(&entry.source);
        }
        if self.config.with_prefix_type {
            fields.push(entry.prefix_type.as_ref().map_or("NONE", |ty| ty.as_str()));
        }
        if self.config.with_attribute_type {
            fields.push(entry.attribute_type.as_ref().map_or("NONE", |ty| ty.as_str()));
        }

        format_line(&fields, &entry.path, &self.config.delimiter)
    }

    /// Render to a writer
    pub fn write_to<W: Write>(&self, entry: &Entry, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.format(entry).as_bytes())
    }
}
