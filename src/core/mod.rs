//! Core module - Data model, paths, rendering and shared utilities
//!
//! This module provides:
//! - The entry model produced by the walker (Entry, ContentType)
//! - The typed error taxonomy
//! - Path resolution against the base directory
//! - Line rendering for the delimited output
//! - Text file reading

pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
