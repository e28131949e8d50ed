//! Text file reading
//!
//! Documents are read whole. Non-UTF-8 bytes are replaced rather than
//! rejected, and a leading byte order mark is dropped so that line-anchored
//! patterns still match the first line.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// Read a text file, converting invalid UTF-8 lossily
pub fn read_text(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let content = match String::from_utf8(buffer) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("lossy UTF-8 conversion for {}", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}
