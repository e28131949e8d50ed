//! Content type classification
//!
//! Two independent signals: the file name prefix convention of modular
//! documentation, and the `:_content-type:` attribute declared in the file.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::core::file_reader::read_text;
use crate::core::model::ContentType;

/// First `:_content-type:` attribute line of a document
pub static CONTENT_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^:_content-type: (.*)$").expect("Invalid CONTENT_TYPE_RE regex")
});

const PREFIXES: [(&str, ContentType); 4] = [
    ("con_", ContentType::Concept),
    ("proc_", ContentType::Procedure),
    ("ref_", ContentType::Reference),
    ("assembly_", ContentType::Assembly),
];

/// Classify a document by the prefix of its base name
pub fn classify_by_prefix(path: &Path) -> ContentType {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return ContentType::None;
    };

    PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(*prefix))
        .map_or(ContentType::None, |(_, ty)| ty.clone())
}

/// Classify a document by its `:_content-type:` attribute.
///
/// The value is taken verbatim. Unreadable files classify as NONE.
pub fn classify_by_attribute(path: &Path) -> ContentType {
    let content = match read_text(path) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("cannot read {} for content type: {}", path.display(), e);
            return ContentType::None;
        }
    };
    content_type_attribute(&content)
}

/// Extract the content type attribute from document text
pub fn content_type_attribute(content: &str) -> ContentType {
    CONTENT_TYPE_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(ContentType::None, |value| ContentType::from_label(value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prefixes() {
        assert_eq!(classify_by_prefix(Path::new("con_intro.adoc")), ContentType::Concept);
        assert_eq!(
            classify_by_prefix(Path::new("proc_setup.adoc")),
            ContentType::Procedure
        );
        assert_eq!(classify_by_prefix(Path::new("ref_api.adoc")), ContentType::Reference);
        assert_eq!(
            classify_by_prefix(Path::new("assembly_install.adoc")),
            ContentType::Assembly
        );
        assert_eq!(classify_by_prefix(Path::new("intro.adoc")), ContentType::None);
    }

    #[test]
    fn test_prefix_is_anchored_and_case_sensitive() {
        assert_eq!(classify_by_prefix(Path::new("my_con_intro.adoc")), ContentType::None);
        assert_eq!(classify_by_prefix(Path::new("CON_intro.adoc")), ContentType::None);
        assert_eq!(classify_by_prefix(Path::new("con-intro.adoc")), ContentType::None);
    }

    #[test]
    fn test_prefix_uses_base_name_only() {
        assert_eq!(
            classify_by_prefix(Path::new("con_modules/intro.adoc")),
            ContentType::None
        );
        assert_eq!(
            classify_by_prefix(Path::new("a/b/proc_x.adoc")),
            classify_by_prefix(Path::new("other/proc_x.adoc"))
        );
    }

    #[test]
    fn test_attribute_found() {
        let content = "// comment\n:_content-type: PROCEDURE\n[id=\"x\"]\n= Title\n";
        assert_eq!(content_type_attribute(content), ContentType::Procedure);
    }

    #[test]
    fn test_attribute_first_match_wins() {
        let content = ":_content-type: CONCEPT\n\n:_content-type: REFERENCE\n";
        assert_eq!(content_type_attribute(content), ContentType::Concept);
    }

    #[test]
    fn test_attribute_must_start_the_line() {
        let content = "Set  :_content-type: CONCEPT in the header.\n";
        assert_eq!(content_type_attribute(content), ContentType::None);
    }

    #[test]
    fn test_attribute_value_is_verbatim() {
        assert_eq!(
            content_type_attribute(":_content-type: snippet\n"),
            ContentType::Unlisted("snippet".to_string())
        );
        assert_eq!(
            content_type_attribute(":_content-type: PROCEDURE\r\n"),
            ContentType::Unlisted("PROCEDURE\r".to_string())
        );
    }

    #[test]
    fn test_attribute_missing() {
        assert_eq!(content_type_attribute("= Title\n\ntext\n"), ContentType::None);
    }

    #[test]
    fn test_classify_by_attribute_reads_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("intro.adoc");
        fs::write(&path, ":_content-type: ASSEMBLY\n= Intro\n").unwrap();
        assert_eq!(classify_by_attribute(&path), ContentType::Assembly);
    }

    #[test]
    fn test_classify_by_attribute_unreadable_is_none() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(
            classify_by_attribute(&temp.path().join("missing.adoc")),
            ContentType::None
        );
        assert_eq!(classify_by_attribute(temp.path()), ContentType::None);
    }
}
