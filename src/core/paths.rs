//! Path resolution utilities
//!
//! All output paths are canonical, use '/' as separator and are relative to
//! the run's base directory.

use std::path::{Path, PathBuf};

use crate::core::error::{InventoryError, Result};
use crate::core::model::ReferenceKind;

/// Extension appended to extension-less include targets
pub const DOCUMENT_EXTENSION: &str = "adoc";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Express a path relative to the base directory.
///
/// Unlike a prefix strip, this climbs out of the base with `..` when needed.
pub fn make_relative(path: &Path, base: &Path) -> String {
    match pathdiff::diff_paths(path, base) {
        Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Some(relative) => normalize_path(&relative),
        None => normalize_path(path),
    }
}

/// Build the on-disk candidate for a reference before canonicalization
pub fn candidate_path(
    target: &str,
    containing_dir: &Path,
    kind: ReferenceKind,
    image_dir: Option<&str>,
) -> PathBuf {
    match kind {
        ReferenceKind::Include => {
            containing_dir.join(format!("{}.{}", target, DOCUMENT_EXTENSION))
        }
        ReferenceKind::Image => containing_dir.join(image_dir.unwrap_or("")).join(target),
    }
}

/// A reference resolved on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute, symlink-free path
    pub canonical: PathBuf,
    /// Canonical path expressed relative to the base directory
    pub relative: String,
}

/// Resolve a reference to a canonical path relative to `base`
pub fn resolve(
    target: &str,
    containing_dir: &Path,
    base: &Path,
    kind: ReferenceKind,
    image_dir: Option<&str>,
) -> Result<ResolvedPath> {
    let candidate = candidate_path(target, containing_dir, kind, image_dir);
    let canonical = candidate
        .canonicalize()
        .map_err(|source| InventoryError::Resolve {
            target: normalize_path(&candidate_relative(&candidate, containing_dir)),
            dir: containing_dir.to_path_buf(),
            source,
        })?;

    log::debug!("resolved {} -> {}", target, canonical.display());
    let relative = make_relative(&canonical, base);
    Ok(ResolvedPath {
        canonical,
        relative,
    })
}

fn candidate_relative(candidate: &Path, containing_dir: &Path) -> PathBuf {
    candidate
        .strip_prefix(containing_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| candidate.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn canonical_tempdir() -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().canonicalize().unwrap();
        (temp, root)
    }

    #[test]
    fn test_normalize_path() {
        let path = Path::new("modules/con_intro.adoc");
        assert_eq!(normalize_path(path), "modules/con_intro.adoc");
    }

    #[test]
    fn test_make_relative_under_base() {
        let base = Path::new("/project");
        let path = Path::new("/project/modules/con_intro.adoc");
        assert_eq!(make_relative(path, base), "modules/con_intro.adoc");
    }

    #[test]
    fn test_make_relative_outside_base() {
        let base = Path::new("/project/guide");
        let path = Path::new("/project/modules/con_intro.adoc");
        assert_eq!(make_relative(path, base), "../modules/con_intro.adoc");
    }

    #[test]
    fn test_make_relative_same_as_base() {
        let base = Path::new("/project");
        assert_eq!(make_relative(Path::new("/project"), base), ".");
    }

    #[test]
    fn test_candidate_path_include_appends_extension() {
        let dir = Path::new("/book");
        let candidate = candidate_path("modules/proc_setup", dir, ReferenceKind::Include, None);
        assert_eq!(candidate, PathBuf::from("/book/modules/proc_setup.adoc"));
    }

    #[test]
    fn test_candidate_path_image_with_and_without_imagesdir() {
        let dir = Path::new("/book");
        assert_eq!(
            candidate_path("diagram.png", dir, ReferenceKind::Image, Some("images")),
            PathBuf::from("/book/images/diagram.png")
        );
        assert_eq!(
            candidate_path("diagram.png", dir, ReferenceKind::Image, None),
            PathBuf::from("/book/diagram.png")
        );
    }

    #[test]
    fn test_resolve_include() {
        let (_temp, root) = canonical_tempdir();
        fs::create_dir(root.join("modules")).unwrap();
        fs::write(root.join("modules/con_intro.adoc"), "text").unwrap();

        let resolved =
            resolve("modules/con_intro", &root, &root, ReferenceKind::Include, None).unwrap();
        assert_eq!(resolved.relative, "modules/con_intro.adoc");
        assert_eq!(resolved.canonical, root.join("modules/con_intro.adoc"));
    }

    #[test]
    fn test_resolve_collapses_parent_segments() {
        let (_temp, root) = canonical_tempdir();
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::create_dir_all(root.join("modules")).unwrap();
        fs::write(root.join("modules/ref_opts.adoc"), "text").unwrap();

        let resolved = resolve(
            "../modules/./ref_opts",
            &root.join("guide"),
            &root,
            ReferenceKind::Include,
            None,
        )
        .unwrap();
        assert_eq!(resolved.relative, "modules/ref_opts.adoc");
    }

    #[test]
    fn test_resolve_relative_to_sibling_base() {
        let (_temp, root) = canonical_tempdir();
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::create_dir_all(root.join("modules")).unwrap();
        fs::write(root.join("modules/con_a.adoc"), "text").unwrap();

        let resolved = resolve(
            "modules/con_a",
            &root,
            &root.join("guide"),
            ReferenceKind::Include,
            None,
        )
        .unwrap();
        assert_eq!(resolved.relative, "../modules/con_a.adoc");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_follows_symlinks() {
        let (_temp, root) = canonical_tempdir();
        fs::create_dir_all(root.join("shared")).unwrap();
        fs::write(root.join("shared/con_common.adoc"), "text").unwrap();
        std::os::unix::fs::symlink(root.join("shared"), root.join("modules")).unwrap();

        let resolved =
            resolve("modules/con_common", &root, &root, ReferenceKind::Include, None).unwrap();
        assert_eq!(resolved.relative, "shared/con_common.adoc");
    }

    #[test]
    fn test_resolve_image() {
        let (_temp, root) = canonical_tempdir();
        fs::create_dir(root.join("images")).unwrap();
        fs::write(root.join("images/diagram.png"), [0u8; 4]).unwrap();

        let resolved = resolve(
            "diagram.png",
            &root,
            &root,
            ReferenceKind::Image,
            Some("images"),
        )
        .unwrap();
        assert_eq!(resolved.relative, "images/diagram.png");
    }

    #[test]
    fn test_resolve_missing_target_fails() {
        let (_temp, root) = canonical_tempdir();
        let err = resolve("con_missing", &root, &root, ReferenceKind::Include, None).unwrap_err();
        assert!(matches!(err, InventoryError::Resolve { .. }));
        assert!(err.to_string().contains("con_missing.adoc"));
    }
}
