//! Filesystem attribute tier: metadata and name only, never content.
//!
//! This is the cheapest tier and runs first. It resolves special files,
//! empty files, and extension mappings; anything else is a no-match for the
//! byte-reading tiers to pick up.

use std::fs::Metadata;
use tracing::debug;

use crate::builtin::EXTENSION_LABELS;
use crate::error::{Error, Result};
use crate::report::{FileType, Tier};
use crate::tier::{ClassificationRequest, Classifier};

/// Metadata- and name-based classification.
#[derive(Debug, Default)]
pub struct FilesystemClassifier;

impl FilesystemClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Label for non-regular file kinds, if the metadata describes one.
    fn special_kind(metadata: &Metadata) -> Option<&'static str> {
        let ft = metadata.file_type();
        if ft.is_symlink() {
            return Some("symbolic link");
        }
        if ft.is_dir() {
            return Some("directory");
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if ft.is_block_device() {
                return Some("block device");
            }
            if ft.is_char_device() {
                return Some("character device");
            }
            if ft.is_fifo() {
                return Some("named pipe");
            }
            if ft.is_socket() {
                return Some("socket");
            }
        }
        None
    }

    /// Case-insensitive extension lookup; the longest matching suffix wins
    /// (`.tar.gz` beats `.gz`).
    fn extension_label(file_name: &str) -> Option<&'static str> {
        let lowered = file_name.to_ascii_lowercase();
        let mut best: Option<(&'static str, &'static str)> = None;
        for (ext, label) in EXTENSION_LABELS {
            // A name consisting solely of the suffix (".gz") is a hidden
            // file, not an extension.
            if lowered.len() > ext.len() && lowered.ends_with(ext) {
                match best {
                    Some((best_ext, _)) if ext.len() <= best_ext.len() => {}
                    _ => best = Some((ext, label)),
                }
            }
        }
        best.map(|(_, label)| label)
    }
}

impl Classifier for FilesystemClassifier {
    fn tier(&self) -> Tier {
        Tier::Filesystem
    }

    fn classify(&self, request: &ClassificationRequest<'_>) -> Result<Option<FileType>> {
        let path = request.path();
        // symlink_metadata: symlinks are classified as themselves, never
        // resolved to their targets.
        let metadata =
            std::fs::symlink_metadata(path).map_err(|e| Error::from_io(path, e))?;

        if let Some(kind) = Self::special_kind(&metadata) {
            debug!(path = %path.display(), kind, "special file");
            return Ok(Some(FileType::new(kind, Tier::Filesystem)));
        }

        if metadata.len() == 0 {
            return Ok(Some(FileType::new("empty", Tier::Filesystem)));
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if let Some(label) = Self::extension_label(name) {
                return Ok(Some(FileType::new(label, Tier::Filesystem)));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn classify(path: &std::path::Path) -> Result<Option<FileType>> {
        FilesystemClassifier::new().classify(&ClassificationRequest::new(path, 4096))
    }

    #[test]
    fn test_extension_lookup_case_insensitive() {
        assert_eq!(
            FilesystemClassifier::extension_label("REPORT.PDF"),
            Some("PDF document")
        );
        assert_eq!(
            FilesystemClassifier::extension_label("main.rs"),
            Some("Rust source")
        );
        assert_eq!(FilesystemClassifier::extension_label("noext"), None);
    }

    #[test]
    fn test_longest_suffix_wins() {
        assert_eq!(
            FilesystemClassifier::extension_label("backup.tar.gz"),
            Some("compressed TAR archive")
        );
        assert_eq!(
            FilesystemClassifier::extension_label("data.gz"),
            Some("GZIP archive")
        );
    }

    #[test]
    fn test_bare_dotfile_is_not_an_extension() {
        assert_eq!(FilesystemClassifier::extension_label(".gz"), None);
        assert_eq!(FilesystemClassifier::extension_label(".py"), None);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nothing");
        std::fs::File::create(&path).unwrap();

        let ft = classify(&path).unwrap().unwrap();
        assert_eq!(ft.label, "empty");
        assert_eq!(ft.category, Some(Tier::Filesystem));
    }

    #[test]
    fn test_directory_and_symlink() {
        let dir = tempdir().unwrap();
        assert_eq!(classify(dir.path()).unwrap().unwrap().label, "directory");

        #[cfg(unix)]
        {
            let link = dir.path().join("link");
            std::os::unix::fs::symlink(dir.path(), &link).unwrap();
            let ft = classify(&link).unwrap().unwrap();
            assert_eq!(ft.label, "symbolic link");
            assert_eq!(ft.category, Some(Tier::Filesystem));
        }
    }

    #[test]
    fn test_content_is_never_opened() {
        // PDF magic bytes under a .py extension: the name wins because this
        // tier runs on metadata alone.
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.py");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.7").unwrap();

        let ft = classify(&path).unwrap().unwrap();
        assert_eq!(ft.label, "Python source");
        assert_eq!(ft.category, Some(Tier::Filesystem));
    }

    #[test]
    fn test_unmapped_name_declines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.qqq");
        std::fs::write(&path, b"data").unwrap();
        assert!(classify(&path).unwrap().is_none());
    }

    #[test]
    fn test_missing_path_errors() {
        let err = classify(std::path::Path::new("/no/such/entry")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
