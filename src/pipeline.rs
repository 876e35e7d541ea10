//! The ordered classification pipeline.
//!
//! Tries the filesystem, magic, and language tiers in that fixed order and
//! short-circuits on the first tier that claims the file. Classification
//! always terminates with a result; when every tier declines the terminal
//! result is `unknown`, which is not an error.

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::builtin;
use crate::config::EngineConfig;
use crate::db::SignatureDatabase;
use crate::error::Result;
use crate::report::FileType;
use crate::tier::{
    ClassificationRequest, Classifier, FilesystemClassifier, LanguageClassifier, MagicClassifier,
};

/// The three-tier classification engine.
///
/// Holds the validated, immutable database; cheap to share across threads
/// (`&self` classification, no interior mutability).
pub struct ClassificationPipeline {
    max_read_bytes: usize,
    tiers: Vec<Box<dyn Classifier>>,
}

impl ClassificationPipeline {
    /// Pipeline over the built-in database with default limits.
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Pipeline with explicit configuration. Extra signatures and markers
    /// append after the built-ins; the merged database is validated here and
    /// a malformed one refuses construction.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let db = if config.has_extras() {
            let mut signatures = builtin::signatures();
            signatures.extend(config.extra_signatures);
            let mut markers = builtin::markers();
            markers.extend(config.extra_markers);
            Arc::new(SignatureDatabase::new(signatures, markers)?)
        } else {
            builtin::default_database()
        };

        let tiers: Vec<Box<dyn Classifier>> = vec![
            Box::new(FilesystemClassifier::new()),
            Box::new(MagicClassifier::new(Arc::clone(&db))),
            Box::new(LanguageClassifier::new(db)),
        ];

        Ok(Self {
            max_read_bytes: config.max_read_bytes,
            tiers,
        })
    }

    pub fn max_read_bytes(&self) -> usize {
        self.max_read_bytes
    }

    /// Classify one path. A tier's no-match falls through to the next tier;
    /// an I/O failure aborts this file only.
    pub fn classify(&self, path: &Path) -> Result<FileType> {
        let request = ClassificationRequest::new(path, self.max_read_bytes);
        for tier in &self.tiers {
            if let Some(file_type) = tier.classify(&request)? {
                return Ok(file_type);
            }
            debug!(path = %path.display(), tier = %tier.tier(), "no match");
        }
        Ok(FileType::unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LanguageMarker, Signature};
    use crate::error::Error;
    use crate::report::Tier;
    use tempfile::tempdir;

    #[test]
    fn test_tier_order_filesystem_first() {
        // Content says PDF, name says Python: the metadata tier runs first
        // and wins without opening the file.
        let pipeline = ClassificationPipeline::new().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("looks_like.py");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let ft = pipeline.classify(&path).unwrap();
        assert_eq!(ft.label, "Python source");
        assert_eq!(ft.category, Some(Tier::Filesystem));
    }

    #[test]
    fn test_magic_beats_language() {
        let pipeline = ClassificationPipeline::new().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("noext");
        // Valid text with a PDF magic prefix: magic tier answers first.
        std::fs::write(&path, b"%PDF-1.7\nimport os\ndef f(): pass\n").unwrap();

        let ft = pipeline.classify(&path).unwrap();
        assert_eq!(ft.label, "PDF document");
        assert_eq!(ft.category, Some(Tier::Magic));
    }

    #[test]
    fn test_all_tiers_decline_yields_unknown() {
        let pipeline = ClassificationPipeline::new().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage");
        // No extension mapping, no signature, invalid UTF-8.
        std::fs::write(&path, [0x01u8, 0x92, 0xC5, 0x07, 0xEE, 0xB1, 0x03]).unwrap();

        let ft = pipeline.classify(&path).unwrap();
        assert!(ft.is_unknown());
        assert_eq!(ft.category, None);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let pipeline = ClassificationPipeline::new().unwrap();
        let err = pipeline
            .classify(Path::new("/no/such/path/anywhere"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_extra_signature_extends_database() {
        let config = EngineConfig {
            extra_signatures: vec![Signature::exact(0, b"FSFT", "filesift fixture")],
            ..EngineConfig::default()
        };
        let pipeline = ClassificationPipeline::with_config(config).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixture");
        std::fs::write(&path, b"FSFT0001").unwrap();

        assert_eq!(pipeline.classify(&path).unwrap().label, "filesift fixture");
    }

    #[test]
    fn test_duplicate_extra_signature_is_fatal() {
        let config = EngineConfig {
            extra_signatures: vec![Signature::exact(0, b"%PDF", "PDF document")],
            ..EngineConfig::default()
        };
        let result = ClassificationPipeline::with_config(config);
        assert!(matches!(result, Err(Error::InvalidDatabase(_))));
    }

    #[test]
    fn test_invalid_extra_marker_is_fatal() {
        let config = EngineConfig {
            extra_markers: vec![LanguageMarker::new("hollow", None, &[])],
            ..EngineConfig::default()
        };
        let result = ClassificationPipeline::with_config(config);
        assert!(matches!(result, Err(Error::InvalidDatabase(_))));
    }
}
