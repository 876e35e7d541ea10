//! Magic-byte tier: bounded prefix reads matched against the signature
//! database.
//!
//! Comparisons are purely positional and value-based; no text decoding is
//! attempted, so arbitrary binary input is fine.

use std::sync::Arc;
use tracing::debug;

use crate::db::SignatureDatabase;
use crate::error::Result;
use crate::io::read_prefix;
use crate::report::{FileType, Tier};
use crate::tier::{ClassificationRequest, Classifier};

/// Signature matching over a bounded file prefix.
pub struct MagicClassifier {
    db: Arc<SignatureDatabase>,
}

impl MagicClassifier {
    pub fn new(db: Arc<SignatureDatabase>) -> Self {
        Self { db }
    }
}

impl Classifier for MagicClassifier {
    fn tier(&self) -> Tier {
        Tier::Magic
    }

    fn classify(&self, request: &ClassificationRequest<'_>) -> Result<Option<FileType>> {
        let prefix = read_prefix(request.path(), request.max_read_bytes())?;
        match self.db.best_match(&prefix) {
            Some(sig) => {
                debug!(
                    path = %request.path().display(),
                    label = sig.label(),
                    specificity = sig.specificity(),
                    "signature match"
                );
                Ok(Some(FileType::new(sig.label(), Tier::Magic)))
            }
            None => Ok(None),
        }
    }
}
