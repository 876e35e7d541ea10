//! Configuration for the classification engine.
//!
//! All customization is an explicit construction-time parameter; the engine
//! reads no configuration files or environment variables.

use crate::db::{LanguageMarker, Signature};

/// Default cap on how many bytes the byte-reading tiers may consume per file.
pub const DEFAULT_MAX_READ_BYTES: usize = 4096;

/// Construction-time configuration for [`ClassificationPipeline`].
///
/// Extra signatures and markers are appended after the built-in tables in the
/// order given, preserving load order for tie-break determinism.
///
/// [`ClassificationPipeline`]: crate::pipeline::ClassificationPipeline
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of bytes read from the start of any file.
    pub max_read_bytes: usize,
    /// Signatures appended after the built-in table.
    pub extra_signatures: Vec<Signature>,
    /// Language markers appended after the built-in table.
    pub extra_markers: Vec<LanguageMarker>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            extra_signatures: Vec::new(),
            extra_markers: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn with_max_read_bytes(mut self, max_read_bytes: usize) -> Self {
        self.max_read_bytes = max_read_bytes;
        self
    }

    pub fn has_extras(&self) -> bool {
        !self.extra_signatures.is_empty() || !self.extra_markers.is_empty()
    }
}
