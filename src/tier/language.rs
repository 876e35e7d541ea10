//! Language tier: shebang parsing and conjunctive content heuristics.
//!
//! Only runs on content that decodes as UTF-8. The shebang branch wins
//! immediately when it resolves; otherwise every marker's content patterns
//! are checked in one automaton pass over the decoded prefix.

use memchr::memchr;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::db::SignatureDatabase;
use crate::error::Result;
use crate::io::read_prefix;
use crate::report::{FileType, Tier};
use crate::tier::{ClassificationRequest, Classifier};

/// Programming-language detection over a bounded text prefix.
pub struct LanguageClassifier {
    db: Arc<SignatureDatabase>,
}

impl LanguageClassifier {
    pub fn new(db: Arc<SignatureDatabase>) -> Self {
        Self { db }
    }

    /// Strict UTF-8 view of the prefix.
    ///
    /// An invalid sequence inside the budget means the file is not text:
    /// `None`. An incomplete sequence at the very end is tolerated only when
    /// the read was cap-truncated (the budget may split a code point); the
    /// text is then cut at the last fully-valid boundary.
    fn decode(prefix: &[u8], cap_truncated: bool) -> Option<&str> {
        match std::str::from_utf8(prefix) {
            Ok(text) => Some(text),
            Err(e) if e.error_len().is_none() && cap_truncated => {
                // error_len() == None: unexpected end of input, not a bad byte.
                std::str::from_utf8(&prefix[..e.valid_up_to()]).ok()
            }
            Err(_) => None,
        }
    }

    /// Interpreter base name from a `#!` first line, resolving
    /// `/usr/bin/env NAME` to `NAME`.
    fn shebang_interpreter(first_line: &str) -> Option<&str> {
        let rest = first_line.strip_prefix("#!")?;
        let mut words = rest.split_whitespace();
        let command = words.next()?;
        let base = Path::new(command).file_name()?.to_str()?;
        if base == "env" {
            words.next()
        } else {
            Some(base)
        }
    }
}

impl Classifier for LanguageClassifier {
    fn tier(&self) -> Tier {
        Tier::Language
    }

    fn classify(&self, request: &ClassificationRequest<'_>) -> Result<Option<FileType>> {
        let cap = request.max_read_bytes();
        let prefix = read_prefix(request.path(), cap)?;
        let text = match Self::decode(&prefix, prefix.len() == cap) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(None),
        };

        let first_line = match memchr(b'\n', text.as_bytes()) {
            Some(pos) => &text[..pos],
            None => text,
        };
        if let Some(base) = Self::shebang_interpreter(first_line) {
            if let Some(marker) = self.db.match_interpreter(base) {
                debug!(
                    path = %request.path().display(),
                    interpreter = base,
                    label = marker.label(),
                    "shebang match"
                );
                return Ok(Some(FileType::new(marker.label(), Tier::Language)));
            }
        }

        match self.db.match_content(text) {
            Some(marker) => {
                debug!(
                    path = %request.path().display(),
                    label = marker.label(),
                    patterns = marker.content_patterns().len(),
                    "content match"
                );
                Ok(Some(FileType::new(marker.label(), Tier::Language)))
            }
            None => Ok(None),
        }
    }
}
