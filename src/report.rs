//! Classification result types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::Error;

/// The tier that produced a classification result.
///
/// Tiers run in this declared order; it is a pipeline order, not a
/// confidence ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Filesystem,
    Magic,
    Language,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Filesystem => write!(f, "filesystem"),
            Tier::Magic => write!(f, "magic"),
            Tier::Language => write!(f, "language"),
        }
    }
}

/// A classification result: a human-readable label and the tier that
/// produced it. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileType {
    /// Human-readable type name, e.g. "PDF document", "Python source".
    pub label: String,
    /// Producing tier; `None` only for the terminal "unknown" result.
    pub category: Option<Tier>,
}

impl FileType {
    pub fn new(label: impl Into<String>, category: Tier) -> Self {
        Self {
            label: label.into(),
            category: Some(category),
        }
    }

    /// The terminal result when every tier declined to match. A valid
    /// classification, never an error.
    pub fn unknown() -> Self {
        Self {
            label: "unknown".to_string(),
            category: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.category.is_none()
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// One `(path, result-or-error)` pair produced by the walker.
///
/// Failures are data: an unreadable file yields an error finding and the
/// traversal continues. The sequence of findings is ordered by visitation
/// and owned entirely by the caller.
#[derive(Debug)]
pub struct Finding {
    pub path: PathBuf,
    pub outcome: Result<FileType, Error>,
}

impl Finding {
    pub fn classified(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            outcome: Ok(file_type),
        }
    }

    pub fn failed(path: impl Into<PathBuf>, error: Error) -> Self {
        Self {
            path: path.into(),
            outcome: Err(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(ft) => write!(f, "{}: {}", self.path.display(), ft),
            Err(e) => write!(f, "{}: error: {}", self.path.display(), e),
        }
    }
}
