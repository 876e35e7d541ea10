//! The signature and language-marker database.
//!
//! Built once at startup, validated, then immutable for the process
//! lifetime — concurrent readers need no locking. Registration order is
//! significant: it is the tie-break of last resort for both signatures and
//! markers, so load order is preserved exactly as declared.

use aho_corasick::AhoCorasick;
use std::collections::HashSet;

use crate::error::{Error, Result};

/// A binary signature: a byte pattern anchored at a fixed offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Pattern bytes; `None` positions match any byte.
    pattern: Vec<Option<u8>>,
    /// Byte offset from the start of the file where the pattern must match.
    offset: usize,
    /// Human-readable type label, e.g. "PDF document".
    label: String,
}

impl Signature {
    /// A signature with no wildcard positions.
    pub fn exact(offset: usize, bytes: &[u8], label: impl Into<String>) -> Self {
        Self {
            pattern: bytes.iter().copied().map(Some).collect(),
            offset,
            label: label.into(),
        }
    }

    /// A signature with explicit wildcard positions (`None` matches any byte).
    pub fn with_wildcards(
        offset: usize,
        pattern: Vec<Option<u8>>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            pattern,
            offset,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn pattern(&self) -> &[Option<u8>] {
        &self.pattern
    }

    /// Count of non-wildcard bytes. Always recomputed from the pattern so it
    /// cannot drift out of sync with it.
    pub fn specificity(&self) -> usize {
        self.pattern.iter().filter(|b| b.is_some()).count()
    }

    /// Positional match against a byte prefix. A prefix shorter than
    /// `offset + pattern.len()` never matches; there is no out-of-bounds
    /// match against a truncated read.
    pub fn matches(&self, prefix: &[u8]) -> bool {
        let end = match self.offset.checked_add(self.pattern.len()) {
            Some(end) => end,
            None => return false,
        };
        if prefix.len() < end {
            return false;
        }
        self.pattern
            .iter()
            .zip(&prefix[self.offset..end])
            .all(|(pat, byte)| match pat {
                Some(expected) => expected == byte,
                None => true,
            })
    }
}

/// A language marker: an optional shebang interpreter name and/or a
/// conjunctive set of content patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageMarker {
    label: String,
    /// Shebang interpreter base-name prefix ("python" matches "python3").
    interpreter: Option<String>,
    /// All patterns must occur in the decoded prefix for the marker to match.
    content_patterns: Vec<String>,
}

impl LanguageMarker {
    pub fn new(
        label: impl Into<String>,
        interpreter: Option<&str>,
        content_patterns: &[&str],
    ) -> Self {
        Self {
            label: label.into(),
            interpreter: interpreter.map(String::from),
            content_patterns: content_patterns.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Marker matched only through its shebang interpreter name.
    pub fn for_interpreter(label: impl Into<String>, interpreter: &str) -> Self {
        Self::new(label, Some(interpreter), &[])
    }

    /// Marker matched through conjunctive content patterns.
    pub fn for_content(label: impl Into<String>, patterns: &[&str]) -> Self {
        Self::new(label, None, patterns)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.interpreter.as_deref()
    }

    pub fn content_patterns(&self) -> &[String] {
        &self.content_patterns
    }
}

/// Immutable database of binary signatures and language markers.
pub struct SignatureDatabase {
    signatures: Vec<Signature>,
    markers: Vec<LanguageMarker>,
    /// One automaton over every marker content pattern, compiled at load
    /// time so the language tier scans a prefix in a single pass.
    content_scan: Option<AhoCorasick>,
    /// Automaton pattern index -> (marker index, pattern index within marker).
    pattern_owner: Vec<(usize, usize)>,
}

impl SignatureDatabase {
    /// Build and validate a database. Rejects duplicate
    /// `(pattern, offset, label)` signature triples and markers with neither
    /// an interpreter nor content patterns.
    pub fn new(signatures: Vec<Signature>, markers: Vec<LanguageMarker>) -> Result<Self> {
        let mut seen: HashSet<(Vec<Option<u8>>, usize, String)> = HashSet::new();
        for sig in &signatures {
            if sig.pattern.is_empty() {
                return Err(Error::InvalidDatabase(format!(
                    "signature \"{}\" has an empty pattern",
                    sig.label
                )));
            }
            if !seen.insert((sig.pattern.clone(), sig.offset, sig.label.clone())) {
                return Err(Error::InvalidDatabase(format!(
                    "duplicate signature \"{}\" at offset {}",
                    sig.label, sig.offset
                )));
            }
        }

        for marker in &markers {
            if marker.interpreter.is_none() && marker.content_patterns.is_empty() {
                return Err(Error::InvalidDatabase(format!(
                    "language marker \"{}\" has neither an interpreter nor content patterns",
                    marker.label
                )));
            }
            if marker.content_patterns.iter().any(|p| p.is_empty()) {
                return Err(Error::InvalidDatabase(format!(
                    "language marker \"{}\" has an empty content pattern",
                    marker.label
                )));
            }
        }

        let mut pattern_owner = Vec::new();
        let mut all_patterns = Vec::new();
        for (marker_idx, marker) in markers.iter().enumerate() {
            for (pat_idx, pattern) in marker.content_patterns.iter().enumerate() {
                pattern_owner.push((marker_idx, pat_idx));
                all_patterns.push(pattern.clone());
            }
        }
        let content_scan = if all_patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::new(&all_patterns)
                    .map_err(|e| Error::InvalidDatabase(e.to_string()))?,
            )
        };

        Ok(Self {
            signatures,
            markers,
            content_scan,
            pattern_owner,
        })
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn markers(&self) -> &[LanguageMarker] {
        &self.markers
    }

    /// All signatures matching the prefix, in registration order.
    pub fn lookup(&self, prefix: &[u8]) -> Vec<&Signature> {
        self.signatures
            .iter()
            .filter(|sig| sig.matches(prefix))
            .collect()
    }

    /// The winning signature for a prefix: highest specificity, ties broken
    /// by earliest registration. Deterministic across runs.
    pub fn best_match(&self, prefix: &[u8]) -> Option<&Signature> {
        let mut best: Option<&Signature> = None;
        for sig in &self.signatures {
            if !sig.matches(prefix) {
                continue;
            }
            match best {
                // Strictly greater keeps the earlier registration on ties.
                Some(current) if sig.specificity() <= current.specificity() => {}
                _ => best = Some(sig),
            }
        }
        best
    }

    /// The marker matching a shebang interpreter base name, by prefix
    /// comparison in registration order.
    pub fn match_interpreter(&self, base_name: &str) -> Option<&LanguageMarker> {
        self.markers.iter().find(|marker| {
            marker
                .interpreter
                .as_deref()
                .is_some_and(|interp| base_name.starts_with(interp))
        })
    }

    /// The winning content marker for a decoded prefix.
    ///
    /// A marker matches only if all of its content patterns occur somewhere
    /// in the text. Among matching markers the one with the most patterns
    /// satisfied wins; ties resolve by registration order.
    pub fn match_content(&self, text: &str) -> Option<&LanguageMarker> {
        let scan = self.content_scan.as_ref()?;

        let mut satisfied: Vec<HashSet<usize>> = vec![HashSet::new(); self.markers.len()];
        for hit in scan.find_overlapping_iter(text) {
            let (marker_idx, pat_idx) = self.pattern_owner[hit.pattern().as_usize()];
            satisfied[marker_idx].insert(pat_idx);
        }

        let mut best: Option<(usize, usize)> = None; // (marker index, pattern count)
        for (idx, marker) in self.markers.iter().enumerate() {
            let required = marker.content_patterns.len();
            if required == 0 || satisfied[idx].len() < required {
                continue;
            }
            match best {
                Some((_, count)) if required <= count => {}
                _ => best = Some((idx, required)),
            }
        }
        best.map(|(idx, _)| &self.markers[idx])
    }
}
