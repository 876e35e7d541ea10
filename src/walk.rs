//! Directory traversal driving the classification pipeline.
//!
//! The walker is a lazy, single-pass iterator: file N+1 is not touched until
//! the consumer asks for it, so a caller can stop early on a large tree.
//! Entries within a directory are visited depth-first in strict lexicographic
//! name order, files and subdirectories interleaved in one sorted pass.
//! Symlinks are classified, never followed, which rules out traversal cycles;
//! walkdir keeps the pending entries on an explicit work list rather than the
//! call stack.

use rayon::prelude::*;
use std::path::PathBuf;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::Error;
use crate::pipeline::ClassificationPipeline;
use crate::report::Finding;

/// One enumerated path, before classification.
enum WalkEvent {
    /// A classifiable entry (regular file, symlink, special file).
    Entry(PathBuf),
    /// Enumeration itself failed for this path.
    Failed(PathBuf, Error),
}

/// Lazily enumerates classifiable entries under a list of root paths.
struct PathStream {
    roots: std::vec::IntoIter<PathBuf>,
    current: Option<walkdir::IntoIter>,
    max_depth: Option<usize>,
    report_dirs: bool,
}

impl PathStream {
    fn new(roots: Vec<PathBuf>, max_depth: Option<usize>, report_dirs: bool) -> Self {
        Self {
            roots: roots.into_iter(),
            current: None,
            max_depth,
            report_dirs,
        }
    }

    fn descend(&mut self, root: &std::path::Path) {
        let mut walk = WalkDir::new(root).min_depth(1).sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walk = walk.max_depth(depth);
        }
        self.current = Some(walk.into_iter());
    }
}

impl Iterator for PathStream {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        loop {
            if let Some(iter) = &mut self.current {
                match iter.next() {
                    Some(Ok(entry)) => {
                        if entry.file_type().is_dir() && !self.report_dirs {
                            continue;
                        }
                        return Some(WalkEvent::Entry(entry.into_path()));
                    }
                    Some(Err(err)) => {
                        let path = err
                            .path()
                            .map(PathBuf::from)
                            .unwrap_or_default();
                        let io = err
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("traversal failed"));
                        return Some(WalkEvent::Failed(path.clone(), Error::from_io(path, io)));
                    }
                    None => {
                        self.current = None;
                        continue;
                    }
                }
            }

            let root = self.roots.next()?;
            match std::fs::symlink_metadata(&root) {
                Err(e) => return Some(WalkEvent::Failed(root.clone(), Error::from_io(root, e))),
                Ok(meta) if meta.is_dir() => {
                    self.descend(&root);
                    if self.report_dirs {
                        return Some(WalkEvent::Entry(root));
                    }
                }
                // Regular-file, symlink, and special-file roots are
                // classified directly.
                Ok(_) => return Some(WalkEvent::Entry(root)),
            }
        }
    }
}

/// Lazy traversal yielding one [`Finding`] per classifiable entry.
///
/// Failures are findings, not aborts: one unreadable file never stops the
/// scan of its siblings. A walker instance is single-pass and not
/// restartable.
pub struct Walker<'a> {
    pipeline: &'a ClassificationPipeline,
    stream: PathStream,
}

impl<'a> Walker<'a> {
    pub fn new(pipeline: &'a ClassificationPipeline, roots: Vec<PathBuf>) -> Self {
        Self::with_options(pipeline, roots, None, false)
    }

    /// `max_depth` bounds directory recursion (entries below it are never
    /// enumerated); `report_dirs` also yields findings for directories
    /// themselves instead of silently descending.
    pub fn with_options(
        pipeline: &'a ClassificationPipeline,
        roots: Vec<PathBuf>,
        max_depth: Option<usize>,
        report_dirs: bool,
    ) -> Self {
        Self {
            pipeline,
            stream: PathStream::new(roots, max_depth, report_dirs),
        }
    }

    fn classify(&self, path: PathBuf) -> Finding {
        match self.pipeline.classify(&path) {
            Ok(file_type) => Finding::classified(path, file_type),
            Err(error) => {
                warn!(path = %path.display(), %error, "classification failed");
                Finding::failed(path, error)
            }
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        match self.stream.next()? {
            WalkEvent::Entry(path) => Some(self.classify(path)),
            WalkEvent::Failed(path, error) => {
                warn!(path = %path.display(), %error, "traversal error");
                Some(Finding::failed(path, error))
            }
        }
    }
}

/// Classify a tree with a rayon worker pool.
///
/// Enumeration stays sequential (it is cheap and order-defining); the
/// per-file classification work fans out, and the output preserves
/// traversal order. The pipeline's database is read-only, so workers share
/// it without locking.
pub fn classify_parallel(
    pipeline: &ClassificationPipeline,
    roots: Vec<PathBuf>,
    max_depth: Option<usize>,
    report_dirs: bool,
) -> Vec<Finding> {
    let events: Vec<WalkEvent> = PathStream::new(roots, max_depth, report_dirs).collect();
    events
        .into_par_iter()
        .map(|event| match event {
            WalkEvent::Entry(path) => match pipeline.classify(&path) {
                Ok(file_type) => Finding::classified(path, file_type),
                Err(error) => Finding::failed(path, error),
            },
            WalkEvent::Failed(path, error) => Finding::failed(path, error),
        })
        .collect()
}
