//! Bounded I/O for safe prefix reads.
//!
//! Every content read in the engine goes through [`read_prefix`]: at most
//! `cap` bytes from the start of the file, however large the file is. The
//! handle is opened, read, and released within the call — never held across
//! classifications.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Read up to `cap` bytes from the start of `path`.
///
/// Files shorter than the cap are read in full; longer files contribute
/// exactly `cap` bytes and nothing more. Open and read failures map to the
/// crate error taxonomy (`NotFound` for missing paths, `Io` otherwise).
pub fn read_prefix(path: &Path, cap: usize) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
    let mut buf = Vec::with_capacity(cap.min(64 * 1024));
    let n = file
        .take(cap as u64)
        .read_to_end(&mut buf)
        .map_err(|e| Error::from_io(path, e))?;
    debug!(path = %path.display(), bytes = n, cap, "read prefix");
    Ok(buf)
}
