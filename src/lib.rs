//! filesift: file type classification through an ordered, short-circuiting
//! pipeline of filesystem, magic-byte, and language tests.
//!
//! The engine owns its signature and heuristic database, built once at
//! startup and immutable afterward. Directory trees are driven through the
//! pipeline by a lazy, deterministic walker that records per-file failures
//! as data and keeps going.
//!
//! ```no_run
//! use filesift::{ClassificationPipeline, Walker};
//!
//! let pipeline = ClassificationPipeline::new()?;
//! for finding in Walker::new(&pipeline, vec!["src".into()]) {
//!     println!("{finding}");
//! }
//! # Ok::<(), filesift::Error>(())
//! ```

pub mod builtin;
pub mod config;
pub mod db;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod tier;
pub mod walk;

pub use config::EngineConfig;
pub use db::{LanguageMarker, Signature, SignatureDatabase};
pub use error::{Error, Result};
pub use pipeline::ClassificationPipeline;
pub use report::{FileType, Finding, Tier};
pub use walk::{classify_parallel, Walker};
