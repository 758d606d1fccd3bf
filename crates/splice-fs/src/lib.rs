//! Filesystem layer for blocksplice
//!
//! Provides locked text reads, atomic writes, content checksums and
//! format-agnostic loading of splice plans.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::compute_content_checksum;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::LockedFile;
pub use path::NormalizedPath;
