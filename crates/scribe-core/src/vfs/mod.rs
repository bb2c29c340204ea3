//! # Scribe Core Virtual File System
//!
//! [`VirtualFile`] is the only boundary through which extensions access file
//! content. [`LocalVirtualFile`] backs it with the local filesystem; other
//! schemes can implement the same trait and return `None` from
//! [`VirtualFile::local_path`].
pub mod error;
pub mod file;
pub mod local;

pub use error::VfsError;
pub use file::{TextEncoding, VirtualFile};
pub use local::LocalVirtualFile;
