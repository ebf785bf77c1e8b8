//! Infrastructure layer: I/O implementations

pub mod traits;

pub use traits::{FileSystem, RealFileSystem};
