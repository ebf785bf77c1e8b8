//! Application services

pub mod generator;
pub mod persistence;
pub mod session;
pub mod snapshot;

pub use generator::TreeGenerator;
pub use persistence::{ForestStore, MalformedLine, SourceLoad};
pub use session::Session;
