//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;

pub use entities::{Forest, Tree, TreeSpecies};
pub use error::DomainError;
