//! Interactive forestry simulator.
//!
//! Layering follows domain → application → infrastructure → cli: the domain
//! holds [`domain::Forest`] and [`domain::Tree`] with no I/O, the application
//! layer holds persistence, generation, and the menu-driven
//! [`application::services::Session`], and the CLI wires them to stdin/stdout.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;
