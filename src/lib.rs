//! dash-serve - a development static file server
//!
//! Serves a directory over HTTP so a static dashboard can be previewed
//! locally or from another device on the same network, and prints the
//! URLs it can be reached at.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;
pub mod security;

// Re-export main components
pub use config::*;
pub use constants::*;
