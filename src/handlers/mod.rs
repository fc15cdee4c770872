//! Request handlers for the static file server

pub mod listing;
pub mod static_files;

// Re-export the route builder and handlers
pub use listing::{directory_listing, render_listing, ListingEntry};
pub use static_files::{handle_rejection, static_routes};
