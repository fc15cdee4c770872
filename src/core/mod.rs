//! Core functionality for the development server

pub mod banner;
pub mod probe;
pub mod server;
pub mod shutdown;

// Re-export main components for convenience
pub use banner::{AccessUrl, Banner};
pub use probe::{detect_local_ip, AddressProbe, UdpRouteProbe};
pub use server::{run, RunningServer, StaticServer};
pub use shutdown::shutdown_signal;
