// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

// Address probe configuration constants
pub const PROBE_BIND_ADDR: &str = "0.0.0.0:0";
pub const PROBE_TARGET: &str = "8.8.8.8:80";
pub const PROBE_TIMEOUT_MS: u64 = 500;

// Static file serving constants
pub const INDEX_FILE: &str = "index.html";
pub const ACCESS_LOG_TARGET: &str = "dash_serve::access";

// Shutdown constants
pub const SHUTDOWN_GRACE_MS: u64 = 2000;

// Logging constants
pub const DEFAULT_LOG_FILTER: &str = "warn,dash_serve=info";
