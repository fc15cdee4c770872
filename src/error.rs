use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ServeError {
    // Usage errors
    ConfigError(String),

    // Listener errors
    BindError {
        host: String,
        port: u16,
        reason: String,
    },

    // System errors
    SignalError(String),
}

impl ServeError {
    /// Process exit status the binary uses for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::BindError { host, port, reason } => {
                write!(f, "Failed to start server on {}:{}: {}", host, port, reason)
            }
            Self::SignalError(msg) => write!(f, "Signal handler error: {}", msg),
        }
    }
}

impl Error for ServeError {}

// Generic result type for dash-serve
pub type Result<T> = std::result::Result<T, ServeError>;
