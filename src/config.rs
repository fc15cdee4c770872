//! Server configuration module
//! Turns command-line arguments into the immutable configuration of one serving run

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{Result, ServeError};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Raw command-line input
#[derive(Parser, Debug)]
#[command(
    name = "dash-serve",
    version,
    about = "Serve the dashboard with a static file server so it can be viewed locally or from another device."
)]
pub struct Args {
    /// Interface to bind. Use 0.0.0.0 to allow other devices on the same network to connect.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Directory to serve (default: the crate root).
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

/// Directory served when `--directory` is not given
pub fn default_directory() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Server configuration parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Absolute, canonical root of the served tree
    pub directory: PathBuf,
}

impl ServerConfig {
    /// Build a configuration without touching the filesystem.
    pub fn new(host: impl Into<String>, port: u16, directory: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            directory: directory.into(),
        }
    }

    /// Resolve parsed arguments into a configuration, canonicalizing the directory
    pub fn from_args(args: Args) -> Result<Self> {
        let host = args.host.trim().to_string();
        if host.is_empty() {
            return Err(ServeError::ConfigError("host cannot be empty".to_string()));
        }

        let requested = args.directory.unwrap_or_else(default_directory);
        let directory = requested.canonicalize().map_err(|e| {
            ServeError::ConfigError(format!(
                "cannot serve directory {}: {}",
                requested.display(),
                e
            ))
        })?;

        if !directory.is_dir() {
            return Err(ServeError::ConfigError(format!(
                "{} is not a directory",
                directory.display()
            )));
        }

        Ok(Self {
            host,
            port: args.port,
            directory,
        })
    }

    /// Whether the host is the wildcard address that listens on every interface
    pub fn is_all_interfaces(&self) -> bool {
        self.host
            .parse::<IpAddr>()
            .map(|ip| ip.is_unspecified())
            .unwrap_or(false)
    }
}
