//! Warnings for configurations that expose more than a local preview needs
//!
//! Nothing here changes behaviour: the wildcard default bind is kept, but
//! the operator is told what it exposes.

use std::fmt;

use crate::config::ServerConfig;

/// Exposure warning types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExposureWarning {
    /// Listening on every interface makes the tree readable from the LAN
    AllInterfaces { host: String },
    /// The whole filesystem is being served
    FilesystemRoot,
}

impl fmt::Display for ExposureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllInterfaces { host } => write!(
                f,
                "Binding {} exposes the served directory to every device on the network \
                 (no authentication, no TLS, directory listing enabled). \
                 Use --host 127.0.0.1 to keep it local.",
                host
            ),
            Self::FilesystemRoot => write!(
                f,
                "Serving the filesystem root makes every readable file available"
            ),
        }
    }
}

/// Collect the exposure warnings that apply to a configuration
pub fn exposure_warnings(config: &ServerConfig) -> Vec<ExposureWarning> {
    let mut warnings = Vec::new();

    if config.is_all_interfaces() {
        warnings.push(ExposureWarning::AllInterfaces {
            host: config.host.clone(),
        });
    }

    if config.directory.parent().is_none() {
        warnings.push(ExposureWarning::FilesystemRoot);
    }

    warnings
}

/// Log every exposure warning for a configuration
pub fn log_exposure_warnings(config: &ServerConfig) {
    for warning in exposure_warnings(config) {
        log::warn!("EXPOSURE WARNING: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_bind_is_flagged() {
        let config = ServerConfig::new("0.0.0.0", 8000, "/srv/dashboard");
        assert_eq!(
            exposure_warnings(&config),
            vec![ExposureWarning::AllInterfaces {
                host: "0.0.0.0".to_string()
            }]
        );
    }

    #[test]
    fn test_loopback_bind_is_quiet() {
        let config = ServerConfig::new("127.0.0.1", 8000, "/srv/dashboard");
        assert!(exposure_warnings(&config).is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_filesystem_root_is_flagged() {
        let config = ServerConfig::new("127.0.0.1", 8000, "/");
        assert_eq!(exposure_warnings(&config), vec![ExposureWarning::FilesystemRoot]);
    }

    #[test]
    fn test_warning_text_suggests_loopback() {
        let warning = ExposureWarning::AllInterfaces {
            host: "0.0.0.0".to_string(),
        };
        assert!(warning.to_string().contains("--host 127.0.0.1"));
    }
}
