//! Startup banner listing where the served content can be reached

use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;

/// One URL printed in the banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessUrl {
    pub label: &'static str,
    pub url: String,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Banner {
    directory: PathBuf,
    urls: Vec<AccessUrl>,
    network_undetected: bool,
}

impl Banner {
    /// Build the banner for a bound server. `network_ip` is only consulted for
    /// the all-interfaces host.
    pub fn new(config: &ServerConfig, network_ip: Option<IpAddr>) -> Self {
        let mut urls = Vec::new();
        let mut network_undetected = false;

        if config.is_all_interfaces() {
            urls.push(AccessUrl {
                label: "Local",
                url: format!("http://localhost:{}", config.port),
                hint: None,
            });
            match network_ip {
                Some(ip) => urls.push(AccessUrl {
                    label: "Network",
                    url: http_url(&ip.to_string(), config.port),
                    hint: Some("use this on your phone"),
                }),
                None => network_undetected = true,
            }
        } else {
            urls.push(AccessUrl {
                label: "URL",
                url: http_url(&config.host, config.port),
                hint: None,
            });
        }

        Self {
            directory: config.directory.clone(),
            urls,
            network_undetected,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn urls(&self) -> &[AccessUrl] {
        &self.urls
    }

    /// Print the banner to stdout
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Serving {} at:", self.directory.display())?;
        for access in &self.urls {
            let label = format!("{}:", access.label);
            match access.hint {
                Some(hint) => writeln!(f, "  {:<9}{} ({})", label, access.url, hint)?,
                None => writeln!(f, "  {:<9}{}", label, access.url)?,
            }
        }
        if self.network_undetected {
            writeln!(f, "  {:<9}Unable to detect local IP automatically.", "Network:")?;
        }
        writeln!(f, "Press Ctrl+C to stop the server.")
    }
}

fn http_url(host: &str, port: u16) -> String {
    // IPv6 literals need brackets inside a URL authority
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    }
}
