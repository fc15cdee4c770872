//! Best-effort discovery of the machine's LAN address
//!
//! A UDP socket is "connected" to a public address so the OS picks the
//! outbound route; the socket's local address is then the interface IP that
//! other devices on the network can reach. No packet is ever sent.

use async_trait::async_trait;
use log::debug;
use std::net::IpAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

use crate::constants::{PROBE_BIND_ADDR, PROBE_TARGET, PROBE_TIMEOUT_MS};

/// Source of the address shown as the "Network" URL in the startup banner
#[async_trait]
pub trait AddressProbe: Send + Sync {
    /// Returns the local interface address, or `None` when it can't be determined.
    async fn local_ip(&self) -> Option<IpAddr>;
}

/// Probe that asks the routing table via a connected UDP socket
#[derive(Debug, Clone)]
pub struct UdpRouteProbe {
    target: String,
    timeout: Duration,
}

impl Default for UdpRouteProbe {
    fn default() -> Self {
        Self {
            target: PROBE_TARGET.to_string(),
            timeout: Duration::from_millis(PROBE_TIMEOUT_MS),
        }
    }
}

impl UdpRouteProbe {
    /// Probe the route towards a custom target
    pub fn with_target(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }

    async fn route_source(&self) -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind(PROBE_BIND_ADDR).await?;
        socket.connect(&self.target).await?;
        Ok(socket.local_addr()?.ip())
    }
}

#[async_trait]
impl AddressProbe for UdpRouteProbe {
    async fn local_ip(&self) -> Option<IpAddr> {
        match tokio::time::timeout(self.timeout, self.route_source()).await {
            Ok(Ok(ip)) if !ip.is_unspecified() => Some(ip),
            Ok(Ok(_)) => {
                debug!("Route probe towards {} returned an unspecified address", self.target);
                None
            }
            Ok(Err(e)) => {
                debug!("Route probe towards {} failed: {}", self.target, e);
                None
            }
            Err(_) => {
                debug!("Route probe towards {} timed out", self.target);
                None
            }
        }
    }
}

/// Detect the LAN address with the default probe
pub async fn detect_local_ip() -> Option<IpAddr> {
    UdpRouteProbe::default().local_ip().await
}
