//! Server runner: binds the listener, announces the URLs and serves until shutdown

use log::{info, warn};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::constants::SHUTDOWN_GRACE_MS;
use crate::core::banner::Banner;
use crate::core::probe::{AddressProbe, UdpRouteProbe};
use crate::core::shutdown::shutdown_signal;
use crate::error::{Result, ServeError};
use crate::handlers::static_routes;

/// A configured but not yet bound server
pub struct StaticServer {
    config: ServerConfig,
    probe: Box<dyn AddressProbe>,
}

impl StaticServer {
    /// Create a server that detects its LAN address through the routing table
    pub fn new(config: ServerConfig) -> Self {
        Self::with_probe(config, UdpRouteProbe::default())
    }

    /// Create a server with a custom address probe
    pub fn with_probe(config: ServerConfig, probe: impl AddressProbe + 'static) -> Self {
        Self {
            config,
            probe: Box::new(probe),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the listening socket. The server stops accepting connections once
    /// `shutdown` resolves.
    ///
    /// Bind failures are reported before anything is printed; the address
    /// probe only runs after a successful bind and only for the wildcard host.
    pub async fn bind<S>(self, shutdown: S) -> Result<RunningServer>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = self.resolve_addr().await?;
        let routes = static_routes(self.config.directory.clone());

        let (stopping_tx, stopping) = oneshot::channel();
        let shutdown = async move {
            shutdown.await;
            let _ = stopping_tx.send(());
        };

        let (local_addr, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, shutdown)
            .map_err(|e| self.bind_error(root_cause(&e)))?;

        info!(
            "Serving {} on {}",
            self.config.directory.display(),
            local_addr
        );

        let network_ip = if self.config.is_all_interfaces() {
            self.probe.local_ip().await
        } else {
            None
        };

        Ok(RunningServer {
            local_addr,
            banner: Banner::new(&self.config, network_ip),
            server: Box::pin(server),
            stopping,
            drain_grace: Duration::from_millis(SHUTDOWN_GRACE_MS),
        })
    }

    async fn resolve_addr(&self) -> Result<SocketAddr> {
        let mut addrs = tokio::net::lookup_host((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| self.bind_error(e.to_string()))?;

        addrs
            .next()
            .ok_or_else(|| self.bind_error("host did not resolve to any address".to_string()))
    }

    fn bind_error(&self, reason: String) -> ServeError {
        ServeError::BindError {
            host: self.config.host.clone(),
            port: self.config.port,
            reason,
        }
    }
}

/// A bound server that has not started serving yet
pub struct RunningServer {
    local_addr: SocketAddr,
    banner: Banner,
    server: Pin<Box<dyn Future<Output = ()> + Send>>,
    stopping: oneshot::Receiver<()>,
    drain_grace: Duration,
}

impl RunningServer {
    /// Address the listener is actually bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// How long open connections may keep the server alive after shutdown
    pub fn with_drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }

    /// Serve until the shutdown future resolves and in-flight requests finish.
    ///
    /// Idle keep-alive connections count as busy for hyper, so the drain is
    /// cut off after the grace period. The listening socket is closed when
    /// this returns.
    pub async fn serve(self) {
        let RunningServer {
            local_addr,
            server,
            stopping,
            drain_grace,
            ..
        } = self;

        let drain_deadline = async move {
            if stopping.await.is_ok() {
                tokio::time::sleep(drain_grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = server => info!("Server on {} stopped", local_addr),
            _ = drain_deadline => warn!(
                "Server on {} stopped with connections still open after {:?}",
                local_addr, drain_grace
            ),
        }
    }
}

/// Bind with the process signal handlers, print the banner and serve
pub async fn run(config: ServerConfig) -> Result<()> {
    let shutdown = shutdown_signal()?;
    let server = StaticServer::new(config).bind(shutdown).await?;

    server.banner().print();
    server.serve().await;

    Ok(())
}

// Innermost error text, e.g. the OS error under warp's bind error
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
