//! Connectivity detection.

use async_trait::async_trait;
use log::debug;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::UdpSocket;

use super::Connectivity;

/// How the CLI decides whether the host is online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConnectivityMode {
    /// Ask the OS for a route to a non-local address
    #[default]
    Auto,
    /// Always report online
    Online,
    /// Always report offline
    Offline,
}

/// Reports online when the OS has a route to a non-local address.
///
/// Connecting a UDP socket only consults the routing table, so this never
/// touches the network.
#[derive(Debug, Clone)]
pub struct RouteConnectivity {
    probe: SocketAddr,
}

impl RouteConnectivity {
    pub fn new(probe: SocketAddr) -> Self {
        Self { probe }
    }
}

impl Default for RouteConnectivity {
    fn default() -> Self {
        // TEST-NET-1 discard port; nothing is ever sent to it.
        Self::new(SocketAddr::from(([192, 0, 2, 1], 9)))
    }
}

#[async_trait]
impl Connectivity for RouteConnectivity {
    async fn is_online(&self) -> bool {
        let bind_addr: SocketAddr = if self.probe.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let online = match UdpSocket::bind(bind_addr).await {
            Ok(socket) => socket.connect(self.probe).await.is_ok(),
            Err(e) => {
                debug!("Failed to bind route probe socket: {}", e);
                false
            }
        };
        debug!("Route probe to {}: online={}", self.probe, online);
        online
    }
}

/// Connectivity flag set by the application.
#[derive(Debug)]
pub struct FixedConnectivity {
    online: AtomicBool,
}

impl FixedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connectivity for FixedConnectivity {
    async fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
