use crate::liveness::DEFAULT_PING_INTERVAL;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
    pub ping_interval: Duration,
}

impl RelayConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::new(host, port),
            ..Self::default()
        }
    }

    pub fn with_ping_interval(mut self, ping_interval: Duration) -> Self {
        self.ping_interval = ping_interval;
        self
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            ping_interval: DEFAULT_PING_INTERVAL,
        }
    }
}
