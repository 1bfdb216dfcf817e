//! # Query Target Model
//!
//! A game server endpoint we send queries to. Targets are IPv4 socket
//! addresses written as `a.b.c.d:port`, one per input line.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

/// An immutable `ip:port` pair identifying one game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target {
    addr: SocketAddrV4,
}

impl Target {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            addr: SocketAddrV4::new(ip, port),
        }
    }

    pub fn ip(&self) -> Ipv4Addr {
        *self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(self.addr)
    }

    /// True when a datagram from `source` originates from this target.
    ///
    /// IPv4-mapped IPv6 sources (dual-stack sockets) are compared by their
    /// embedded IPv4 address.
    pub fn matches(&self, source: &SocketAddr) -> bool {
        match source {
            SocketAddr::V4(v4) => *v4 == self.addr,
            SocketAddr::V6(v6) => {
                v6.port() == self.port() && v6.ip().to_ipv4_mapped() == Some(self.ip())
            }
        }
    }
}

impl From<SocketAddrV4> for Target {
    fn from(addr: SocketAddrV4) -> Self {
        Self { addr }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

impl FromStr for Target {
    type Err = String;

    /// Parses `a.b.c.d:port`. Hostnames and IPv6 literals are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((ip_str, port_str)) = s.rsplit_once(':') else {
            return Err(format!("missing port in target '{s}'"));
        };

        let ip = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("invalid IPv4 address '{ip_str}': {e}"))?;

        let port = port_str
            .parse::<u16>()
            .map_err(|e| format!("invalid port '{port_str}': {e}"))?;

        Ok(Self::new(ip, port))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
