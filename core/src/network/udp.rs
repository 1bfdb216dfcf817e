//! One UDP conversation with one target.
//!
//! Every attempt opens its own socket; it is closed when the conversation is
//! dropped, on every exit path.

use std::io;
use std::net::Ipv4Addr;

use a2scan_common::network::target::Target;
use a2scan_protocols::MAX_PACKET_SIZE;
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};
use tracing::trace;

#[cfg(unix)]
const EXHAUSTION_CODES: &[i32] = &[23, 24]; // ENFILE, EMFILE
#[cfg(windows)]
const EXHAUSTION_CODES: &[i32] = &[10024]; // WSAEMFILE
#[cfg(not(any(unix, windows)))]
const EXHAUSTION_CODES: &[i32] = &[];

/// True when the OS refused a socket because a descriptor limit was hit.
pub(crate) fn is_resource_exhausted(err: &io::Error) -> bool {
    err.raw_os_error()
        .is_some_and(|code| EXHAUSTION_CODES.contains(&code))
}

pub(crate) struct Conversation {
    socket: UdpSocket,
    target: Target,
}

impl Conversation {
    pub(crate) async fn open(target: Target) -> io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        Ok(Self { socket, target })
    }

    pub(crate) async fn send(&self, packet: &[u8]) -> io::Result<()> {
        self.socket.send_to(packet, self.target.socket_addr()).await?;
        trace!(target_addr = %self.target, len = packet.len(), "sent");
        Ok(())
    }

    /// Waits until `deadline` for a datagram originating from the target.
    ///
    /// Datagrams from any other address are dropped and the wait goes on
    /// against the same deadline. `Ok(None)` means the deadline passed.
    pub(crate) async fn recv(&self, deadline: Instant) -> io::Result<Option<Vec<u8>>> {
        let mut buf = [0u8; MAX_PACKET_SIZE];
        loop {
            let (len, source) = match timeout_at(deadline, self.socket.recv_from(&mut buf)).await {
                Ok(received) => received?,
                Err(_elapsed) => return Ok(None),
            };

            if self.target.matches(&source) {
                trace!(target_addr = %self.target, len, "received");
                return Ok(Some(buf[..len].to_vec()));
            }
            trace!(target_addr = %self.target, %source, "discarding datagram from unexpected origin");
        }
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
