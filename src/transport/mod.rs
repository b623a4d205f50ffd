//! Upstream transport for the resolution engine.
//!
//! One exchange is one datagram out, one datagram back. Retry policy lives
//! in the engine, never here.

pub mod udp;

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::wire::Message;

pub use udp::UdpTransport;

/// Receive headroom for upstream responses, which can exceed the 512 byte
/// client-facing datagram limit.
pub const MAX_DNS_PACKET_SIZE: usize = 4096;

/// Default per-attempt upstream timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// A single DNS exchange: send a query packet, await one parsed response.
#[async_trait]
pub trait UdpExchange: Send + Sync {
    async fn query(
        &self,
        packet: &[u8],
        addr: SocketAddr,
        timeout: Duration,
    ) -> Result<Message, TransportError>;
}
