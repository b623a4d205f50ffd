//! One-shot UDP exchanges with upstream name servers.
//!
//! Each call binds a fresh ephemeral socket, connects it to the target so
//! the kernel discards datagrams from other peers, sends the query, and
//! awaits a single response under the caller's timeout. The socket closes
//! on every exit path.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;

use crate::error::{FormatError, TransportError};
use crate::wire::Message;

use super::{UdpExchange, MAX_DNS_PACKET_SIZE};

/// Real upstream transport.
pub struct UdpTransport;

#[async_trait]
impl UdpExchange for UdpTransport {
    async fn query(
        &self,
        packet: &[u8],
        addr: SocketAddr,
        timeout: Duration,
    ) -> Result<Message, TransportError> {
        if packet.len() < 2 {
            return Err(FormatError::ShortMessage(packet.len()).into());
        }
        let expected_id = u16::from_be_bytes([packet[0], packet[1]]);

        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(addr).await?;
        socket.send(packet).await?;

        let mut buf = [0u8; MAX_DNS_PACKET_SIZE];
        let len = tokio::time::timeout(timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout)??;

        let response = Message::decode(&buf[..len])?;
        if response.header.id != expected_id {
            return Err(FormatError::IdMismatch {
                expected: expected_id,
                got: response.header.id,
            }
            .into());
        }
        Ok(response)
    }
}
