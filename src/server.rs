//! UDP server front-end.
//!
//! Receives client datagrams, runs each through the resolver on its own
//! task, and sends the encoded response back. Unparseable datagrams are
//! dropped without a reply.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::resolver::Resolver;
use crate::wire::{Message, Rcode, MAX_DATAGRAM};

/// The client-facing DNS server.
pub struct DnsServer {
    socket: Arc<UdpSocket>,
}

impl DnsServer {
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serves forever. Each datagram gets an independent task so slow
    /// resolutions never block the receive loop.
    pub async fn run(self, resolver: Arc<Resolver>) {
        info!(addr = ?self.socket.local_addr().ok(), "DNS server listening");
        let mut buf = [0u8; MAX_DATAGRAM];
        loop {
            let (len, src) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(error) => {
                    warn!(%error, "recv error");
                    continue;
                }
            };
            let datagram = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move {
                handle_datagram(socket, resolver, datagram, src).await;
            });
        }
    }
}

async fn handle_datagram(
    socket: Arc<UdpSocket>,
    resolver: Arc<Resolver>,
    datagram: Vec<u8>,
    src: SocketAddr,
) {
    let request = match Message::decode(&datagram) {
        Ok(request) => request,
        Err(error) => {
            debug!(%src, %error, "dropping malformed datagram");
            return;
        }
    };

    let response = match resolver.resolve(&request).await {
        Some(response) => response,
        None => failure_for(&request),
    };

    let packet = match response.encode() {
        Ok(packet) => packet,
        Err(error) => {
            warn!(%src, %error, "failed to encode response");
            return;
        }
    };
    if let Err(error) = socket.send_to(&packet, src).await {
        warn!(%src, %error, "failed to send response");
    }
}

/// Last-resort NAME_ERROR preserving the request's id and questions.
fn failure_for(request: &Message) -> Message {
    let mut header = request.header;
    header.qr = true;
    header.ra = true;
    header.rcode = Rcode::NameError;
    header.ancount = 0;
    header.nscount = 0;
    header.arcount = 0;
    Message {
        header,
        questions: request.questions.clone(),
        answers: Vec::new(),
        authorities: Vec::new(),
        additionals: Vec::new(),
    }
}
