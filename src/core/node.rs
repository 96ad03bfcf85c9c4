//! Peer records handed to and returned by the routing table.

use std::net::{IpAddr, SocketAddr};

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};
use bytes::Bytes;

use crate::core::id::Id;

/// A peer's network location: an IP address, the UDP port discovery traffic
/// is sent to and an optional TCP port for the application protocol.
///
/// The routing table treats the endpoint as an opaque address record; it is
/// only ever handed to the send capability as a probe destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct Endpoint {
    pub addr: IpAddr,
    pub udp_port: u16,
    pub tcp_port: Option<u16>,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(addr: IpAddr, udp_port: u16, tcp_port: Option<u16>) -> Self {
        Self {
            addr,
            udp_port,
            tcp_port,
        }
    }

    /// Returns the UDP socket address probes are sent to.
    pub fn udp_socket(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.udp_port)
    }
}

/// A known peer: its identifier, the public key the identifier was derived
/// from and its last advertised endpoint.
///
/// Two records describe the same peer iff their identifiers match. The table
/// adopts the most recent record on refresh, so endpoint changes propagate
/// without the peer losing its place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct Node {
    id: Id,
    #[cfg_attr(feature = "codec", bincode(with_serde))]
    public_key: Bytes,
    endpoint: Endpoint,
}

impl Node {
    /// Creates a new peer record.
    ///
    /// The identifier is expected to be derived from the public key by the
    /// embedder (keccak-256 of the uncompressed key in Ethereum discovery);
    /// the table treats both as opaque.
    pub fn new(id: Id, public_key: Bytes, endpoint: Endpoint) -> Self {
        Self {
            id,
            public_key,
            endpoint,
        }
    }

    /// Returns the peer's identifier.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns the public key the identifier was derived from.
    pub fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    /// Returns the peer's last advertised endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn udp_socket() {
        let endpoint = Endpoint::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 30303, Some(30304));
        assert_eq!(endpoint.udp_socket(), "127.0.0.1:30303".parse().unwrap());
    }
}
