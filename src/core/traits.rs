//! The outbound send capability the routing table drives.

use std::io;

use crate::core::{
    message::{Digest, Ping},
    node::Endpoint,
};

/// The send capability consumed by the routing table.
///
/// An implementation encodes, signs and transmits the PING on whatever
/// socket it manages and returns the wire-level digest (MDC) of the emitted
/// datagram. The digest is the key the table later matches the answering
/// PONG against.
///
/// Errors propagate to the table's caller; the table stays unchanged when a
/// send fails.
pub trait Wire {
    /// Emits a PING towards the endpoint, returning the digest of the
    /// message as it went out on the wire.
    fn send_ping(&self, ping: Ping, to: &Endpoint) -> io::Result<Digest>;
}

impl<W: Wire + ?Sized> Wire for &W {
    fn send_ping(&self, ping: Ping, to: &Endpoint) -> io::Result<Digest> {
        (**self).send_ping(ping, to)
    }
}

// Lets the socket handle be shared between the table and its owner.
impl<W: Wire + ?Sized> Wire for std::sync::Arc<W> {
    fn send_ping(&self, ping: Ping, to: &Endpoint) -> io::Result<Digest> {
        (**self).send_ping(ping, to)
    }
}
