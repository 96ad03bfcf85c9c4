//! Discovery probe messages exchanged with the wire layer.

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};

use crate::core::node::Endpoint;

/// The wire-level digest (MDC) of an emitted message.
///
/// Returned by the send capability and used as the correlation key between a
/// PING and the PONG answering it. Opaque to the routing table.
pub type Digest = [u8; 32];

/// Seconds an emitted PING stays valid on the wire before receivers discard
/// it.
pub(crate) const PING_EXPIRY_SECS: i64 = 60;

/// The data making up a PING message.
///
/// Constructed by the routing table when a full bucket triggers a liveness
/// probe; encoding, signing and transmission are the wire layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct Ping {
    /// The sender's endpoint.
    pub from: Endpoint,
    /// The recipient's endpoint.
    pub to: Endpoint,
    /// Unix-seconds deadline after which receivers should discard the
    /// message.
    pub expiration: i64,
}

/// The data making up a PONG message, decoded by the wire layer and fed back
/// into the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct Pong {
    /// Digest of the PING this message answers.
    pub digest: Digest,
    /// Unix-seconds deadline after which the message counts as stale.
    pub expiration: i64,
}
