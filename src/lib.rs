//! A Kademlia routing table core for Ethereum-style node discovery.
//!
//! The table maintains a bounded, self-healing directory of known peers,
//! organised into buckets by the length of the binary prefix each peer's
//! identifier shares with the local one. Neighbour queries walk the buckets
//! outward from a target and return the closest known peers by XOR distance;
//! stale peers are evicted through a round-trip liveness probe: when a bucket
//! is full, the least-recently-seen incumbent is pinged, and only if it fails
//! to answer in time does the challenger take its place.
//!
//! Transport, wire encoding and cryptography live outside this crate. The
//! table drives a [`Wire`] implementation to emit probes and is fed the
//! decoded [`Pong`](message::Pong)s the embedder's socket loop receives.
//!
//! ## Features
//!
//! - `codec`: derives `bincode`'s `Encode`/`Decode` on the public types.
//! - `sync`: a lock-wrapped [`SyncRoutingTable`] for multi-threaded embedders.

#![cfg_attr(doc_cfg, feature(doc_cfg))]

mod core;
mod error;

pub use crate::{
    core::{
        bucket::Bucket,
        id::Id,
        message,
        node::{Endpoint, Node},
        routing_table::{RoutingTable, MAX_BUCKET_SIZE, PROBE_TIMEOUT},
        traits::Wire,
    },
    error::Error,
};

#[cfg(feature = "sync")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
pub use crate::core::sync::SyncRoutingTable;
