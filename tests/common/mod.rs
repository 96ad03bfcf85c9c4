#![allow(dead_code)]

use std::{
    io,
    net::{IpAddr, Ipv4Addr},
    sync::Mutex,
};

use bytes::Bytes;
use kadence::{
    message::{Digest, Ping},
    Endpoint, Id, Node, Wire,
};
use tracing_subscriber::{fmt, EnvFilter};

pub fn enable_tracing() {
    fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Records emitted pings and hands out sequential digests.
#[derive(Debug, Default)]
pub struct RecordingWire {
    pub sent: Mutex<Vec<(Ping, Endpoint)>>,
}

impl RecordingWire {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> (Ping, Endpoint) {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }
}

impl Wire for RecordingWire {
    fn send_ping(&self, ping: Ping, to: &Endpoint) -> io::Result<Digest> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((ping, to.clone()));

        Ok(digest(sent.len() as u64))
    }
}

/// The digest the recording wire hands out for its `raw`-th send
/// (1-indexed).
pub fn digest(raw: u64) -> Digest {
    let mut digest = [0u8; 32];
    digest[..8].copy_from_slice(&raw.to_be_bytes());
    digest
}

pub fn endpoint(port: u16) -> Endpoint {
    Endpoint::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port, None)
}

pub fn node_with_id(id: Id, port: u16) -> Node {
    Node::new(id, Bytes::from_static(&[0u8; 64]), endpoint(port))
}

/// Returns an identifier sharing exactly `prefix` leading bits with `base`,
/// with the trailing bits scrambled.
pub fn id_sharing_prefix(base: &Id, prefix: u32) -> Id {
    let mut bytes = base.bytes();
    let byte = (prefix / 8) as usize;
    let bit = 7 - (prefix % 8);

    bytes[byte] ^= 1 << bit;
    for b in bytes[byte + 1..].iter_mut() {
        *b = rand::random();
    }

    Id::new(bytes)
}

/// Returns `n` distinct identifiers all sharing exactly `prefix` leading
/// bits with `base`.
pub fn distinct_ids_sharing_prefix(base: &Id, prefix: u32, n: usize) -> Vec<Id> {
    let mut ids: Vec<Id> = Vec::with_capacity(n);
    while ids.len() < n {
        let id = id_sharing_prefix(base, prefix);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    ids
}
