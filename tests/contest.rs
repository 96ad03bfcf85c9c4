//! Full-bucket eviction contests exercised through the public API.

use std::sync::Arc;

use kadence::{message::Pong, Id, Node, RoutingTable, MAX_BUCKET_SIZE};
use time::{Duration, OffsetDateTime};

mod common;
use crate::common::{digest, distinct_ids_sharing_prefix, node_with_id, RecordingWire};

const BUCKET: u32 = 10;

fn fresh_expiration() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp() + 60
}

// Fills bucket `BUCKET` to capacity and returns the table, the wire handle
// and the peers in insertion (least-recently-seen first) order.
fn saturated_table(
    probe_timeout: Duration,
) -> (RoutingTable<Arc<RecordingWire>>, Arc<RecordingWire>, Vec<Node>) {
    let local = node_with_id(Id::rand(), 30303);
    let wire = Arc::new(RecordingWire::default());
    let mut table = RoutingTable::with_config(
        local.clone(),
        Arc::clone(&wire),
        MAX_BUCKET_SIZE,
        Id::BITS,
        probe_timeout,
    );

    let peers: Vec<Node> = distinct_ids_sharing_prefix(local.id(), BUCKET, MAX_BUCKET_SIZE)
        .into_iter()
        .enumerate()
        .map(|(i, id)| node_with_id(id, 40000 + i as u16))
        .collect();

    for peer in &peers {
        table.refresh_node(peer.clone()).unwrap();
    }

    assert_eq!(table.nodes_at(BUCKET as usize).count(), MAX_BUCKET_SIZE);
    assert_eq!(wire.sent_count(), 0);

    (table, wire, peers)
}

#[test]
fn incumbent_answers_and_keeps_its_slot() {
    let (mut table, wire, peers) = saturated_table(kadence::PROBE_TIMEOUT);
    let head = peers[0].clone();

    // A seventeenth peer mapping to the same bucket challenges the head.
    let challenger = node_with_id(common::id_sharing_prefix(peers[0].id(), 200), 50000);
    assert_eq!(table.bucket_index(challenger.id()), BUCKET as usize);
    table.refresh_node(challenger.clone()).unwrap();

    // Exactly one probe went out, towards the head.
    assert_eq!(wire.sent_count(), 1);
    let (ping, to) = wire.last_sent();
    assert_eq!(&to, head.endpoint());
    assert_eq!(&ping.to, head.endpoint());
    assert_eq!(table.pending_probe_count(), 1);

    // The bucket was not modified while the contest was pending.
    let ids: Vec<Id> = table.nodes_at(BUCKET as usize).map(|n| *n.id()).collect();
    assert_eq!(ids.first(), Some(head.id()));
    assert!(!table.contains(&challenger));

    // The head answers in time: it moves to the tail, the challenger is
    // dropped and the probe is retired.
    let pong = Pong {
        digest: digest(1),
        expiration: fresh_expiration(),
    };
    table.handle_pong(pong, None).unwrap();

    let ids: Vec<Id> = table.nodes_at(BUCKET as usize).map(|n| *n.id()).collect();
    assert_eq!(ids.len(), MAX_BUCKET_SIZE);
    assert_eq!(ids.last(), Some(head.id()));
    assert_eq!(ids.first(), Some(peers[1].id()));
    assert!(!table.contains(&challenger));
    assert_eq!(table.pending_probe_count(), 0);
}

#[test]
fn silent_incumbent_is_replaced() {
    // A zero timeout expires every probe as soon as it is recorded.
    let (mut table, wire, peers) = saturated_table(Duration::ZERO);
    let head = peers[0].clone();

    let challenger = node_with_id(common::id_sharing_prefix(peers[0].id(), 200), 50000);
    table.refresh_node(challenger.clone()).unwrap();
    assert_eq!(wire.sent_count(), 1);

    table.sweep_expired_probes().unwrap();

    // The head is gone, the challenger sits at the tail and the bucket is
    // still at capacity.
    let ids: Vec<Id> = table.nodes_at(BUCKET as usize).map(|n| *n.id()).collect();
    assert_eq!(ids.len(), MAX_BUCKET_SIZE);
    assert!(!table.contains(&head));
    assert_eq!(ids.last(), Some(challenger.id()));
    assert_eq!(table.pending_probe_count(), 0);
}

#[test]
fn unsolicited_fresh_pong_is_first_contact() {
    let local = node_with_id(Id::rand(), 30303);
    let wire = Arc::new(RecordingWire::default());
    let mut table = RoutingTable::new(local.clone(), wire);

    let sender = node_with_id(common::id_sharing_prefix(local.id(), 42), 40000);
    let pong = Pong {
        digest: digest(99),
        expiration: fresh_expiration(),
    };

    table.handle_pong(pong, Some(sender.clone())).unwrap();

    assert!(table.contains(&sender));
    assert_eq!(table.bucket_index(sender.id()), 42);
}

#[test]
fn stale_pong_changes_nothing() {
    let local = node_with_id(Id::rand(), 30303);
    let wire = Arc::new(RecordingWire::default());
    let mut table = RoutingTable::new(local.clone(), wire);

    let sender = node_with_id(common::id_sharing_prefix(local.id(), 42), 40000);
    let pong = Pong {
        digest: digest(99),
        expiration: OffsetDateTime::now_utc().unix_timestamp(),
    };

    table.handle_pong(pong, Some(sender.clone())).unwrap();

    assert!(!table.contains(&sender));
    assert_eq!(table.node_count(), 0);
}
