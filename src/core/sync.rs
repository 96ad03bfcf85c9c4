//! A lock-wrapped routing table for use across threads.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    core::{
        bucket::Bucket,
        id::Id,
        message::Pong,
        node::Node,
        routing_table::RoutingTable,
        traits::Wire,
    },
    error::Error,
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
/// A routing table wrapper suitable for multi-threaded embedders.
///
/// It wraps [`RoutingTable`] in a read-write lock, serialising every state
/// transition through one logical owner as the core requires. Clones share
/// the same underlying table.
#[derive(Debug)]
pub struct SyncRoutingTable<W> {
    routing_table: Arc<RwLock<RoutingTable<W>>>,
}

impl<W> Clone for SyncRoutingTable<W> {
    fn clone(&self) -> Self {
        Self {
            routing_table: Arc::clone(&self.routing_table),
        }
    }
}

impl<W: Wire> SyncRoutingTable<W> {
    /// Creates a new lock-wrapped routing table with the default
    /// configuration.
    pub fn new(local: Node, wire: W) -> Self {
        Self {
            routing_table: Arc::new(RwLock::new(RoutingTable::new(local, wire))),
        }
    }

    /// See [`RoutingTable::with_config`].
    pub fn with_config(
        local: Node,
        wire: W,
        max_bucket_size: usize,
        id_bits: usize,
        probe_timeout: time::Duration,
    ) -> Self {
        Self {
            routing_table: Arc::new(RwLock::new(RoutingTable::with_config(
                local,
                wire,
                max_bucket_size,
                id_bits,
                probe_timeout,
            ))),
        }
    }

    /// Returns the local node's identifier.
    pub fn local_id(&self) -> Id {
        *self.routing_table.read().local_id()
    }

    /// See [`RoutingTable::refresh_node`].
    pub fn refresh_node(&self, node: Node) -> Result<(), Error> {
        self.routing_table.write().refresh_node(node)
    }

    /// See [`RoutingTable::remove_node`].
    pub fn remove_node(&self, node: &Node) {
        self.routing_table.write().remove_node(node)
    }

    /// See [`RoutingTable::neighbours`].
    pub fn neighbours(&self, target: &Id) -> Vec<Node> {
        self.routing_table.read().neighbours(target)
    }

    /// See [`RoutingTable::handle_pong`].
    pub fn handle_pong(&self, pong: Pong, sender: Option<Node>) -> Result<(), Error> {
        self.routing_table.write().handle_pong(pong, sender)
    }

    /// See [`RoutingTable::sweep_expired_probes`].
    pub fn sweep_expired_probes(&self) -> Result<(), Error> {
        self.routing_table.write().sweep_expired_probes()
    }

    /// See [`RoutingTable::contains`].
    pub fn contains(&self, node: &Node) -> bool {
        self.routing_table.read().contains(node)
    }

    /// See [`RoutingTable::bucket_index`].
    pub fn bucket_index(&self, id: &Id) -> usize {
        self.routing_table.read().bucket_index(id)
    }

    /// Returns a clone of the peers in bucket `i`, least-recently-seen
    /// first.
    pub fn nodes_at(&self, i: usize) -> Vec<Node> {
        self.routing_table.read().nodes_at(i).cloned().collect()
    }

    /// Returns a snapshot of the buckets, ordered by shared-prefix length.
    pub fn buckets(&self) -> Vec<Bucket> {
        self.routing_table.read().buckets().to_vec()
    }

    /// See [`RoutingTable::pending_probe_count`].
    pub fn pending_probe_count(&self) -> usize {
        self.routing_table.read().pending_probe_count()
    }

    /// See [`RoutingTable::node_count`].
    pub fn node_count(&self) -> usize {
        self.routing_table.read().node_count()
    }
}
