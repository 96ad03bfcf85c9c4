//! A bounded, recency-ordered list of peers sharing a prefix length.

use std::collections::VecDeque;

use crate::core::{id::Id, node::Node};

/// The outcome of refreshing a node against a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RefreshOutcome {
    /// The peer was already present; its record was adopted and moved to the
    /// tail.
    Reordered,
    /// The peer was appended at the tail.
    Inserted,
    /// The bucket is at capacity and was left untouched. The head incumbent
    /// must prove liveness before the challenger may take its place.
    Full { incumbent: Node, challenger: Node },
}

/// A bounded list of peers ordered by recency: the head is the
/// least-recently-seen entry and the designated eviction candidate, the tail
/// the most-recently-seen.
///
/// Refreshes are the only reordering trigger, which keeps the head's
/// eviction-candidate role well-defined.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    nodes: VecDeque<Node>,
}

impl Bucket {
    /// Returns `true` if a peer with the identifier is present.
    pub fn contains(&self, id: &Id) -> bool {
        self.nodes.iter().any(|entry| entry.id() == id)
    }

    /// Returns the peers in the bucket, least-recently-seen first.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the number of peers in the bucket.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the bucket holds no peers.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn refresh_node(&mut self, node: Node, capacity: usize) -> RefreshOutcome {
        if let Some(position) = self.nodes.iter().position(|entry| entry.id() == node.id()) {
            // Adopt the incoming record, the endpoint may have changed.
            self.nodes.remove(position);
            self.nodes.push_back(node);

            return RefreshOutcome::Reordered;
        }

        if self.nodes.len() < capacity {
            self.nodes.push_back(node);

            return RefreshOutcome::Inserted;
        }

        // At capacity: leave the bucket untouched and report the
        // least-recently-seen entry for liveness arbitration.
        let incumbent = self
            .nodes
            .front()
            .cloned()
            .expect("bucket capacity is at least one");

        RefreshOutcome::Full {
            incumbent,
            challenger: node,
        }
    }

    pub(crate) fn remove_node(&mut self, id: &Id) -> Option<Node> {
        let position = self.nodes.iter().position(|entry| entry.id() == id)?;
        self.nodes.remove(position)
    }
}
