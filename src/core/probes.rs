//! Correlation table for outstanding liveness probes.

use std::collections::HashMap;

use time::OffsetDateTime;

use crate::core::{message::Digest, node::Node};

/// A full-bucket arbitration in flight: the probed incumbent, the challenger
/// waiting on the outcome and the deadline after which the incumbent counts
/// as having failed its liveness check.
#[derive(Debug, Clone)]
pub(crate) struct Contest {
    pub(crate) incumbent: Node,
    pub(crate) challenger: Node,
    pub(crate) deadline: OffsetDateTime,
}

/// Maps the digest of an emitted PING to the contest awaiting its PONG.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingProbes {
    probes: HashMap<Digest, Contest>,
}

impl PendingProbes {
    pub(crate) fn insert(&mut self, digest: Digest, contest: Contest) {
        let _prev = self.probes.insert(digest, contest);
        // Digests are message hashes, two live probes can't share one.
        debug_assert!(_prev.is_none());
    }

    /// Atomically removes and returns the contest keyed by the digest.
    pub(crate) fn pop(&mut self, digest: &Digest) -> Option<Contest> {
        self.probes.remove(digest)
    }

    pub(crate) fn len(&self) -> usize {
        self.probes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Removes and returns every contest whose deadline has passed.
    pub(crate) fn drain_expired(&mut self, now: OffsetDateTime) -> Vec<Contest> {
        let expired: Vec<Digest> = self
            .probes
            .iter()
            .filter(|(_, contest)| contest.deadline <= now)
            .map(|(digest, _)| *digest)
            .collect();

        expired
            .iter()
            .filter_map(|digest| self.probes.remove(digest))
            .collect()
    }
}
