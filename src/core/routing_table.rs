//! Core routing table implementation.

use std::cmp;

use time::{Duration, OffsetDateTime};
use tracing::{debug, trace};

use crate::{
    core::{
        bucket::{Bucket, RefreshOutcome},
        id::Id,
        message::{Ping, Pong, PING_EXPIRY_SECS},
        node::Node,
        probes::{Contest, PendingProbes},
        traits::Wire,
    },
    error::Error,
};

/// The maximum number of peers a bucket holds (K).
pub const MAX_BUCKET_SIZE: usize = 16;

/// How long an emitted probe waits for its PONG before the incumbent counts
/// as dead.
pub const PROBE_TIMEOUT: Duration = Duration::seconds(2);

/// The core routing table implementation.
///
/// Owns the local node identity, one bucket per shared-prefix length and the
/// table of outstanding liveness probes. All mutations go through a single
/// owner; embedders that share the table across threads should use
/// [`SyncRoutingTable`](crate::SyncRoutingTable) (`sync` feature).
#[derive(Debug, Clone)]
pub struct RoutingTable<W> {
    // The local node's identity; never stored in a bucket.
    local: Node,
    // The maximum number of peers per bucket (K).
    max_bucket_size: usize,
    // One bucket per possible shared-prefix length.
    buckets: Vec<Bucket>,
    // Outstanding liveness probes keyed by PING digest.
    pending_probes: PendingProbes,
    // How long a probe waits for its PONG.
    probe_timeout: Duration,
    // The outbound send capability.
    wire: W,
}

impl<W: Wire> RoutingTable<W> {
    /// Creates a routing table with the default bucket capacity, identifier
    /// width and probe timeout.
    pub fn new(local: Node, wire: W) -> Self {
        Self::with_config(local, wire, MAX_BUCKET_SIZE, Id::BITS, PROBE_TIMEOUT)
    }

    /// Creates a routing table with explicit bucket capacity, identifier
    /// width (the number of buckets) and probe timeout.
    pub fn with_config(
        local: Node,
        wire: W,
        max_bucket_size: usize,
        id_bits: usize,
        probe_timeout: Duration,
    ) -> Self {
        debug_assert!(max_bucket_size > 0);
        debug_assert!(id_bits > 0 && id_bits <= Id::BITS);

        Self {
            local,
            max_bucket_size,
            buckets: vec![Bucket::default(); id_bits],
            pending_probes: PendingProbes::default(),
            probe_timeout,
            wire,
        }
    }

    /// Returns the local node's identifier.
    pub fn local_id(&self) -> &Id {
        self.local.id()
    }

    /// Returns the local node's record.
    pub fn local_node(&self) -> &Node {
        &self.local
    }

    /// Returns the bucket index an identifier maps to: the number of leading
    /// bits it shares with the local identifier, clamped to the deepest
    /// bucket.
    pub fn bucket_index(&self, id: &Id) -> usize {
        cmp::min(
            self.local.id().common_prefix_length(id) as usize,
            self.buckets.len() - 1,
        )
    }

    /// Records a sighting of a peer.
    ///
    /// A known peer is moved to the tail of its bucket and its record is
    /// adopted; a new peer is appended if its bucket has room. When the
    /// bucket is full the peer instead challenges the bucket's
    /// least-recently-seen entry: a PING is emitted towards the incumbent
    /// and the contest is resolved by [`handle_pong`](Self::handle_pong) or
    /// [`sweep_expired_probes`](Self::sweep_expired_probes).
    ///
    /// A record carrying the local identifier is silently ignored.
    pub fn refresh_node(&mut self, node: Node) -> Result<(), Error> {
        if node.id() == self.local.id() {
            trace!("ignoring a refresh for the local identifier");
            return Ok(());
        }

        let i = self.bucket_index(node.id());
        match self.buckets[i].refresh_node(node, self.max_bucket_size) {
            RefreshOutcome::Reordered => {
                trace!(bucket = i, "moved a refreshed peer to the tail");
                Ok(())
            }
            RefreshOutcome::Inserted => {
                debug!(bucket = i, "inserted a new peer");
                Ok(())
            }
            RefreshOutcome::Full {
                incumbent,
                challenger,
            } => self.start_contest(i, incumbent, challenger),
        }
    }

    // Emits a liveness probe to the incumbent and records the contest. The
    // bucket is only modified once the contest resolves: a fresh PONG keeps
    // the incumbent, an expired probe lets the challenger in.
    fn start_contest(
        &mut self,
        bucket: usize,
        incumbent: Node,
        challenger: Node,
    ) -> Result<(), Error> {
        let now = OffsetDateTime::now_utc();
        let ping = Ping {
            from: self.local.endpoint().clone(),
            to: incumbent.endpoint().clone(),
            expiration: now.unix_timestamp() + PING_EXPIRY_SECS,
        };

        let digest = self.wire.send_ping(ping, incumbent.endpoint())?;
        debug!(bucket, "bucket full, probing the least-recently-seen peer");

        self.pending_probes.insert(
            digest,
            Contest {
                incumbent,
                challenger,
                deadline: now + self.probe_timeout,
            },
        );

        Ok(())
    }

    /// Removes the peer from its bucket, if present.
    ///
    /// Outstanding probes referencing the peer are left alone: a late PONG
    /// simply re-inserts the incumbent, and an expiring contest finds the
    /// slot already free.
    pub fn remove_node(&mut self, node: &Node) {
        let i = self.bucket_index(node.id());
        if self.buckets[i].remove_node(node.id()).is_some() {
            debug!(bucket = i, "removed a peer");
        }
    }

    /// Returns up to K known peers closest to the target by XOR distance,
    /// closest first.
    ///
    /// Buckets are visited outward from the one the target maps to, which
    /// over-collects slightly; the final sort-and-truncate recovers the
    /// closest set among the visited buckets.
    pub fn neighbours(&self, target: &Id) -> Vec<Node> {
        let origin = self.bucket_index(target);
        let mut found: Vec<Node> = self.buckets[origin].nodes().cloned().collect();

        for step in 1usize.. {
            let below = origin.checked_sub(step);
            let above = Some(origin + step).filter(|&i| i < self.buckets.len());

            if (below.is_none() && above.is_none()) || found.len() > self.max_bucket_size {
                break;
            }

            if let Some(i) = below {
                found.extend(self.buckets[i].nodes().cloned());
            }
            if let Some(i) = above {
                found.extend(self.buckets[i].nodes().cloned());
            }
        }

        found.sort_unstable_by_key(|node| node.id().xor(target));
        found.truncate(self.max_bucket_size);

        found
    }

    /// Feeds a decoded PONG back into the table.
    ///
    /// A fresh PONG matching an outstanding probe proves the incumbent
    /// alive: it moves back to the tail of its bucket and the challenger is
    /// discarded. An unmatched but fresh PONG carrying the sender's record
    /// counts as first contact and the sender is refreshed into the table.
    /// Stale PONGs are dropped, though a matching probe entry is still
    /// retired.
    pub fn handle_pong(&mut self, pong: Pong, sender: Option<Node>) -> Result<(), Error> {
        let contest = self.pending_probes.pop(&pong.digest);
        let fresh = pong.expiration > OffsetDateTime::now_utc().unix_timestamp();

        match (contest, sender) {
            (Some(contest), _) if fresh => {
                // The incumbent answered in time and keeps its slot. If it
                // was removed while the probe was in flight this becomes a
                // plain insert.
                debug!("incumbent answered its probe, challenger discarded");
                self.refresh_node(contest.incumbent)
            }
            (_, Some(sender)) if fresh => {
                debug!("adopting the sender of an unsolicited fresh pong");
                self.refresh_node(sender)
            }
            _ => {
                trace!("dropping a stale or unmatched pong");
                Ok(())
            }
        }
    }

    /// Resolves every probe whose deadline has passed: the silent incumbent
    /// is evicted and its challenger takes the freed slot.
    ///
    /// The owner is expected to call this periodically, at roughly the probe
    /// timeout's cadence. Admitting a challenger into a bucket that refilled
    /// in the meantime may itself open a new contest.
    pub fn sweep_expired_probes(&mut self) -> Result<(), Error> {
        let now = OffsetDateTime::now_utc();

        for contest in self.pending_probes.drain_expired(now) {
            debug!("incumbent missed its probe deadline, admitting challenger");
            self.remove_node(&contest.incumbent);
            self.refresh_node(contest.challenger)?;
        }

        Ok(())
    }

    /// Returns `true` if a peer with the node's identifier is in the table.
    pub fn contains(&self, node: &Node) -> bool {
        self.buckets[self.bucket_index(node.id())].contains(node.id())
    }

    /// Returns the peers in bucket `i`, least-recently-seen first.
    pub fn nodes_at(&self, i: usize) -> impl Iterator<Item = &Node> {
        self.buckets[i].nodes()
    }

    /// Read-only view of the buckets, ordered by shared-prefix length.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns the number of outstanding liveness probes.
    pub fn pending_probe_count(&self) -> usize {
        self.pending_probes.len()
    }

    /// Returns the total number of peers across all buckets.
    pub fn node_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}
