//! Crate error types.

use std::io;

use thiserror::Error;

/// Errors surfaced by routing table operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The send capability rejected an outbound PING. The table and the
    /// pending-probes map are left unchanged when this is returned.
    #[error("failed to emit liveness probe: {0}")]
    Send(#[from] io::Error),
}
