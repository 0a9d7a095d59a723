// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Error types for the ant-aurora crate.

use thiserror::Error;

/// Result type used throughout ant-aurora.
pub type Result<T, E = AuroraError> = std::result::Result<T, E>;

/// Errors produced by the Aurora walk engine and its numeric kernel.
#[derive(Debug, Error)]
pub enum AuroraError {
    /// A hypergeometric call was made outside its domain (e.g. `n > N`).
    #[error("invalid hypergeometric domain: {0}")]
    InvalidDomain(String),

    /// The distance estimator's `(I - Q)` matrix has no inverse for this parameter set.
    #[error("distance estimator matrix is singular for this (N, m, r)")]
    Singular,

    /// `pick` was called with no fresh candidates and no excluded candidates to fall back on.
    #[error("no candidates available to pick a next hop from")]
    NoCandidates,

    /// A peer-level failure within a single walk; the tally retries the same entry node.
    #[error("connection refused by peer during walk")]
    ConnectionRefused,

    /// A collaborator RPC (neighbor lookup or head-hash retrieval) timed out.
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// Accumulated mistake crossed the threshold: the surrounding neighborhood looks like a clique.
    #[error("clique detected: possible malicious network")]
    CliqueDetected,

    /// The walk or tally was cancelled by the caller.
    #[error("aurora walk cancelled")]
    Cancelled,
}

impl AuroraError {
    /// `NoCandidates` is a walk-local failure; per spec it is always surfaced to the
    /// tally as a retryable connection failure, never propagated as its own variant.
    pub(crate) fn no_candidates_as_connection_refused(self) -> Self {
        match self {
            AuroraError::NoCandidates => AuroraError::ConnectionRefused,
            other => other,
        }
    }
}
