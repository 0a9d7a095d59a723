// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Collaborator contracts consumed by the walk engine.
//!
//! Aurora does not own any sockets, routing tables, or peer sessions; every
//! piece of I/O is delegated to a collaborator injected by the host. These
//! traits are the entire surface the core depends on.

use std::time::Duration;

use async_trait::async_trait;
use libp2p_identity::PeerId;

use crate::error::Result;
use crate::tally::CandidateKey;

/// A point in the Kademlia XOR-metric id space, used as the lookup target for a hop.
pub type KademliaId = [u8; 32];

/// Issues Kademlia `FIND_NODE` lookups against a peer.
#[async_trait]
pub trait NeighborLookup: Send + Sync {
    /// Asks `target` for the peers it knows closest to `random_id`.
    ///
    /// Returns at most the discovery service's configured bucket size.
    /// Fails with [`crate::error::AuroraError::Timeout`] or
    /// [`crate::error::AuroraError::Cancelled`].
    async fn find_node(&self, target: PeerId, random_id: KademliaId) -> Result<Vec<PeerId>>;
}

/// Establishes or reuses a peer session and retrieves the chain-head hash.
#[async_trait]
pub trait HeadHashOracle: Send + Sync {
    /// Fails with [`crate::error::AuroraError::Timeout`] if no session could
    /// be established within `timeout`.
    async fn head_hash(&self, peer: PeerId, timeout: Duration) -> Result<CandidateKey>;
}

/// Fire-and-forget request that the host process terminate.
#[async_trait]
pub trait ShutdownSink: Send + Sync {
    /// Invoked exactly once, when the tally reports a clique.
    async fn broadcast_shutdown(&self, reason: &str);
}
