// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Runtime parameters and their `clap`-derived CLI surface.

use clap::Args;

use crate::distance::assumed_malicious;

/// Immutable parameters for a single walk: network size, assumed malicious
/// count, and neighbor-response size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkParams {
    /// Total number of nodes in the network, `N`.
    pub n: u64,
    /// Assumed number of malicious nodes, `m`.
    pub m: u64,
    /// Neighbor-response size, `r`, clamped to `n` at construction.
    pub r: u64,
}

impl NetworkParams {
    /// Builds a new `NetworkParams`, clamping `r` to `n`.
    pub fn new(n: u64, m: u64, r: u64) -> Self {
        Self {
            n,
            m,
            r: r.min(n.max(1)),
        }
    }

    /// Builds `NetworkParams` with `m` defaulted to [`assumed_malicious`].
    pub fn with_assumed_malicious(n: u64, r: u64) -> Self {
        Self::new(n, assumed_malicious(n), r)
    }
}

/// Immutable parameters for a tally run: mistake threshold and walk count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Mistake threshold `T`; a walk aborts once its accumulated mistake reaches this.
    pub mistake_threshold: f64,
    /// Number of independent walks `K` the tally aggregates.
    pub num_of_walks: u32,
}

/// CLI/config surface for the Aurora defense core, mirroring the discovery
/// service's own configuration style (one doc comment per flag).
#[derive(Args, Debug, Clone, PartialEq)]
pub struct AuroraConfig {
    /// Assumed total size of the network, used to derive the default
    /// assumed-malicious count and to scale the walk length.
    #[clap(long, default_value_t = 2000)]
    pub network_size: u64,

    /// Accumulated mistake at which a walk is assumed to be stuck in a
    /// clique and aborted.
    #[clap(long, default_value_t = 50.0)]
    pub mistake_threshold: f64,

    /// Number of independent walks the tally aggregates before choosing a
    /// bootstrap target.
    #[clap(long, default_value_t = 1)]
    pub num_of_walks: u32,

    /// Maximum number of peers returned by a single neighbor lookup
    /// (defaults to the Kademlia bucket size).
    #[clap(long, default_value_t = 16)]
    pub neighbors_response_size: u64,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            network_size: 2000,
            mistake_threshold: 50.0,
            num_of_walks: 1,
            neighbors_response_size: 16,
        }
    }
}

impl AuroraConfig {
    /// Derives the validated runtime types from the parsed CLI flags.
    pub fn into_params_and_thresholds(&self) -> (NetworkParams, Thresholds) {
        let params =
            NetworkParams::with_assumed_malicious(self.network_size, self.neighbors_response_size);
        let thresholds = Thresholds {
            mistake_threshold: self.mistake_threshold,
            num_of_walks: self.num_of_walks,
        };
        (params, thresholds)
    }
}
