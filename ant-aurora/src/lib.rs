// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![allow(clippy::expect_used)]

//! Aurora peer-discovery defense core
//!
//! A probabilistic walk engine layered over Kademlia-style peer discovery
//! that detects eclipse/clique attacks while collecting peers and choosing
//! a chain-sync target, and aborts bootstrap when the surrounding
//! neighborhood looks adversarial.
//!
//! Five cooperating components, leaves-first:
//!
//! - [`kernel`] — hypergeometric PMF/CDF/median and small dense matrix inverse.
//! - [`distance`] — expected walk length from an absorbing Markov chain.
//! - [`mistake`] — per-hop suspicion quantification.
//! - [`walk`] — the bounded random walk state machine.
//! - [`tally`] — aggregation of independent walks into a best-scored decision.
//!
//! The Kademlia discovery service, event bus, and chain-head retrieval are
//! out of scope: this crate consumes them only through the traits in
//! [`interfaces`].

#[macro_use]
extern crate tracing;

pub mod config;
pub mod core;
pub mod distance;
pub mod error;
pub mod interfaces;
pub mod kernel;
pub mod mistake;
pub mod tally;
pub mod walk;

pub use config::{AuroraConfig, NetworkParams, Thresholds};
pub use core::AuroraCore;
pub use error::{AuroraError, Result};
pub use interfaces::{HeadHashOracle, KademliaId, NeighborLookup, ShutdownSink};
pub use tally::{CandidateKey, TallyOutcome};
