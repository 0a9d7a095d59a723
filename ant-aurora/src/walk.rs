// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The bounded random walk: one pass over the overlay network, instrumented
//! with mistake accumulation and adaptive length.

use std::collections::HashSet;
use std::time::Duration;

use libp2p_identity::PeerId;
use rand::seq::IteratorRandom;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::config::{NetworkParams, Thresholds};
use crate::distance::{assumed_malicious, estimate_distance};
use crate::error::{AuroraError, Result};
use crate::interfaces::{HeadHashOracle, NeighborLookup};
use crate::mistake::mistake;
use crate::tally::CandidateKey;

const HEAD_HASH_TIMEOUT: Duration = Duration::from_secs(60);

/// The outcome of a single completed walk.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// `1 - accumulated_mistake / T`; `0.0` exactly when the walk was aborted.
    pub correctness_indicator: f64,
    /// The terminal node's head hash, or `None` if the walk aborted.
    pub candidate_key: Option<CandidateKey>,
    /// Every peer identity observed across all hops of this walk.
    pub collected: HashSet<PeerId>,
}

/// Mutable state threaded through the hops of one walk. Never exposed
/// outside this module; callers only see the resulting [`WalkOutcome`].
struct WalkState {
    distance: f64,
    iteration: u32,
    accumulated_mistake: f64,
    collected: HashSet<PeerId>,
    current: PeerId,
}

/// Runs one bounded walk starting at `entry`, using `lookup` for
/// neighbor-lookup RPCs and `head` for the terminal head-hash retrieval.
///
/// `rng` drives every random choice made along the walk (the per-hop
/// Kademlia lookup target and `pick`'s next-hop selection); feeding it a
/// seeded `rand::rngs::StdRng` and identical neighbor responses makes the
/// whole walk reproducible.
///
/// Hop ordering matches the reference design: issue lookup, compute
/// overlap before updating `collected`, update `collected`, accumulate
/// mistake, adapt distance, pick next hop, check saturation, check abort.
pub async fn walk_once<L, H, R>(
    entry: PeerId,
    params: &NetworkParams,
    thresholds: &Thresholds,
    lookup: &L,
    head: &H,
    cancel: &CancellationToken,
    rng: &mut R,
) -> Result<WalkOutcome>
where
    L: NeighborLookup,
    H: HeadHashOracle,
    R: Rng + ?Sized,
{
    let malicious = assumed_malicious(params.n);
    let mut state = WalkState {
        distance: estimate_distance(params.n, malicious, params.r)?,
        iteration: 0,
        accumulated_mistake: 0.0,
        collected: HashSet::new(),
        current: entry,
    };

    info!(
        distance = state.distance,
        mistake_threshold = thresholds.mistake_threshold,
        "starting aurora walk from {entry}"
    );

    while (state.iteration as f64) < state.distance {
        if cancel.is_cancelled() {
            return Err(AuroraError::Cancelled);
        }

        let target_id = random_kademlia_id(rng);
        let candidates = lookup.find_node(state.current, target_id).await?;
        let sample_size = candidates.len() as u64;
        let candidate_set: HashSet<PeerId> = candidates.into_iter().collect();

        let k_obs = state.collected.intersection(&candidate_set).count() as u64;
        state.collected.extend(candidate_set.iter().copied());

        let step_mistake = mistake(params.n, malicious, sample_size, k_obs)?;
        state.accumulated_mistake += step_mistake;
        state.distance += (step_mistake.min(1.0) - 0.5) / 0.5;

        let next = pick(&candidate_set, &state.collected, rng)
            .map_err(AuroraError::no_candidates_as_connection_refused)?;

        debug!(
            iteration = state.iteration,
            distance = state.distance,
            k_obs,
            sample_size,
            accumulated_mistake = state.accumulated_mistake,
            step_mistake,
            "completed aurora hop"
        );

        if state.collected.len() as u64 >= params.n {
            info!("walk saturated the network, stopping");
            return complete(state, thresholds, head, cancel).await;
        }

        state.current = next;
        state.iteration += 1;

        if state.accumulated_mistake >= thresholds.mistake_threshold {
            info!("aurora assumes malicious activity, aborting walk");
            return Ok(WalkOutcome {
                correctness_indicator: 0.0,
                candidate_key: None,
                collected: state.collected,
            });
        }
    }

    complete(state, thresholds, head, cancel).await
}

/// Terminal handling shared by the `Exhausted` and `Saturated` end states:
/// compute the correctness indicator and fetch the terminal node's head hash.
async fn complete<H: HeadHashOracle>(
    state: WalkState,
    thresholds: &Thresholds,
    head: &H,
    cancel: &CancellationToken,
) -> Result<WalkOutcome> {
    if cancel.is_cancelled() {
        return Err(AuroraError::Cancelled);
    }

    let correctness_indicator = 1.0 - (state.accumulated_mistake / thresholds.mistake_threshold);
    let candidate_key = head
        .head_hash(state.current, HEAD_HASH_TIMEOUT)
        .await
        .map_err(|_| AuroraError::ConnectionRefused)?;

    Ok(WalkOutcome {
        correctness_indicator,
        candidate_key: Some(candidate_key),
        collected: state.collected,
    })
}

/// `fresh = candidates \ excluded`; a uniformly random element of `fresh` if
/// non-empty, else a uniformly random element of `excluded`.
pub fn pick<R: Rng + ?Sized>(
    candidates: &HashSet<PeerId>,
    excluded: &HashSet<PeerId>,
    rng: &mut R,
) -> Result<PeerId> {
    let fresh: Vec<&PeerId> = candidates.difference(excluded).collect();
    if let Some(peer) = fresh.into_iter().choose(rng) {
        return Ok(*peer);
    }
    if let Some(peer) = excluded.iter().choose(rng) {
        return Ok(*peer);
    }
    Err(AuroraError::NoCandidates)
}

fn random_kademlia_id<R: Rng + ?Sized>(rng: &mut R) -> [u8; 32] {
    let mut id = [0u8; 32];
    rng.fill_bytes(&mut id);
    id
}
