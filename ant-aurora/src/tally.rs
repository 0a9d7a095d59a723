// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Aggregates `K` independent walks into a single best head-hash decision.

use indexmap::IndexMap;
use libp2p_identity::PeerId;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::config::{NetworkParams, Thresholds};
use crate::error::{AuroraError, Result};
use crate::interfaces::{HeadHashOracle, NeighborLookup};
use crate::walk::{pick, walk_once, WalkOutcome};

/// A 32-byte chain-head hash used as the correctness table's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateKey(pub [u8; 32]);

/// Insertion-ordered map from candidate head hash to the list of
/// correctness indicators observed for it across independent walks.
///
/// `IndexMap` rather than `HashMap` so that `optimum`'s "first-inserted"
/// tie-break is reproducible instead of depending on hash iteration order.
pub type CorrectnessTable = IndexMap<CandidateKey, Vec<f64>>;

/// Result of aggregating `K` independent walks.
#[derive(Debug, Clone, Copy)]
pub enum TallyOutcome {
    /// The best-scoring candidate and its score.
    Winner { key: CandidateKey, score: f64 },
    /// No candidate had a positive score (all scores summed to zero).
    NoWinner,
}

/// Runs `thresholds.num_of_walks` independent walks, re-entering from peers
/// harvested in earlier walks, and returns the best-scored candidate.
///
/// `rng` is threaded through to every walk; re-running `tally` with an
/// identically-seeded `rng` and identical neighbor responses reproduces the
/// same sequence of hops and the same outcome.
///
/// Returns [`AuroraError::CliqueDetected`] the moment any walk aborts.
/// Returns [`AuroraError::Cancelled`] if `cancel` fires.
pub async fn tally<L, H, R>(
    entry: PeerId,
    params: &NetworkParams,
    thresholds: &Thresholds,
    lookup: &L,
    head: &H,
    cancel: &CancellationToken,
    rng: &mut R,
) -> Result<TallyOutcome>
where
    L: NeighborLookup,
    H: HeadHashOracle,
    R: Rng + ?Sized,
{
    let mut table: CorrectnessTable = IndexMap::new();
    let mut current = entry;
    let mut completed = 0u32;

    while completed < thresholds.num_of_walks {
        if cancel.is_cancelled() {
            return Err(AuroraError::Cancelled);
        }

        let outcome = match walk_once(current, params, thresholds, lookup, head, cancel, rng).await
        {
            Ok(outcome) => outcome,
            Err(AuroraError::ConnectionRefused) => {
                warn!("walk from {current} failed, retrying the same entry node");
                continue;
            }
            Err(err) => return Err(err),
        };

        if outcome.correctness_indicator == 0.0 {
            info!("clique detected during tally, aborting remaining walks");
            return Err(AuroraError::CliqueDetected);
        }

        let Some(candidate_key) = outcome.candidate_key else {
            warn!("walk from {current} produced no candidate key, retrying");
            continue;
        };

        table
            .entry(candidate_key)
            .or_default()
            .push(outcome.correctness_indicator);

        match pick(&outcome.collected, &Default::default(), rng)
            .map_err(AuroraError::no_candidates_as_connection_refused)
        {
            Ok(next) => current = next,
            Err(AuroraError::ConnectionRefused) => {
                warn!("no candidates to pick a next entry from after walk from {current}, retrying");
                continue;
            }
            Err(err) => return Err(err),
        }
        completed += 1;
    }

    Ok(optimum(&table))
}

/// Picks the candidate with the maximum `n * mean^3` score, where `n` is the
/// number of independent walks that confirmed it and `mean` is their
/// average correctness indicator. Ties are broken by insertion order.
pub fn optimum(table: &CorrectnessTable) -> TallyOutcome {
    let mut best: Option<(CandidateKey, f64)> = None;
    for (key, scores) in table {
        let sum: f64 = scores.iter().sum();
        if sum == 0.0 {
            continue;
        }
        let mean = sum / scores.len() as f64;
        let score = scores.len() as f64 * mean.powi(3);
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((*key, score)),
        }
    }
    match best {
        Some((key, score)) => TallyOutcome::Winner { key, score },
        None => TallyOutcome::NoWinner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> CandidateKey {
        CandidateKey([byte; 32])
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-2, "expected {b}, got {a}");
    }

    #[test]
    fn optimum_picks_highest_cubic_mean_score() {
        let mut table = CorrectnessTable::new();
        table.insert(key(1), vec![0.6, 0.51, 0.55]);
        table.insert(key(2), vec![0.91]);

        match optimum(&table) {
            TallyOutcome::Winner { key: winner, score } => {
                assert_eq!(winner, key(2));
                approx(score, 0.753);
            }
            TallyOutcome::NoWinner => panic!("expected a winner"),
        }
    }

    #[test]
    fn optimum_prefers_count_when_average_is_lower() {
        let mut table = CorrectnessTable::new();
        table.insert(key(1), vec![0.6, 0.51, 0.55]);
        table.insert(key(2), vec![0.4]);

        match optimum(&table) {
            TallyOutcome::Winner { key: winner, score } => {
                assert_eq!(winner, key(1));
                approx(score, 0.508);
            }
            TallyOutcome::NoWinner => panic!("expected a winner"),
        }
    }

    #[test]
    fn optimum_rewards_repeated_high_confidence_confirmation() {
        let mut table = CorrectnessTable::new();
        table.insert(key(1), vec![0.9, 0.9, 0.9]);
        table.insert(key(2), vec![0.91]);

        match optimum(&table) {
            TallyOutcome::Winner { key: winner, score } => {
                assert_eq!(winner, key(1));
                approx(score, 2.187);
            }
            TallyOutcome::NoWinner => panic!("expected a winner"),
        }
    }

    #[test]
    fn optimum_skips_zero_sum_candidates() {
        let mut table = CorrectnessTable::new();
        table.insert(key(1), vec![0.0, 0.0]);

        assert!(matches!(optimum(&table), TallyOutcome::NoWinner));
    }

    #[test]
    fn optimum_is_invariant_under_key_permutation_except_ties() {
        let mut forward = CorrectnessTable::new();
        forward.insert(key(1), vec![0.6, 0.51, 0.55]);
        forward.insert(key(2), vec![0.91]);

        let mut reversed = CorrectnessTable::new();
        reversed.insert(key(2), vec![0.91]);
        reversed.insert(key(1), vec![0.6, 0.51, 0.55]);

        let (TallyOutcome::Winner { key: a, .. }, TallyOutcome::Winner { key: b, .. }) =
            (optimum(&forward), optimum(&reversed))
        else {
            panic!("expected winners in both tables");
        };
        assert_eq!(a, b);
    }

    #[test]
    fn empty_table_has_no_winner() {
        let table = CorrectnessTable::new();
        assert!(matches!(optimum(&table), TallyOutcome::NoWinner));
    }
}
