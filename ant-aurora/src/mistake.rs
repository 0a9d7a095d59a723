// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Per-hop suspicion quantification.
//!
//! Measures how surprising the overlap between a neighbor response and the
//! peers already collected is, under the null hypothesis that the
//! responder is honest. An excess of "already known" peers in the
//! response suggests the responder is feeding the walker back into a
//! colluding clique.

use crate::error::Result;
use crate::kernel::Hypergeometric;

/// Quantifies the suspicion ("mistake") of a single neighbor-response observation.
///
/// `total_size` is the network size `N`, `success_states` is the assumed
/// malicious count `m`, `sample_size` is the size of the latest neighbor
/// response, and `observed_successes` is how many of those peers were
/// already present in the collected set.
pub fn mistake(
    total_size: u64,
    success_states: u64,
    sample_size: u64,
    observed_successes: u64,
) -> Result<f64> {
    let h = Hypergeometric::new(total_size, success_states, sample_size)?;
    let median = h.median();

    let p_good = h.cdf(median);
    let p_bad: f64 = ((median + 1)..=sample_size).map(|i| h.pmf(i)).sum();
    let p_seen: f64 = if observed_successes <= median {
        0.0
    } else {
        ((median + 1)..=observed_successes).map(|i| h.pmf(i)).sum()
    };

    if p_bad == 0.0 {
        return Ok(0.0);
    }
    let ratio = p_good / p_bad;
    let dampen = p_seen / p_bad;
    Ok(ratio * dampen)
}
