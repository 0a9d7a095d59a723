// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Adaptive walk-length estimation from an absorbing Markov chain over
//! the hypergeometric kernel.

use crate::error::Result;
use crate::kernel::{Hypergeometric, Matrix};

/// Assumed number of malicious nodes for a network of size `n`: `ceil(n / 2) - 1`.
pub fn assumed_malicious(n: u64) -> u64 {
    n.div_ceil(2).saturating_sub(1)
}

/// Expected number of hops before the walk is assumed to have exited any
/// adversarial neighborhood, given network size `n`, assumed malicious
/// count `m` and per-hop neighbor-response size `r`.
///
/// Model: states `0..=m` where state `i` means `i` malicious peers have
/// already been revealed. State `m` is absorbing. The expected number of
/// steps to absorption starting from state 0 is the row-0 sum of
/// `(I - Q)^-1`, where `Q` is the transition matrix with the absorbing
/// row/column removed.
pub fn estimate_distance(n: u64, m: u64, r: u64) -> Result<f64> {
    let r = r.min(n);
    if m == 0 {
        // A single honest hop suffices when there is nothing to expose.
        return Ok(1.0);
    }

    let dim = (m + 1) as usize;
    let mut rows = vec![0.0; dim * dim];
    for row in 0..dim {
        let remaining_malicious = m - row as u64;
        let h = Hypergeometric::new(n, remaining_malicious, r)?;
        for col in row..dim {
            rows[row * dim + col] = h.pmf((col - row) as u64);
        }
    }
    let transition = Matrix::from_rows(dim, rows);

    // Drop the absorbing last row/column to get Q.
    let q_dim = dim - 1;
    let mut q_rows = vec![0.0; q_dim * q_dim];
    for row in 0..q_dim {
        for col in 0..q_dim {
            q_rows[row * q_dim + col] = transition.get(row, col);
        }
    }
    let q = Matrix::from_rows(q_dim, q_rows);

    let identity = Matrix::identity(q_dim);
    let fundamental = identity.sub(&q).inverse()?;
    Ok(fundamental.first_row_sum())
}
