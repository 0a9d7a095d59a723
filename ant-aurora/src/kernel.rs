// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Pure hypergeometric and small-matrix primitives underlying the Aurora walk.
//!
//! No scientific-computing dependency is pulled in for this: binomial
//! coefficients are computed from log-gamma factorials and the matrix
//! inverse used by the distance estimator is a plain Gauss-Jordan
//! elimination over a handful of rows.

use crate::error::{AuroraError, Result};

/// A hypergeometric distribution `H(N, K, n)`: population `N`, `K` success
/// states in the population, sample size `n` drawn without replacement.
#[derive(Debug, Clone, Copy)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    sample_size: u64,
}

impl Hypergeometric {
    /// Builds `H(N, K, n)`, validating that the domain is non-degenerate.
    pub fn new(population: u64, successes: u64, sample_size: u64) -> Result<Self> {
        if population == 0 {
            return Err(AuroraError::InvalidDomain(
                "population must be positive".to_string(),
            ));
        }
        if sample_size > population {
            return Err(AuroraError::InvalidDomain(format!(
                "sample size {sample_size} exceeds population {population}"
            )));
        }
        Ok(Self {
            population,
            successes: successes.min(population),
            sample_size,
        })
    }

    fn support(&self) -> (u64, u64) {
        let low = self
            .sample_size
            .saturating_sub(self.population - self.successes);
        let high = self.sample_size.min(self.successes);
        (low, high)
    }

    /// Probability mass at exactly `k` successes in the sample.
    pub fn pmf(&self, k: u64) -> f64 {
        let (low, high) = self.support();
        if k < low || k > high {
            return 0.0;
        }
        let log_pmf = log_choose(self.successes, k)
            + log_choose(self.population - self.successes, self.sample_size - k)
            - log_choose(self.population, self.sample_size);
        log_pmf.exp()
    }

    /// Cumulative probability of drawing at most `k` successes, saturating at the support bounds.
    pub fn cdf(&self, k: u64) -> f64 {
        let (_, high) = self.support();
        let upper = k.min(high);
        (0..=upper).map(|i| self.pmf(i)).sum()
    }

    /// Smallest `k` with `cdf(k) >= 0.5`.
    pub fn median(&self) -> u64 {
        let (low, high) = self.support();
        let mut cumulative = 0.0;
        for k in low..=high {
            cumulative += self.pmf(k);
            if cumulative >= 0.5 {
                return k;
            }
        }
        high
    }
}

/// `ln(n!)` via the Stirling-series Lanczos approximation for `ln(Gamma(n+1))`.
fn log_factorial(n: u64) -> f64 {
    log_gamma(n as f64 + 1.0)
}

/// `ln(C(n, k))`, valid for `0 <= k <= n`.
fn log_choose(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    log_factorial(n) - log_factorial(k) - log_factorial(n - k)
}

/// Lanczos approximation of `ln(Gamma(x))` for `x > 0`, accurate to ~1e-10.
fn log_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula; not exercised by this crate's callers (all arguments are
        // non-negative factorial-style inputs) but kept for completeness of the primitive.
        let pi = std::f64::consts::PI;
        (pi / (pi * x).sin()).ln() - log_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut a = COEFFICIENTS[0];
        let t = x + G + 0.5;
        for (i, coefficient) in COEFFICIENTS.iter().enumerate().skip(1) {
            a += coefficient / (x + i as f64);
        }
        0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
    }
}

/// A small dense square matrix, row-major, used only for the `(m+1) x (m+1)`
/// transition systems the distance estimator builds.
#[derive(Debug, Clone)]
pub struct Matrix {
    dim: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from a row-major flat buffer.
    pub fn from_rows(dim: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), dim * dim);
        Self { dim, data }
    }

    /// The `dim x dim` identity matrix.
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { dim, data }
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim + col]
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.dim + col] = value;
    }

    /// `self - other`, element-wise.
    pub fn sub(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.dim, other.dim);
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Matrix::from_rows(self.dim, data)
    }

    /// Sum of the entries in row 0.
    pub fn first_row_sum(&self) -> f64 {
        (0..self.dim).map(|col| self.get(0, col)).sum()
    }

    /// Dense inverse via Gauss-Jordan elimination with partial pivoting.
    pub fn inverse(&self) -> Result<Matrix> {
        let n = self.dim;
        let mut aug = vec![0.0; n * 2 * n];
        for row in 0..n {
            for col in 0..n {
                aug[row * 2 * n + col] = self.get(row, col);
            }
            aug[row * 2 * n + n + row] = 1.0;
        }

        for pivot in 0..n {
            let mut pivot_row = pivot;
            let mut pivot_value = aug[pivot * 2 * n + pivot].abs();
            for row in (pivot + 1)..n {
                let candidate = aug[row * 2 * n + pivot].abs();
                if candidate > pivot_value {
                    pivot_row = row;
                    pivot_value = candidate;
                }
            }
            if pivot_value < 1e-12 {
                return Err(AuroraError::Singular);
            }
            if pivot_row != pivot {
                for col in 0..2 * n {
                    aug.swap(pivot * 2 * n + col, pivot_row * 2 * n + col);
                }
            }

            let pivot_val = aug[pivot * 2 * n + pivot];
            for col in 0..2 * n {
                aug[pivot * 2 * n + col] /= pivot_val;
            }

            for row in 0..n {
                if row == pivot {
                    continue;
                }
                let factor = aug[row * 2 * n + pivot];
                if factor == 0.0 {
                    continue;
                }
                for col in 0..2 * n {
                    aug[row * 2 * n + col] -= factor * aug[pivot * 2 * n + col];
                }
            }
        }

        let mut inverted = Matrix::from_rows(n, vec![0.0; n * n]);
        for row in 0..n {
            for col in 0..n {
                inverted.set(row, col, aug[row * 2 * n + n + col]);
            }
        }
        Ok(inverted)
    }
}
