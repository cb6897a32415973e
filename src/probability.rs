//! Exact combinatorics in log space.
//!
//! Binomial coefficients for a 100-card deck overflow `u64` quickly, so every
//! count is handled as a natural log and only exponentiated at the end.

/// Precomputed `ln(k!)` for `k` in `0..=max_n`
#[derive(Debug, Clone)]
pub struct LogFactorials {
    table: Vec<f64>,
}

impl LogFactorials {
    pub fn new(max_n: usize) -> Self {
        let mut table = Vec::with_capacity(max_n + 1);
        table.push(0.0);
        let mut acc = 0.0;
        for k in 1..=max_n {
            acc += (k as f64).ln();
            table.push(acc);
        }
        LogFactorials { table }
    }

    pub fn max_n(&self) -> usize {
        self.table.len() - 1
    }

    /// `ln(n!)`. Panics if `n` exceeds the precomputed range.
    pub fn ln_factorial(&self, n: usize) -> f64 {
        self.table[n]
    }

    /// `ln C(n, k)`, or `None` when `k > n` (no way to choose)
    pub fn ln_choose(&self, n: usize, k: usize) -> Option<f64> {
        if k > n {
            return None;
        }
        Some(self.ln_factorial(n) - self.ln_factorial(k) - self.ln_factorial(n - k))
    }

    /// Probability of exactly `k` successes when drawing `draws` cards
    /// without replacement from `population` cards, `successes` of which
    /// count as a success.
    pub fn hypergeometric_pmf(
        &self,
        population: usize,
        successes: usize,
        draws: usize,
        k: usize,
    ) -> f64 {
        if successes > population || draws > population || k > draws {
            return 0.0;
        }
        let hits = self.ln_choose(successes, k);
        let misses = self.ln_choose(population - successes, draws - k);
        let total = self.ln_choose(population, draws);
        match (hits, misses, total) {
            (Some(h), Some(m), Some(t)) => (h + m - t).exp(),
            _ => 0.0,
        }
    }
}
