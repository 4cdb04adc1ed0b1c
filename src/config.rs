//! Run-time search configuration.
//!
//! A [`SearchConfig`] is threaded through the driver and the scoring
//! function, so two searches never share tuning state.

use crate::constants::{BRANCHING_CAP, EXPLORATION, FAST_WIN_WEIGHT, N_ITERATIONS};
use crate::numeric::clamp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Top-level iterations per search
    pub iterations: usize,
    /// Children materialized per expansion
    pub branching_cap: usize,
    exploration: f64,
    fast_win_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: N_ITERATIONS,
            branching_cap: BRANCHING_CAP,
            exploration: EXPLORATION,
            fast_win_weight: FAST_WIN_WEIGHT,
        }
    }
}

impl SearchConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_branching_cap(mut self, cap: usize) -> Self {
        self.branching_cap = cap;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.set_exploration(c);
        self
    }

    pub fn with_fast_win_weight(mut self, weight: f64) -> Self {
        self.set_fast_win_weight(weight);
        self
    }

    /// UCB1 exploration constant `C`.
    #[inline]
    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    /// Weight of fast wins in the fast-wins policy, always in [0, 1].
    #[inline]
    pub fn fast_win_weight(&self) -> f64 {
        self.fast_win_weight
    }

    /// Set `C`. Negative values clamp to zero; NaN and infinities fall back
    /// to the default.
    pub fn set_exploration(&mut self, c: f64) {
        self.exploration = if c.is_finite() { c.max(0.0) } else { EXPLORATION };
    }

    /// Set the fast-win weight, clamped into [0, 1].
    pub fn set_fast_win_weight(&mut self, weight: f64) {
        self.fast_win_weight = clamp(weight, 0.0, 1.0);
    }
}
