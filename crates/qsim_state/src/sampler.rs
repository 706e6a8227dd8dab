//! Measurement sampler
//!
//! Gantree: L3_Measure → MeasurementSampler
//!
//! Draws shots from the Born distribution of a state without touching its
//! amplitudes. Sampling is non-destructive: the same state can be measured
//! again and again, which is not what a physical measurement does.

use crate::result::MeasurementResult;
use crate::state::StateVector;
use qsim_core::{Bitstring, Counts, QsimError, QsimResult, QubitId};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Seedable shot sampler
/// Gantree: MeasurementSampler // 측정 샘플러
#[derive(Debug, Clone)]
pub struct MeasurementSampler {
    /// Random source
    rng: ChaCha8Rng,

    /// Seed used (if any)
    seed: Option<u64>,
}

impl MeasurementSampler {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create sampler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Create reproducible sampler
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create from an optional seed
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Get seed
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// Draw `shots` basis indices
    /// Gantree: sample_indices(state, shots) -> Vec<usize> // 인덱스 샘플링
    ///
    /// Returns one entry per shot; prefer `sample` for large shot counts.
    pub fn sample_indices(&mut self, state: &StateVector, shots: u64) -> Vec<usize> {
        if shots == 0 {
            return Vec::new();
        }
        let table = CumulativeTable::new(state);
        let mut overshoots = 0u64;
        let indices: Vec<usize> = (0..shots)
            .map(|_| table.draw(&mut self.rng, &mut overshoots))
            .collect();
        table.report(overshoots, shots);
        indices
    }

    /// Draw `shots` basis indices and count them per index.
    ///
    /// Memory is bounded by the number of distinct outcomes, not by `shots`.
    pub fn sample_index_counts(&mut self, state: &StateVector, shots: u64) -> HashMap<usize, u64> {
        let mut by_index: HashMap<usize, u64> = HashMap::new();
        if shots == 0 {
            return by_index;
        }
        let table = CumulativeTable::new(state);
        let mut overshoots = 0u64;
        for _ in 0..shots {
            *by_index
                .entry(table.draw(&mut self.rng, &mut overshoots))
                .or_insert(0) += 1;
        }
        table.report(overshoots, shots);
        by_index
    }

    /// Measure `qubits` over `shots` draws
    /// Gantree: sample(state, qubits, shots) -> Result<MeasurementResult> // 측정
    ///
    /// Keys hold one character per requested qubit, in request order. Qubits
    /// must be in range and pairwise distinct. The state is only read.
    pub fn sample(
        &mut self,
        state: &StateVector,
        qubits: &[QubitId],
        shots: u64,
    ) -> QsimResult<MeasurementResult> {
        validate_qubits(qubits, state.num_qubits())?;

        let mut counts: Counts = HashMap::new();
        for (idx, n) in self.sample_index_counts(state, shots) {
            let key = Bitstring::from_index(idx, qubits).to_string();
            *counts.entry(key).or_insert(0) += n;
        }

        log::debug!(
            "sampled {} shots on {:?}: {} distinct outcomes",
            shots,
            qubits,
            counts.len()
        );

        Ok(MeasurementResult {
            counts,
            shots,
            qubits: qubits.to_vec(),
            seed: self.seed,
        })
    }
}

impl Default for MeasurementSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Cumulative Born distribution of a state.
///
/// A draw `r ∈ [0, 1)` selects the first index whose cumulative probability
/// exceeds `r`. When rounding leaves the total below `r`, the last index
/// carrying probability is used instead.
struct CumulativeTable {
    cumulative: Vec<f64>,
    total: f64,
    fallback: usize,
}

impl CumulativeTable {
    fn new(state: &StateVector) -> Self {
        let mut cumulative = Vec::with_capacity(state.dimension());
        let mut total = 0.0;
        for p in state.probabilities() {
            total += p;
            cumulative.push(total);
        }
        let fallback = state
            .amplitudes()
            .iter()
            .rposition(|a| a.norm_sqr() > 0.0)
            .unwrap_or(state.dimension() - 1);
        Self {
            cumulative,
            total,
            fallback,
        }
    }

    fn draw(&self, rng: &mut ChaCha8Rng, overshoots: &mut u64) -> usize {
        let r: f64 = rng.gen();
        let idx = self.cumulative.partition_point(|&c| c <= r);
        if idx < self.cumulative.len() {
            idx
        } else {
            *overshoots += 1;
            self.fallback
        }
    }

    fn report(&self, overshoots: u64, shots: u64) {
        if overshoots > 0 {
            log::warn!(
                "{} of {} draws exceeded cumulative mass {:.17}; clamped to index {}",
                overshoots,
                shots,
                self.total,
                self.fallback
            );
        }
    }
}

/// Requested qubits must be non-empty, in range and distinct
fn validate_qubits(qubits: &[QubitId], num_qubits: usize) -> QsimResult<()> {
    if qubits.is_empty() {
        return Err(QsimError::InvalidGateTarget {
            reason: "no qubits requested for measurement".to_string(),
            num_qubits,
        });
    }
    let mut seen = 0usize;
    for &q in qubits {
        if q >= num_qubits {
            return Err(QsimError::qubit_out_of_range(q, num_qubits));
        }
        if seen & (1 << q) != 0 {
            return Err(QsimError::InvalidGateTarget {
                reason: format!("qubit {} requested twice", q),
                num_qubits,
            });
        }
        seen |= 1 << q;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
