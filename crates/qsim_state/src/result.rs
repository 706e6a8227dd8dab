//! Measurement result types
//!
//! Gantree: L3_Measure → MeasurementResult

use qsim_core::{Bitstring, Counts, QsimError, QsimResult, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome counts of a batch of shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Measurement counts (bitstring -> count)
    pub counts: Counts,

    /// Number of shots drawn
    pub shots: u64,

    /// Observed qubits, in bitstring character order
    pub qubits: Vec<QubitId>,

    /// Sampler seed (if any)
    pub seed: Option<u64>,
}

impl MeasurementResult {
    /// Get total count (equals shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Get count of a specific bitstring
    pub fn count(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get empirical probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(bitstring) as f64 / self.shots as f64
    }

    /// Get most frequent bitstring (ties broken by lexicographic order)
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
            .map(|(bs, &count)| (bs, count))
    }

    /// Empirical ⟨Z⟩ of the qubit at `position` in the bitstring
    pub fn expectation_z(&self, position: usize) -> f64 {
        if self.shots == 0 || position >= self.qubits.len() {
            return 0.0;
        }
        let signed: i64 = self
            .counts
            .iter()
            .map(|(bs, &count)| match bs.as_bytes().get(position) {
                Some(b'1') => -(count as i64),
                _ => count as i64,
            })
            .sum();
        signed as f64 / self.shots as f64
    }

    /// Dense empirical distribution over all 2^k outcomes.
    ///
    /// Entry `m` holds the frequency of the bitstring whose character `k` is
    /// bit `k` of `m`. Every key must be a '0'/'1' string with one character
    /// per observed qubit, otherwise `InvalidBitstring` is returned.
    pub fn to_feature_vector(&self) -> QsimResult<Vec<f64>> {
        let width = self.qubits.len();
        let mut features = vec![0.0; 1usize << width];
        for (bs, &count) in &self.counts {
            let bits = Bitstring::parse(bs)?;
            if bits.len() != width {
                return Err(QsimError::InvalidBitstring(format!(
                    "'{}' has {} bits, expected {}",
                    bs,
                    bits.len(),
                    width
                )));
            }
            if self.shots > 0 {
                features[bits.to_index()] = count as f64 / self.shots as f64;
            }
        }
        Ok(features)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QsimResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MeasurementResult(shots={}, qubits={:?}, unique={})",
            self.shots,
            self.qubits,
            self.counts.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
