//! Dense amplitude vector
//!
//! Gantree: L2_State → StateVector
//!
//! Index `i` is a basis state in little-endian order: qubit `q` holds bit
//! `(i >> q) & 1`. The buffer length is fixed at `2^num_qubits` for the
//! lifetime of the value.

use num_complex::Complex64;
use qsim_core::{limits, QsimError, QsimResult, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complex amplitude vector for an n-qubit register
/// Gantree: StateVector // 상태 벡터
///
/// Deserialization goes through `from_amplitudes`, so a decoded value always
/// satisfies `amplitudes.len() == 2^num_qubits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStateVector")]
pub struct StateVector {
    /// Number of qubits
    /// Gantree: num_qubits: usize // 큐비트 수
    num_qubits: usize,

    /// Amplitudes, length 2^num_qubits
    /// Gantree: amplitudes: Vec<Complex64> // 진폭
    amplitudes: Vec<Complex64>,
}

/// Unchecked wire form of `StateVector`
#[derive(Deserialize)]
struct RawStateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl TryFrom<RawStateVector> for StateVector {
    type Error = QsimError;

    fn try_from(raw: RawStateVector) -> QsimResult<Self> {
        let state = Self::from_amplitudes(raw.amplitudes)?;
        if state.num_qubits != raw.num_qubits {
            return Err(QsimError::InvalidQubitCount {
                requested: raw.num_qubits,
                min: state.num_qubits,
                max: state.num_qubits,
            });
        }
        Ok(state)
    }
}

impl StateVector {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create |0...0⟩
    /// Gantree: new(n) -> Result<Self> // 영상태 생성
    ///
    /// Fails with `InvalidQubitCount` before allocating when `num_qubits` is 0
    /// or above the hard ceiling.
    pub fn new(num_qubits: usize) -> QsimResult<Self> {
        check_register(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); limits::dimension(num_qubits)];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Wrap an existing amplitude buffer.
    ///
    /// The length must be a power of two with at least two entries. The buffer
    /// is taken as-is; no normalization is applied.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> QsimResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(QsimError::DegenerateInput(format!(
                "amplitude buffer length {} is not a power of two >= 2",
                len
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        check_register(num_qubits)?;
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get vector length (2^num_qubits)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get amplitudes
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Get a single amplitude
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Mutable access for gate kernels. The slice length cannot change.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Return to |0...0⟩ without reallocating
    /// Gantree: reset(&mut) // 초기화
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// Divide every amplitude by the current L2 norm.
    ///
    /// Returns the norm before correction. A zero vector is left untouched.
    pub(crate) fn renormalize(&mut self) -> f64 {
        let norm = self.norm_squared().sqrt();
        if norm > 0.0 {
            let inv = 1.0 / norm;
            for a in self.amplitudes.iter_mut() {
                *a *= inv;
            }
        }
        norm
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Σ|a_i|²
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Check |Σ|a_i|² - 1| <= tolerance
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_squared() - 1.0).abs() <= tolerance
    }

    /// Born-rule probabilities re² + im² for every basis index
    /// Gantree: probabilities(&self) -> Vec<f64> // 확률 분포
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probability of a single basis index (0 when out of range)
    pub fn probability_of(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |a| a.norm_sqr())
    }

    /// ⟨Z_q⟩ = P(q = 0) - P(q = 1)
    pub fn expectation_z(&self, qubit: QubitId) -> QsimResult<f64> {
        if qubit >= self.num_qubits {
            return Err(QsimError::qubit_out_of_range(qubit, self.num_qubits));
        }
        let mask = 1 << qubit;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| {
                if i & mask == 0 {
                    a.norm_sqr()
                } else {
                    -a.norm_sqr()
                }
            })
            .sum())
    }

    /// Normalized L1 coherence in [0, 1].
    ///
    /// `((Σ|a_i|)² - 1) / (2^n - 1)`: 0 for a basis state, 1 for the uniform
    /// superposition. Phases do not contribute.
    pub fn coherence(&self) -> f64 {
        let l1: f64 = self.amplitudes.iter().map(|a| a.norm()).sum();
        let max = (self.dimension() - 1) as f64;
        ((l1 * l1 - 1.0) / max).clamp(0.0, 1.0)
    }

    /// |⟨self|other⟩|²
    pub fn fidelity(&self, other: &StateVector) -> QsimResult<f64> {
        if self.num_qubits != other.num_qubits {
            return Err(QsimError::InvalidQubitCount {
                requested: other.num_qubits,
                min: self.num_qubits,
                max: self.num_qubits,
            });
        }
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum();
        Ok(overlap.norm_sqr())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateVector({}Q, dim={}, norm²={:.12})",
            self.num_qubits,
            self.dimension(),
            self.norm_squared()
        )
    }
}

fn check_register(num_qubits: usize) -> QsimResult<()> {
    if num_qubits < limits::MIN_QUBITS || num_qubits > limits::HARD_MAX_QUBITS {
        return Err(QsimError::InvalidQubitCount {
            requested: num_qubits,
            min: limits::MIN_QUBITS,
            max: limits::HARD_MAX_QUBITS,
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_new_zero_state() {
        let state = StateVector::new(3).unwrap();
        assert_eq!(state.num_qubits(), 3);
        assert_eq!(state.dimension(), 8);
        assert_eq!(state.amplitude(0), Some(Complex64::new(1.0, 0.0)));
        assert!(state.amplitudes()[1..].iter().all(|a| *a == Complex64::new(0.0, 0.0)));
        assert!(state.is_normalized(1e-12));
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert!(matches!(
            StateVector::new(0),
            Err(QsimError::InvalidQubitCount { requested: 0, .. })
        ));
        assert!(StateVector::new(limits::HARD_MAX_QUBITS + 1).is_err());
    }

    #[test]
    fn test_from_amplitudes() {
        let h = FRAC_1_SQRT_2;
        let state =
            StateVector::from_amplitudes(vec![Complex64::new(h, 0.0), Complex64::new(h, 0.0)])
                .unwrap();
        assert_eq!(state.num_qubits(), 1);
        assert_abs_diff_eq!(state.norm_squared(), 1.0, epsilon = 1e-12);

        assert!(StateVector::from_amplitudes(vec![Complex64::new(1.0, 0.0); 3]).is_err());
        assert!(StateVector::from_amplitudes(vec![Complex64::new(1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_reset() {
        let mut state = StateVector::from_amplitudes(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 1.0),
        ])
        .unwrap();
        state.reset();
        assert_eq!(state, StateVector::new(1).unwrap());
    }

    #[test]
    fn test_renormalize() {
        let mut state = StateVector::from_amplitudes(vec![
            Complex64::new(3.0, 0.0),
            Complex64::new(0.0, 4.0),
        ])
        .unwrap();
        let before = state.renormalize();
        assert_abs_diff_eq!(before, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(state.norm_squared(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(state.probability_of(1), 0.64, epsilon = 1e-12);
    }

    #[test]
    fn test_expectation_z() {
        let state = StateVector::new(2).unwrap();
        assert_abs_diff_eq!(state.expectation_z(0).unwrap(), 1.0);

        let one = StateVector::from_amplitudes(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        ])
        .unwrap();
        assert_abs_diff_eq!(one.expectation_z(0).unwrap(), -1.0);
        assert!(one.expectation_z(1).is_err());
    }

    #[test]
    fn test_coherence_extremes() {
        let basis = StateVector::new(3).unwrap();
        assert_abs_diff_eq!(basis.coherence(), 0.0, epsilon = 1e-12);

        let amp = 1.0 / (8.0_f64).sqrt();
        let uniform = StateVector::from_amplitudes(vec![Complex64::new(amp, 0.0); 8]).unwrap();
        assert_abs_diff_eq!(uniform.coherence(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fidelity() {
        let zero = StateVector::new(2).unwrap();
        assert_abs_diff_eq!(zero.fidelity(&zero).unwrap(), 1.0, epsilon = 1e-12);

        let mut other = vec![Complex64::new(0.0, 0.0); 4];
        other[3] = Complex64::new(0.0, 1.0);
        let other = StateVector::from_amplitudes(other).unwrap();
        assert_abs_diff_eq!(zero.fidelity(&other).unwrap(), 0.0, epsilon = 1e-12);

        assert!(zero.fidelity(&StateVector::new(3).unwrap()).is_err());
    }

    #[test]
    fn test_json_checks_register_length() {
        let mut state = StateVector::new(2).unwrap();
        state.amplitudes_mut()[0] = Complex64::new(0.6, 0.0);
        state.amplitudes_mut()[3] = Complex64::new(0.0, 0.8);
        let json = serde_json::to_string(&state).unwrap();
        let back: StateVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        // num_qubits disagrees with the buffer length
        let mismatched = r#"{"num_qubits":3,"amplitudes":[[1.0,0.0],[0.0,0.0]]}"#;
        assert!(serde_json::from_str::<StateVector>(mismatched).is_err());

        // buffer length not a power of two
        let ragged = r#"{"num_qubits":1,"amplitudes":[[1.0,0.0],[0.0,0.0],[0.0,0.0]]}"#;
        assert!(serde_json::from_str::<StateVector>(ragged).is_err());
    }
}
