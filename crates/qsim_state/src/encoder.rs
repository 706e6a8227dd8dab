//! Amplitude encoding of classical data
//!
//! Gantree: L2_State → AmplitudeEncoder
//!
//! Writes `v[i] / ‖v‖₂` into the real part of amplitude `i`, zero-pads the
//! rest, then divides by the measured norm once more to absorb rounding.

use crate::state::StateVector;
use num_complex::Complex64;
use qsim_core::{limits, numeric, QsimError, QsimResult};

/// Amplitude encoder for a fixed register size
/// Gantree: AmplitudeEncoder // 진폭 인코더
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmplitudeEncoder {
    num_qubits: usize,
}

impl AmplitudeEncoder {
    /// Create encoder for an n-qubit register
    pub fn new(num_qubits: usize) -> QsimResult<Self> {
        if num_qubits < limits::MIN_QUBITS || num_qubits > limits::HARD_MAX_QUBITS {
            return Err(QsimError::InvalidQubitCount {
                requested: num_qubits,
                min: limits::MIN_QUBITS,
                max: limits::HARD_MAX_QUBITS,
            });
        }
        Ok(Self { num_qubits })
    }

    /// Smallest register holding `len` values (at least one qubit)
    pub fn qubits_for_len(len: usize) -> usize {
        len.max(2).next_power_of_two().trailing_zeros() as usize
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Encode a classical vector
    /// Gantree: encode(&self, values) -> Result<StateVector> // 인코딩
    ///
    /// Fails with `DegenerateInput` for an empty or all-zero vector,
    /// `NonFiniteInput` for NaN/∞ entries and `InputTooLong` when the input
    /// does not fit the register.
    pub fn encode(&self, values: &[f64]) -> QsimResult<StateVector> {
        let dimension = limits::dimension(self.num_qubits);
        if values.is_empty() {
            return Err(QsimError::DegenerateInput("empty input vector".to_string()));
        }
        if values.len() > dimension {
            return Err(QsimError::InputTooLong {
                len: values.len(),
                dimension,
            });
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(QsimError::NonFiniteInput { index, value });
        }

        let norm = l2_norm(values);
        if norm == 0.0 {
            return Err(QsimError::DegenerateInput(
                "input vector has zero L2 norm".to_string(),
            ));
        }

        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
        for (a, &v) in amplitudes.iter_mut().zip(values) {
            *a = Complex64::new(v / norm, 0.0);
        }

        let mut state = StateVector::from_amplitudes(amplitudes)?;
        let measured = state.renormalize();
        let drift = (measured - 1.0).abs();
        if drift > numeric::DRIFT_WARN {
            log::warn!("encoder norm drift {:.3e} corrected", drift);
        }
        log::trace!(
            "encoded {} values into {} qubits",
            values.len(),
            self.num_qubits
        );
        Ok(state)
    }
}

/// Overflow-safe L2 norm: scale by the largest magnitude before squaring
fn l2_norm(values: &[f64]) -> f64 {
    let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| (v / scale).powi(2)).sum();
    scale * sum.sqrt()
}

// ============================================================================
// Tests
// ============================================================================
