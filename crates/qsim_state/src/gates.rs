//! Gate library
//!
//! Gantree: L2_State → GateLibrary
//!
//! Stateless kernels acting in place on a [`StateVector`]. Single-qubit gates
//! walk the register in blocks of `2 * mask`, touching each (bit clear, bit set)
//! index pair exactly once, so one gate costs 2^(n-1) pair updates.

use crate::state::StateVector;
use num_complex::Complex64;
use qsim_core::{Angle, GateDescriptor, QsimError, QsimResult, QubitId};
use std::f64::consts::FRAC_1_SQRT_2;

// ============================================================================
// Dispatch
// ============================================================================

/// Apply a gate descriptor
/// Gantree: apply_gate(state, gate) -> Result // 디스패치
pub fn apply_gate(state: &mut StateVector, gate: &GateDescriptor) -> QsimResult<()> {
    log::trace!("apply {}", gate);
    match *gate {
        GateDescriptor::Hadamard(q) => apply_hadamard(state, q),
        GateDescriptor::RotationX(q, theta) => apply_rotation_x(state, q, theta),
        GateDescriptor::RotationY(q, theta) => apply_rotation_y(state, q, theta),
        GateDescriptor::RotationZ(q, theta) => apply_rotation_z(state, q, theta),
        GateDescriptor::Cnot(c, t) => apply_cnot(state, c, t),
        GateDescriptor::ControlledZ(c, t) => apply_controlled_z(state, c, t),
    }
}

// ============================================================================
// Single-Qubit Gates
// ============================================================================

/// (a, b) → ((a+b)/√2, (a−b)/√2)
pub fn apply_hadamard(state: &mut StateVector, qubit: QubitId) -> QsimResult<()> {
    check_qubit(state, qubit)?;
    for_each_pair(state.amplitudes_mut(), qubit, |a, b| {
        ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
    });
    Ok(())
}

/// RX(θ) = [[c, −is], [−is, c]] with c = cos(θ/2), s = sin(θ/2)
pub fn apply_rotation_x(state: &mut StateVector, qubit: QubitId, theta: Angle) -> QsimResult<()> {
    check_qubit(state, qubit)?;
    let c = (theta / 2.0).cos();
    let minus_is = Complex64::new(0.0, -(theta / 2.0).sin());
    for_each_pair(state.amplitudes_mut(), qubit, |a, b| {
        (a * c + b * minus_is, a * minus_is + b * c)
    });
    Ok(())
}

/// RY(θ) = [[c, −s], [s, c]]
pub fn apply_rotation_y(state: &mut StateVector, qubit: QubitId, theta: Angle) -> QsimResult<()> {
    check_qubit(state, qubit)?;
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    for_each_pair(state.amplitudes_mut(), qubit, |a, b| {
        (a * c - b * s, a * s + b * c)
    });
    Ok(())
}

/// Phase e^{iθ} on amplitudes whose target bit is set.
///
/// Amplitudes with the bit clear are not read or written, so they stay
/// bit-identical. This equals the textbook RZ(θ) up to a global phase.
pub fn apply_rotation_z(state: &mut StateVector, qubit: QubitId, theta: Angle) -> QsimResult<()> {
    check_qubit(state, qubit)?;
    let phase = Complex64::from_polar(1.0, theta);
    let mask = 1usize << qubit;
    let amps = state.amplitudes_mut();
    for base in (0..amps.len()).step_by(mask << 1) {
        for a in &mut amps[base + mask..base + (mask << 1)] {
            *a *= phase;
        }
    }
    Ok(())
}

// ============================================================================
// Two-Qubit Gates
// ============================================================================

/// Swap each (control=1, target=0) amplitude with its target-flipped partner.
///
/// Only the index with the target bit clear initiates a swap, so every pair
/// is exchanged once.
pub fn apply_cnot(state: &mut StateVector, control: QubitId, target: QubitId) -> QsimResult<()> {
    check_pair(state, control, target)?;
    let control_mask = 1usize << control;
    let target_mask = 1usize << target;
    let amps = state.amplitudes_mut();

    for i in 0..amps.len() {
        if i & control_mask != 0 && i & target_mask == 0 {
            amps.swap(i, i | target_mask);
        }
    }
    Ok(())
}

/// Negate amplitudes where both bits are set
pub fn apply_controlled_z(
    state: &mut StateVector,
    control: QubitId,
    target: QubitId,
) -> QsimResult<()> {
    check_pair(state, control, target)?;
    let both = (1usize << control) | (1usize << target);
    for (i, a) in state.amplitudes_mut().iter_mut().enumerate() {
        if i & both == both {
            *a = -*a;
        }
    }
    Ok(())
}

// ============================================================================
// Kernels & Validation
// ============================================================================

/// Visit every (i, i | mask) pair with bit `qubit` clear in `i`
fn for_each_pair<F>(amps: &mut [Complex64], qubit: QubitId, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1usize << qubit;
    for base in (0..amps.len()).step_by(mask << 1) {
        for i in base..base + mask {
            let j = i | mask;
            let (new_i, new_j) = f(amps[i], amps[j]);
            amps[i] = new_i;
            amps[j] = new_j;
        }
    }
}

fn check_qubit(state: &StateVector, qubit: QubitId) -> QsimResult<()> {
    if qubit >= state.num_qubits() {
        return Err(QsimError::qubit_out_of_range(qubit, state.num_qubits()));
    }
    Ok(())
}

fn check_pair(state: &StateVector, control: QubitId, target: QubitId) -> QsimResult<()> {
    check_qubit(state, control)?;
    check_qubit(state, target)?;
    if control == target {
        return Err(QsimError::same_control_target(control, state.num_qubits()));
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
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::PI;

    fn assert_states_close(a: &StateVector, b: &StateVector, eps: f64) {
        assert_eq!(a.dimension(), b.dimension());
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert_abs_diff_eq!(x.re, y.re, epsilon = eps);
            assert_abs_diff_eq!(x.im, y.im, epsilon = eps);
        }
    }

    fn random_gate(rng: &mut ChaCha8Rng, n: usize) -> GateDescriptor {
        let q = rng.gen_range(0..n);
        let theta = rng.gen_range(-PI..PI);
        let mut other = rng.gen_range(0..n);
        if other == q {
            other = (q + 1) % n;
        }
        match rng.gen_range(0..6) {
            0 => GateDescriptor::Hadamard(q),
            1 => GateDescriptor::RotationX(q, theta),
            2 => GateDescriptor::RotationY(q, theta),
            3 => GateDescriptor::RotationZ(q, theta),
            4 => GateDescriptor::Cnot(q, other),
            _ => GateDescriptor::ControlledZ(q, other),
        }
    }

    /// A non-trivial reference state reached by unitary gates only
    fn scrambled(n: usize, seed: u64) -> StateVector {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = StateVector::new(n).unwrap();
        for _ in 0..40 {
            apply_gate(&mut state, &random_gate(&mut rng, n)).unwrap();
        }
        state
    }

    #[test]
    fn test_hadamard_superposition() {
        let mut state = StateVector::new(1).unwrap();
        apply_hadamard(&mut state, 0).unwrap();
        assert_abs_diff_eq!(state.probability_of(0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.probability_of(1), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hadamard_involution() {
        for q in 0..4 {
            let original = scrambled(4, 11);
            let mut state = original.clone();
            apply_hadamard(&mut state, q).unwrap();
            apply_hadamard(&mut state, q).unwrap();
            assert_states_close(&state, &original, 1e-12);
        }
    }

    #[test]
    fn test_rotation_x_identity_at_zero() {
        let original = scrambled(3, 5);
        let mut state = original.clone();
        apply_rotation_x(&mut state, 1, 0.0).unwrap();
        assert_states_close(&state, &original, 0.0);
    }

    #[test]
    fn test_rotation_x_pi_flips() {
        let mut state = StateVector::new(1).unwrap();
        apply_rotation_x(&mut state, 0, PI).unwrap();
        assert_abs_diff_eq!(state.probability_of(1), 1.0, epsilon = 1e-12);
        // RX(π)|0⟩ = −i|1⟩
        let a = state.amplitude(1).unwrap();
        assert_abs_diff_eq!(a.re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_y_real_mixing() {
        let mut state = StateVector::new(1).unwrap();
        apply_rotation_y(&mut state, 0, PI / 2.0).unwrap();
        let a0 = state.amplitude(0).unwrap();
        let a1 = state.amplitude(1).unwrap();
        assert_abs_diff_eq!(a0.re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(a1.re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(a0.im, 0.0);
        assert_abs_diff_eq!(a1.im, 0.0);
    }

    #[test]
    fn test_rotation_z_leaves_zero_subspace_bit_identical() {
        for &theta in &[0.1, -2.7, PI, 1e-9, 123.456] {
            for q in 0..3 {
                let original = scrambled(3, 21);
                let mut state = original.clone();
                apply_rotation_z(&mut state, q, theta).unwrap();
                let mask = 1 << q;
                for i in 0..state.dimension() {
                    if i & mask == 0 {
                        let before = original.amplitudes()[i];
                        let after = state.amplitudes()[i];
                        assert_eq!(before.re.to_bits(), after.re.to_bits());
                        assert_eq!(before.im.to_bits(), after.im.to_bits());
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotation_z_phase_interference() {
        // H · RZ(π) · H maps |0⟩ to |1⟩
        let mut state = StateVector::new(1).unwrap();
        apply_hadamard(&mut state, 0).unwrap();
        apply_rotation_z(&mut state, 0, PI).unwrap();
        apply_hadamard(&mut state, 0).unwrap();
        assert_abs_diff_eq!(state.probability_of(1), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cnot_truth_table() {
        // |q1 q0⟩ = |01⟩ (index 1), control q0, target q1 → |11⟩ (index 3)
        let mut amps = vec![Complex64::new(0.0, 0.0); 4];
        amps[1] = Complex64::new(1.0, 0.0);
        let mut state = StateVector::from_amplitudes(amps).unwrap();
        apply_cnot(&mut state, 0, 1).unwrap();
        assert_abs_diff_eq!(state.probability_of(3), 1.0);

        // Control clear: no change
        let mut state = StateVector::new(2).unwrap();
        apply_cnot(&mut state, 0, 1).unwrap();
        assert_abs_diff_eq!(state.probability_of(0), 1.0);
    }

    #[test]
    fn test_cnot_self_inverse() {
        for (c, t) in [(0, 1), (1, 0), (0, 3), (3, 1), (2, 0)] {
            let original = scrambled(4, 33);
            let mut state = original.clone();
            apply_cnot(&mut state, c, t).unwrap();
            apply_cnot(&mut state, c, t).unwrap();
            assert_states_close(&state, &original, 0.0);
        }
    }

    #[test]
    fn test_bell_state() {
        let mut state = StateVector::new(2).unwrap();
        apply_hadamard(&mut state, 0).unwrap();
        apply_cnot(&mut state, 0, 1).unwrap();
        assert_abs_diff_eq!(state.probability_of(0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.probability_of(3), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(state.probability_of(1), 0.0);
        assert_abs_diff_eq!(state.probability_of(2), 0.0);
    }

    #[test]
    fn test_controlled_z() {
        let amp = 0.5;
        let mut state = StateVector::from_amplitudes(vec![Complex64::new(amp, 0.0); 4]).unwrap();
        apply_controlled_z(&mut state, 0, 1).unwrap();
        let amps = state.amplitudes();
        assert_eq!(amps[0], Complex64::new(amp, 0.0));
        assert_eq!(amps[1], Complex64::new(amp, 0.0));
        assert_eq!(amps[2], Complex64::new(amp, 0.0));
        assert_eq!(amps[3], Complex64::new(-amp, 0.0));
    }

    #[test]
    fn test_invalid_targets() {
        let mut state = StateVector::new(2).unwrap();
        assert!(matches!(
            apply_hadamard(&mut state, 2),
            Err(QsimError::InvalidGateTarget { .. })
        ));
        assert!(apply_rotation_z(&mut state, 5, 0.1).is_err());
        assert!(apply_cnot(&mut state, 1, 1).is_err());
        assert!(apply_controlled_z(&mut state, 0, 2).is_err());
        // Failed calls leave the state untouched
        assert_eq!(state, StateVector::new(2).unwrap());
    }

    #[test]
    fn test_normalization_invariant_random_sequences() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for n in 1..=8 {
            let mut state = StateVector::new(n).unwrap();
            for _ in 0..200 {
                let gate = if n == 1 {
                    GateDescriptor::RotationY(0, rng.gen_range(-PI..PI))
                } else {
                    random_gate(&mut rng, n)
                };
                apply_gate(&mut state, &gate).unwrap();
                assert!(
                    state.is_normalized(1e-9),
                    "norm drift after {}: {}",
                    gate,
                    state.norm_squared()
                );
            }
            assert_eq!(state.dimension(), 1 << n);
        }
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let mut a = scrambled(3, 7);
        let mut b = a.clone();
        apply_gate(&mut a, &GateDescriptor::RotationX(2, 0.4)).unwrap();
        apply_rotation_x(&mut b, 2, 0.4).unwrap();
        assert_eq!(a, b);
    }
}
