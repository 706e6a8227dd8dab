//! Constants for QSIM
//!
//! Gantree: L0_Foundation → Constants
//!
//! Simulation limits, numerical tolerances, and sampling defaults.

// ============================================================================
// Simulation Limits
// Gantree: limits // 시뮬레이션 한계
// ============================================================================

pub mod limits {
    //! Register size limits for the dense amplitude vector

    /// Minimum register size
    pub const MIN_QUBITS: usize = 1;

    /// Default maximum register size (2^20 amplitudes ≈ 16 MiB)
    /// Gantree: DEFAULT_MAX_QUBITS: usize = 20
    pub const DEFAULT_MAX_QUBITS: usize = 20;

    /// Hard ceiling no configuration may exceed (2^24 amplitudes ≈ 256 MiB)
    /// Gantree: HARD_MAX_QUBITS: usize = 24
    pub const HARD_MAX_QUBITS: usize = 24;

    /// Number of amplitudes for an n-qubit register
    #[inline]
    pub const fn dimension(num_qubits: usize) -> usize {
        1 << num_qubits
    }

    /// Bytes required by an n-qubit register of `Complex64` amplitudes
    #[inline]
    pub const fn state_bytes(num_qubits: usize) -> usize {
        dimension(num_qubits) * 16
    }
}

// ============================================================================
// Numerical Tolerances
// Gantree: numeric // 수치 허용오차
// ============================================================================

pub mod numeric {
    //! Floating-point tolerances

    /// Absolute tolerance on Σ|a|² for registers up to 16 qubits
    /// Gantree: NORM_TOLERANCE: f64 = 1e-9
    pub const NORM_TOLERANCE: f64 = 1e-9;

    /// Drift from unit norm above which the encoder logs a warning
    pub const DRIFT_WARN: f64 = 1e-12;
}

// ============================================================================
// Sampling Defaults
// Gantree: sampling // 샘플링 기본값
// ============================================================================

pub mod sampling {
    //! Measurement sampling defaults

    /// Default shot count
    /// Gantree: DEFAULT_SHOTS: u64 = 1024
    pub const DEFAULT_SHOTS: u64 = 1024;

    /// Default variational depth
    pub const DEFAULT_DEPTH: usize = 2;

    /// Rotation angles per qubit per variational layer (rx, ry, rz)
    pub const ANGLES_PER_QUBIT: usize = 3;
}

// ============================================================================
// Tests
// ============================================================================
