//! Error types for QSIM
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every failure is local to the call that raised it. Nothing here is retried
//! internally and nothing is fatal to the host process.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QSIM
/// Gantree: QsimError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QsimError {
    // ========================================================================
    // Gate Errors
    // ========================================================================
    /// Qubit index out of range, or control == target on a two-qubit gate
    /// Gantree: InvalidGateTarget{{qubit,num_qubits}} // 대상 큐비트
    #[error("Invalid gate target: {reason} (register has {num_qubits} qubits)")]
    InvalidGateTarget { reason: String, num_qubits: usize },

    // ========================================================================
    // Engine Errors
    // ========================================================================
    /// Operation issued before the circuit was initialized
    /// Gantree: NotInitialized // 미초기화
    #[error("Circuit not initialized: call initialize before '{0}'")]
    NotInitialized(String),

    /// Register size outside [min, max]
    /// Gantree: InvalidQubitCount{{n,max}} // 큐비트 수
    #[error("Invalid qubit count {requested}: must be in range [{min}, {max}]")]
    InvalidQubitCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    // ========================================================================
    // Encoding Errors
    // ========================================================================
    /// Classical input has zero L2 norm (or is empty)
    /// Gantree: DegenerateInput // 영벡터
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Classical input longer than the register dimension
    #[error("Input length {len} exceeds register dimension {dimension}")]
    InputTooLong { len: usize, dimension: usize },

    /// Classical input contains NaN or infinity
    #[error("Non-finite input value {value} at index {index}")]
    NonFiniteInput { index: usize, value: f64 },

    // ========================================================================
    // Measurement Errors
    // ========================================================================
    /// Outcome key that is not a '0'/'1' string of the expected width
    #[error("Invalid bitstring: {0}")]
    InvalidBitstring(String),

    // ========================================================================
    // Variational Errors
    // ========================================================================
    /// Parameter tensor shape does not match depth × qubits × 3
    /// Gantree: ParameterShapeMismatch{{expected,got}} // 형상 불일치
    #[error("Parameter shape mismatch: expected {expected}, got {actual}")]
    ParameterShapeMismatch { expected: String, actual: String },

    // ========================================================================
    // Configuration / I/O Errors
    // ========================================================================
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QSIM operations
/// Gantree: QsimResult<T> // type alias
pub type QsimResult<T> = Result<T, QsimError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QsimError {
    fn from(err: serde_json::Error) -> Self {
        QsimError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QsimError {
    fn from(err: std::io::Error) -> Self {
        QsimError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QsimError {
    /// Shorthand for a qubit index outside the register
    pub fn qubit_out_of_range(qubit: usize, num_qubits: usize) -> Self {
        QsimError::InvalidGateTarget {
            reason: format!("qubit {} out of range", qubit),
            num_qubits,
        }
    }

    /// Shorthand for a two-qubit gate whose operands coincide
    pub fn same_control_target(qubit: usize, num_qubits: usize) -> Self {
        QsimError::InvalidGateTarget {
            reason: format!("control and target are both qubit {}", qubit),
            num_qubits,
        }
    }

    /// Check if error stems from invalid caller input
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QsimError::InvalidGateTarget { .. }
                | QsimError::InvalidQubitCount { .. }
                | QsimError::DegenerateInput(_)
                | QsimError::InputTooLong { .. }
                | QsimError::NonFiniteInput { .. }
                | QsimError::ParameterShapeMismatch { .. }
                | QsimError::InvalidBitstring(_)
                | QsimError::InvalidConfig(_)
        )
    }

    /// Check if error stems from calling an operation in the wrong engine state
    pub fn is_state_error(&self) -> bool {
        matches!(self, QsimError::NotInitialized(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
