//! # QSIM Circuit
//!
//! Circuit engine, variational ansatz and the external interface of the QSIM
//! state-vector simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsim_circuit // L4+L5: Engine + Interface (완료)
//!     L4_Engine // 실행 엔진 (완료)
//!         CircuitEngine // 상태 머신 (완료)
//!         VariationalCircuit // 변분 회로 (완료)
//!     L5_Interface // 외부 인터페이스 (완료)
//!         CircuitHandle // 핸들 + 함수 (완료)
//!         Batch // rayon 일괄 처리 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsim_circuit::prelude::*;
//!
//! let config = SimConfig::default().with_seed(42);
//! let mut handle = create_circuit_with(&config, 2).unwrap();
//! apply_gate(&mut handle, &GateDescriptor::Hadamard(0)).unwrap();
//! apply_gate(&mut handle, &GateDescriptor::Cnot(0, 1)).unwrap();
//!
//! let result = measure(&mut handle, &[0, 1], 1000).unwrap();
//! assert_eq!(result.count("00") + result.count("11"), 1000);
//! ```
//!
//! ## Hybrid Features
//!
//! ```rust
//! use qsim_circuit::prelude::*;
//!
//! let config = SimConfig::default().with_seed(7);
//! let mut handle = encode_classical_with(&config, &[0.3, 0.1, 0.8, 0.5], 2).unwrap();
//! let circuit = VariationalCircuit::from_config(&config, 2).unwrap();
//! apply_variational_layer(&mut handle, &circuit).unwrap();
//!
//! let result = measure(&mut handle, &[0, 1], 512).unwrap();
//! let features = result.to_feature_vector().unwrap();
//! assert_eq!(features.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Circuit engine (Gantree: L4_Engine → CircuitEngine)
pub mod engine;

/// Variational ansatz (Gantree: L4_Engine → VariationalCircuit)
pub mod variational;

/// External interface (Gantree: L5_Interface → CircuitHandle)
pub mod handle;

/// Parallel batch processing (Gantree: L5_Interface → Batch)
pub mod batch;

// ============================================================================
// Re-exports
// ============================================================================

pub use batch::{encode_batch, feature_vectors, run_batch};
pub use engine::{CircuitEngine, EngineStatus};
pub use handle::{
    apply_gate, apply_variational_layer, create_circuit, create_circuit_with, encode_classical,
    encode_classical_with, measure, CircuitHandle,
};
pub use variational::{ParameterTensor, VariationalCircuit};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Everything needed to build, run and measure circuits
    //!
    //! ```rust
    //! use qsim_circuit::prelude::*;
    //! ```

    pub use crate::batch::{encode_batch, feature_vectors, run_batch};
    pub use crate::engine::{CircuitEngine, EngineStatus};
    pub use crate::handle::{
        apply_gate, apply_variational_layer, create_circuit, create_circuit_with,
        encode_classical, encode_classical_with, measure, CircuitHandle,
    };
    pub use crate::variational::{ParameterTensor, VariationalCircuit};

    pub use qsim_core::prelude::*;
    pub use qsim_state::{MeasurementResult, StateVector};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
