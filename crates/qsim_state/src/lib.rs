//! # QSIM State
//!
//! Dense amplitude vector, gate kernels, measurement sampling and amplitude
//! encoding.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsim_state // L2+L3: State + Measurement (완료)
//!     L2_State // 상태 표현 (완료)
//!         StateVector // 진폭 벡터 (완료)
//!         GateLibrary // 게이트 커널 (완료)
//!         AmplitudeEncoder // 진폭 인코딩 (완료)
//!     L3_Measure // 측정 (완료)
//!         MeasurementSampler // 샷 샘플링 (완료)
//!         MeasurementResult // 결과 집계 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsim_state::prelude::*;
//! use qsim_core::GateDescriptor;
//!
//! let mut state = StateVector::new(2).unwrap();
//! apply_gate(&mut state, &GateDescriptor::Hadamard(0)).unwrap();
//! apply_gate(&mut state, &GateDescriptor::Cnot(0, 1)).unwrap();
//!
//! let mut sampler = MeasurementSampler::with_seed(42);
//! let result = sampler.sample(&state, &[0, 1], 1000).unwrap();
//! assert_eq!(result.total_counts(), 1000);
//! assert_eq!(result.count("01") + result.count("10"), 0);
//! ```
//!
//! ## Encoding
//!
//! ```rust
//! use qsim_state::prelude::*;
//!
//! let state = AmplitudeEncoder::new(2).unwrap().encode(&[1.0, 1.0, 1.0, 1.0]).unwrap();
//! assert!((state.probability_of(3) - 0.25).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Amplitude vector (Gantree: L2_State → StateVector)
pub mod state;

/// Gate kernels (Gantree: L2_State → GateLibrary)
pub mod gates;

/// Amplitude encoding (Gantree: L2_State → AmplitudeEncoder)
pub mod encoder;

/// Shot sampling (Gantree: L3_Measure → MeasurementSampler)
pub mod sampler;

/// Measurement results (Gantree: L3_Measure → MeasurementResult)
pub mod result;

// ============================================================================
// Re-exports
// ============================================================================

pub use encoder::AmplitudeEncoder;
pub use gates::{
    apply_cnot, apply_controlled_z, apply_gate, apply_hadamard, apply_rotation_x,
    apply_rotation_y, apply_rotation_z,
};
pub use result::MeasurementResult;
pub use sampler::MeasurementSampler;
pub use state::StateVector;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qsim_state::prelude::*;
    //! ```

    pub use crate::encoder::AmplitudeEncoder;
    pub use crate::gates::{
        apply_cnot, apply_controlled_z, apply_gate, apply_hadamard, apply_rotation_x,
        apply_rotation_y, apply_rotation_z,
    };
    pub use crate::result::MeasurementResult;
    pub use crate::sampler::MeasurementSampler;
    pub use crate::state::StateVector;
}

// ============================================================================
// Integration Tests
// ============================================================================
