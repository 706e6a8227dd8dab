//! # QSIM Core
//!
//! Foundation types, gate descriptors, entanglement patterns and configuration
//! for the QSIM state-vector simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsim_core // L0+L1: Foundation + Circuit description (완료)
//!     L0_Foundation // 기반 타입/상수/에러/설정 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // 한계/허용오차 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!         SimConfig // 시뮬레이터 설정 (완료)
//!     L1_Circuit // 회로 기술 (완료)
//!         GateDescriptor // 게이트 enum (완료)
//!         EntanglementScheduler // 엔탱글 스케줄 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsim_core::prelude::*;
//!
//! let gates = schedule(4, EntanglementPattern::AllToAll);
//! assert_eq!(gates.len(), 6);
//! assert_eq!(gates[0], GateDescriptor::Cnot(0, 1));
//!
//! assert!(GateDescriptor::Cnot(1, 1).validate(4).is_err());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use qsim_core::prelude::*;
//!
//! let config = SimConfig::default().with_max_qubits(12).with_seed(42);
//! assert!(config.validate().is_ok());
//! assert!(config.check_qubits(13).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Simulator configuration (Gantree: L0_Foundation → SimConfig)
pub mod config;

/// Gate descriptors (Gantree: L1_Circuit → GateDescriptor)
pub mod gate;

/// Entanglement scheduling (Gantree: L1_Circuit → EntanglementScheduler)
pub mod entanglement;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SimConfig;
pub use constants::{limits, numeric, sampling};
pub use entanglement::{schedule, EntanglementPattern};
pub use error::{QsimError, QsimResult};
pub use gate::GateDescriptor;
pub use types::{Angle, Bitstring, Counts, ParamVec, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qsim_core::prelude::*;
    //! ```

    pub use crate::config::SimConfig;
    pub use crate::constants::{limits, numeric, sampling};
    pub use crate::entanglement::{schedule, EntanglementPattern};
    pub use crate::error::{QsimError, QsimResult};
    pub use crate::gate::GateDescriptor;
    pub use crate::types::{Angle, Bitstring, Counts, ParamVec, QubitId};
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

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_scheduled_gates_validate() {
        for n in 1..=6 {
            for pattern in [
                EntanglementPattern::Linear,
                EntanglementPattern::Circular,
                EntanglementPattern::AllToAll,
            ] {
                for gate in schedule(n, pattern) {
                    assert!(gate.validate(n).is_ok(), "{} invalid for n={}", gate, n);
                    assert!(gate.is_two_qubit());
                }
            }
        }
    }

    #[test]
    fn test_all_to_all_exact_order() {
        let pairs: Vec<(usize, usize)> = schedule(4, EntanglementPattern::AllToAll)
            .into_iter()
            .map(|g| match g {
                GateDescriptor::Cnot(c, t) => (c, t),
                other => panic!("unexpected gate {}", other),
            })
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_config_limits_consistent() {
        let config = SimConfig::default();
        assert!(config.check_qubits(limits::DEFAULT_MAX_QUBITS).is_ok());
        assert!(config.check_qubits(limits::DEFAULT_MAX_QUBITS + 1).is_err());
    }

    #[test]
    fn test_version() {
        assert_eq!(super::NAME, "qsim_core");
        assert!(!super::VERSION.is_empty());
    }
}
