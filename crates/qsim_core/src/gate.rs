//! Gate descriptors for QSIM
//!
//! Gantree: L1_Circuit → GateDescriptor
//!
//! A gate is plain data. The state crate dispatches each variant to the
//! matching amplitude kernel, so descriptors carry no behaviour of their own
//! beyond validation and introspection.

use crate::error::{QsimError, QsimResult};
use crate::types::{Angle, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate descriptor
/// Gantree: GateDescriptor // 게이트 enum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateDescriptor {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Hadamard gate
    /// Gantree: Hadamard(QubitId) // 하다마드
    Hadamard(QubitId),

    /// Rotation around X-axis
    /// Gantree: RotationX(QubitId, Angle) // X 회전
    RotationX(QubitId, Angle),

    /// Rotation around Y-axis
    /// Gantree: RotationY(QubitId, Angle) // Y 회전
    RotationY(QubitId, Angle),

    /// Rotation around Z-axis (phase on the |1⟩ subspace)
    /// Gantree: RotationZ(QubitId, Angle) // Z 회전
    RotationZ(QubitId, Angle),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (control, target)
    /// Gantree: Cnot(QubitId, QubitId) // ctrl, tgt
    Cnot(QubitId, QubitId),

    /// Controlled-Z (control, target)
    /// Gantree: ControlledZ(QubitId, QubitId) // 제어-Z
    ControlledZ(QubitId, QubitId),
}

impl GateDescriptor {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    /// Gantree: qubits(&self) -> Vec<QubitId> // 관련 큐비트
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            GateDescriptor::Hadamard(q)
            | GateDescriptor::RotationX(q, _)
            | GateDescriptor::RotationY(q, _)
            | GateDescriptor::RotationZ(q, _) => vec![*q],

            GateDescriptor::Cnot(c, t) | GateDescriptor::ControlledZ(c, t) => vec![*c, *t],
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            GateDescriptor::Hadamard(_)
                | GateDescriptor::RotationX(_, _)
                | GateDescriptor::RotationY(_, _)
                | GateDescriptor::RotationZ(_, _)
        )
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(
            self,
            GateDescriptor::Cnot(_, _) | GateDescriptor::ControlledZ(_, _)
        )
    }

    /// Check if gate carries an angle
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some()
    }

    /// Rotation angle, if any
    pub fn angle(&self) -> Option<Angle> {
        match self {
            GateDescriptor::RotationX(_, a)
            | GateDescriptor::RotationY(_, a)
            | GateDescriptor::RotationZ(_, a) => Some(*a),
            _ => None,
        }
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            GateDescriptor::Hadamard(_) => "h",
            GateDescriptor::RotationX(_, _) => "rx",
            GateDescriptor::RotationY(_, _) => "ry",
            GateDescriptor::RotationZ(_, _) => "rz",
            GateDescriptor::Cnot(_, _) => "cx",
            GateDescriptor::ControlledZ(_, _) => "cz",
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate operands against a register size
    /// Gantree: validate(&self, n) -> Result // 대상 검증
    ///
    /// Fails with `InvalidGateTarget` when any qubit is `>= num_qubits` or a
    /// two-qubit gate names the same qubit twice.
    pub fn validate(&self, num_qubits: usize) -> QsimResult<()> {
        for q in self.qubits() {
            if q >= num_qubits {
                return Err(QsimError::qubit_out_of_range(q, num_qubits));
            }
        }

        if let GateDescriptor::Cnot(c, t) | GateDescriptor::ControlledZ(c, t) = self {
            if c == t {
                return Err(QsimError::same_control_target(*c, num_qubits));
            }
        }

        Ok(())
    }

    /// Convert to OpenQASM 2.0 style text
    pub fn to_qasm(&self) -> String {
        match self {
            GateDescriptor::Hadamard(q) => format!("h q[{}];", q),
            GateDescriptor::RotationX(q, theta) => format!("rx({}) q[{}];", theta, q),
            GateDescriptor::RotationY(q, theta) => format!("ry({}) q[{}];", theta, q),
            GateDescriptor::RotationZ(q, theta) => format!("rz({}) q[{}];", theta, q),
            GateDescriptor::Cnot(c, t) => format!("cx q[{}],q[{}];", c, t),
            GateDescriptor::ControlledZ(c, t) => format!("cz q[{}],q[{}];", c, t),
        }
    }
}

impl fmt::Display for GateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gate_qubits() {
        assert_eq!(GateDescriptor::Hadamard(0).qubits(), vec![0]);
        assert_eq!(GateDescriptor::RotationY(2, 0.3).qubits(), vec![2]);
        assert_eq!(GateDescriptor::Cnot(0, 1).qubits(), vec![0, 1]);
    }

    #[test]
    fn test_gate_classification() {
        assert!(GateDescriptor::Hadamard(0).is_single_qubit());
        assert!(!GateDescriptor::Hadamard(0).is_two_qubit());
        assert!(GateDescriptor::ControlledZ(0, 1).is_two_qubit());
        assert!(GateDescriptor::RotationX(0, 1.0).is_parameterized());
        assert!(!GateDescriptor::Cnot(0, 1).is_parameterized());
        assert_abs_diff_eq!(GateDescriptor::RotationZ(0, 0.25).angle().unwrap(), 0.25);
        assert_abs_diff_eq!(
            GateDescriptor::RotationX(1, -std::f64::consts::PI).angle().unwrap(),
            -std::f64::consts::PI
        );
        assert_eq!(GateDescriptor::Cnot(0, 1).angle(), None);
    }

    #[test]
    fn test_validate_in_range() {
        assert!(GateDescriptor::Hadamard(2).validate(3).is_ok());
        assert!(GateDescriptor::Cnot(2, 0).validate(3).is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        let err = GateDescriptor::RotationX(3, 0.1).validate(3).unwrap_err();
        assert!(matches!(err, QsimError::InvalidGateTarget { num_qubits: 3, .. }));

        let err = GateDescriptor::Cnot(0, 5).validate(3).unwrap_err();
        assert!(matches!(err, QsimError::InvalidGateTarget { .. }));
    }

    #[test]
    fn test_validate_same_control_target() {
        assert!(GateDescriptor::Cnot(1, 1).validate(3).is_err());
        assert!(GateDescriptor::ControlledZ(0, 0).validate(3).is_err());
    }

    #[test]
    fn test_gate_to_qasm() {
        assert_eq!(GateDescriptor::Hadamard(0).to_qasm(), "h q[0];");
        assert_eq!(GateDescriptor::Cnot(0, 1).to_qasm(), "cx q[0],q[1];");
        assert_eq!(GateDescriptor::RotationZ(1, 0.5).to_string(), "rz(0.5) q[1];");
    }

    #[test]
    fn test_serde_roundtrip() {
        let gate = GateDescriptor::RotationY(1, 0.75);
        let json = serde_json::to_string(&gate).unwrap();
        let back: GateDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(gate, back);
    }
}
