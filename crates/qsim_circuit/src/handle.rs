//! External interface
//!
//! Gantree: L5_Interface → CircuitHandle
//!
//! Free functions over a caller-owned handle. Every handle wraps its own
//! engine; there is no global registry, so independent handles can live on
//! different threads.

use crate::engine::CircuitEngine;
use crate::variational::VariationalCircuit;
use qsim_core::{GateDescriptor, QsimResult, QubitId, SimConfig};
use qsim_state::{AmplitudeEncoder, MeasurementResult, StateVector};
use std::fmt;

/// Caller-owned circuit
/// Gantree: CircuitHandle // 회로 핸들
#[derive(Debug, Clone)]
pub struct CircuitHandle {
    engine: CircuitEngine,
}

impl CircuitHandle {
    /// Wrap an engine
    pub fn from_engine(engine: CircuitEngine) -> Self {
        Self { engine }
    }

    /// Get engine
    pub fn engine(&self) -> &CircuitEngine {
        &self.engine
    }

    /// Get engine mutably
    pub fn engine_mut(&mut self) -> &mut CircuitEngine {
        &mut self.engine
    }

    /// Unwrap into the engine
    pub fn into_engine(self) -> CircuitEngine {
        self.engine
    }

    /// Read-only view of the register
    pub fn state(&self) -> Option<&StateVector> {
        self.engine.state()
    }

    /// Register size
    pub fn num_qubits(&self) -> usize {
        self.engine.num_qubits().unwrap_or(0)
    }
}

impl fmt::Display for CircuitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CircuitHandle(qubits={}, status={}, gates={})",
            self.num_qubits(),
            self.engine.status(),
            self.engine.gate_count()
        )
    }
}

// ============================================================================
// Interface Functions
// ============================================================================

/// Allocate |0...0⟩ with the default configuration
/// Gantree: create_circuit(n) -> Result<CircuitHandle> // 회로 생성
pub fn create_circuit(num_qubits: usize) -> QsimResult<CircuitHandle> {
    create_circuit_with(&SimConfig::default(), num_qubits)
}

/// Allocate |0...0⟩ with an explicit configuration
pub fn create_circuit_with(config: &SimConfig, num_qubits: usize) -> QsimResult<CircuitHandle> {
    config.validate()?;
    let mut engine = CircuitEngine::new(config.clone());
    engine.initialize(num_qubits)?;
    Ok(CircuitHandle::from_engine(engine))
}

/// Apply one gate
/// Gantree: apply_gate(handle, gate) -> Result // 게이트 적용
pub fn apply_gate(handle: &mut CircuitHandle, gate: &GateDescriptor) -> QsimResult<()> {
    handle.engine.apply_gate(gate)
}

/// Run a variational circuit's forward pass
/// Gantree: apply_variational_layer(handle, circuit) -> Result // 변분 레이어
pub fn apply_variational_layer(
    handle: &mut CircuitHandle,
    circuit: &VariationalCircuit,
) -> QsimResult<()> {
    handle.engine.apply_variational(circuit)
}

/// Sample `shots` outcomes of `qubits`
/// Gantree: measure(handle, qubits, shots) -> Result<MeasurementResult> // 측정
pub fn measure(
    handle: &mut CircuitHandle,
    qubits: &[QubitId],
    shots: u64,
) -> QsimResult<MeasurementResult> {
    handle.engine.measure(qubits, shots)
}

/// Amplitude-encode a classical vector into a fresh handle
/// Gantree: encode_classical(vector, n) -> Result<CircuitHandle> // 고전 인코딩
pub fn encode_classical(vector: &[f64], num_qubits: usize) -> QsimResult<CircuitHandle> {
    encode_classical_with(&SimConfig::default(), vector, num_qubits)
}

/// Amplitude-encode with an explicit configuration
pub fn encode_classical_with(
    config: &SimConfig,
    vector: &[f64],
    num_qubits: usize,
) -> QsimResult<CircuitHandle> {
    config.validate()?;
    config.check_qubits(num_qubits)?;
    let state = AmplitudeEncoder::new(num_qubits)?.encode(vector)?;
    let mut engine = CircuitEngine::new(config.clone());
    engine.initialize_with_state(state)?;
    Ok(CircuitHandle::from_engine(engine))
}

// ============================================================================
// Tests
// ============================================================================
