//! Circuit engine
//!
//! Gantree: L4_Engine → CircuitEngine
//!
//! Owns one amplitude vector and drives it through
//! `Uninitialized → Ready ⇄ Measuring`. Every call runs to completion before
//! returning; there is no shared state between engines.

use crate::variational::VariationalCircuit;
use qsim_core::{GateDescriptor, QsimError, QsimResult, QubitId, SimConfig};
use qsim_state::{gates, MeasurementResult, MeasurementSampler, StateVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine lifecycle state
/// Gantree: EngineStatus // 엔진 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EngineStatus {
    /// No register allocated yet
    #[default]
    Uninitialized,
    /// Register allocated, accepting gates
    Ready,
    /// Sampling in progress
    Measuring,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Uninitialized => write!(f, "uninitialized"),
            EngineStatus::Ready => write!(f, "ready"),
            EngineStatus::Measuring => write!(f, "measuring"),
        }
    }
}

/// State-vector circuit engine
/// Gantree: CircuitEngine // 회로 엔진
#[derive(Debug, Clone)]
pub struct CircuitEngine {
    /// Configuration
    config: SimConfig,

    /// Amplitude vector (None until initialized)
    state: Option<StateVector>,

    /// Lifecycle state
    status: EngineStatus,

    /// Shot sampler
    sampler: MeasurementSampler,

    /// Gates applied since the last initialize/reset
    gate_count: usize,
}

impl CircuitEngine {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an uninitialized engine
    pub fn new(config: SimConfig) -> Self {
        let sampler = MeasurementSampler::from_seed(config.seed);
        Self {
            config,
            state: None,
            status: EngineStatus::Uninitialized,
            sampler,
            gate_count: 0,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Allocate |0...0⟩ on `num_qubits` qubits
    /// Gantree: initialize(&mut, n) -> Result // 초기화
    ///
    /// The size is checked against the configuration before anything is
    /// allocated.
    pub fn initialize(&mut self, num_qubits: usize) -> QsimResult<()> {
        self.config.check_qubits(num_qubits)?;
        let state = StateVector::new(num_qubits)?;
        log::debug!("engine initialized: {} qubits", num_qubits);
        self.install(state);
        Ok(())
    }

    /// Adopt a prepared state (e.g. from the amplitude encoder)
    pub fn initialize_with_state(&mut self, state: StateVector) -> QsimResult<()> {
        self.config.check_qubits(state.num_qubits())?;
        if state.dimension() != 1usize << state.num_qubits() {
            return Err(QsimError::InvalidQubitCount {
                requested: state.num_qubits(),
                min: state.dimension().trailing_zeros() as usize,
                max: state.dimension().trailing_zeros() as usize,
            });
        }
        log::debug!("engine initialized from prepared {}", state);
        self.install(state);
        Ok(())
    }

    fn install(&mut self, state: StateVector) {
        self.state = Some(state);
        self.status = EngineStatus::Ready;
        self.gate_count = 0;
    }

    /// Return to |0...0⟩ at the current size
    /// Gantree: reset(&mut) -> Result // 리셋
    pub fn reset(&mut self) -> QsimResult<()> {
        let state = self.ready_state_mut("reset")?;
        state.reset();
        self.gate_count = 0;
        log::debug!("engine reset");
        Ok(())
    }

    // ========================================================================
    // Evolution
    // ========================================================================

    /// Apply one gate
    /// Gantree: apply_gate(&mut, gate) -> Result // 게이트 적용
    pub fn apply_gate(&mut self, gate: &GateDescriptor) -> QsimResult<()> {
        let state = self.ready_state_mut("apply_gate")?;
        gates::apply_gate(state, gate)?;
        self.gate_count += 1;
        Ok(())
    }

    /// Apply gates in order, stopping at the first failure
    pub fn apply_gates<'a>(
        &mut self,
        gates: impl IntoIterator<Item = &'a GateDescriptor>,
    ) -> QsimResult<()> {
        for gate in gates {
            self.apply_gate(gate)?;
        }
        Ok(())
    }

    /// Run a variational circuit's forward pass on the register
    pub fn apply_variational(&mut self, circuit: &VariationalCircuit) -> QsimResult<()> {
        let state = self.ready_state_mut("apply_variational")?;
        circuit.forward(state)?;
        self.gate_count += circuit.gate_count();
        Ok(())
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Sample `shots` outcomes of `qubits`.
    ///
    /// The amplitudes are left exactly as they were: repeated calls sample the
    /// same distribution (no collapse).
    pub fn measure(&mut self, qubits: &[QubitId], shots: u64) -> QsimResult<MeasurementResult> {
        if self.status != EngineStatus::Ready {
            return Err(QsimError::NotInitialized("measure".to_string()));
        }
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| QsimError::NotInitialized("measure".to_string()))?;

        self.status = EngineStatus::Measuring;
        let result = self.sampler.sample(state, qubits, shots);
        self.status = EngineStatus::Ready;
        result
    }

    /// Sample all qubits in register order using the configured shot count
    pub fn measure_all(&mut self) -> QsimResult<MeasurementResult> {
        let n = self
            .num_qubits()
            .ok_or_else(|| QsimError::NotInitialized("measure_all".to_string()))?;
        let qubits: Vec<QubitId> = (0..n).collect();
        let shots = self.config.default_shots;
        self.measure(&qubits, shots)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get lifecycle state
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Get register size (None before initialize)
    pub fn num_qubits(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.num_qubits())
    }

    /// Read-only view of the register
    pub fn state(&self) -> Option<&StateVector> {
        self.state.as_ref()
    }

    /// Gates applied since the last initialize/reset
    pub fn gate_count(&self) -> usize {
        self.gate_count
    }

    /// Born probabilities of the register
    pub fn probabilities(&self) -> QsimResult<Vec<f64>> {
        self.state
            .as_ref()
            .map(|s| s.probabilities())
            .ok_or_else(|| QsimError::NotInitialized("probabilities".to_string()))
    }

    /// Get configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn ready_state_mut(&mut self, op: &str) -> QsimResult<&mut StateVector> {
        match (self.status, self.state.as_mut()) {
            (EngineStatus::Ready, Some(state)) => Ok(state),
            _ => Err(QsimError::NotInitialized(op.to_string())),
        }
    }
}

impl Default for CircuitEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
