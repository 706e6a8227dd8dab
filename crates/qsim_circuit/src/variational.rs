//! Variational circuit
//!
//! Gantree: L4_Engine → VariationalCircuit
//!
//! Layered ansatz: each layer rotates every qubit by RX, RY, RZ with its own
//! angles, then entangles with the scheduled CNOTs. Parameters are owned here
//! and only change through `set_parameters`/`set_flat_parameters`; an outer
//! optimizer drives them.

use qsim_core::{
    sampling, schedule, Angle, EntanglementPattern, GateDescriptor, ParamVec, QsimError,
    QsimResult, SimConfig,
};
use qsim_state::{gates, StateVector};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Nested parameter tensor `[layer][qubit][rx, ry, rz]`
pub type ParameterTensor = Vec<Vec<Vec<Angle>>>;

/// Layered rotation + entanglement ansatz
/// Gantree: VariationalCircuit // 변분 회로
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationalCircuit {
    /// Register size
    num_qubits: usize,

    /// Number of layers
    depth: usize,

    /// Entanglement topology per layer
    pattern: EntanglementPattern,

    /// Angles `[layer][qubit] = [rx, ry, rz]`
    parameters: Vec<Vec<[Angle; 3]>>,
}

impl VariationalCircuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with angles drawn uniformly from (−π, π] using OS entropy
    /// Gantree: new(n, depth, pattern) -> Result<Self> // 생성
    pub fn new(num_qubits: usize, depth: usize, pattern: EntanglementPattern) -> QsimResult<Self> {
        let mut rng = ChaCha8Rng::from_entropy();
        Self::random(num_qubits, depth, pattern, &mut rng)
    }

    /// Create with reproducible random angles
    pub fn with_seed(
        num_qubits: usize,
        depth: usize,
        pattern: EntanglementPattern,
        seed: u64,
    ) -> QsimResult<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(num_qubits, depth, pattern, &mut rng)
    }

    /// Create using the configuration's depth, pattern and seed
    pub fn from_config(config: &SimConfig, num_qubits: usize) -> QsimResult<Self> {
        config.check_qubits(num_qubits)?;
        match config.seed {
            Some(seed) => Self::with_seed(
                num_qubits,
                config.variational_depth,
                config.entanglement,
                seed,
            ),
            None => Self::new(num_qubits, config.variational_depth, config.entanglement),
        }
    }

    /// Create from an explicit tensor; depth is the tensor's outer length
    pub fn from_parameters(
        num_qubits: usize,
        pattern: EntanglementPattern,
        tensor: &[Vec<Vec<Angle>>],
    ) -> QsimResult<Self> {
        check_layout(num_qubits, tensor.len())?;
        let parameters = parse_tensor(num_qubits, tensor.len(), tensor)?;
        Ok(Self {
            num_qubits,
            depth: tensor.len(),
            pattern,
            parameters,
        })
    }

    fn random<R: Rng>(
        num_qubits: usize,
        depth: usize,
        pattern: EntanglementPattern,
        rng: &mut R,
    ) -> QsimResult<Self> {
        check_layout(num_qubits, depth)?;
        // PI - [0, 2π) lands in (−π, π]
        let mut parameters = Vec::with_capacity(depth);
        for _ in 0..depth {
            let layer: Vec<[Angle; 3]> = (0..num_qubits)
                .map(|_| {
                    [
                        PI - rng.gen_range(0.0..2.0 * PI),
                        PI - rng.gen_range(0.0..2.0 * PI),
                        PI - rng.gen_range(0.0..2.0 * PI),
                    ]
                })
                .collect();
            parameters.push(layer);
        }
        Ok(Self {
            num_qubits,
            depth,
            pattern,
            parameters,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get register size
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get number of layers
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get entanglement pattern
    pub fn pattern(&self) -> EntanglementPattern {
        self.pattern
    }

    /// Angles of one qubit in one layer
    pub fn angles(&self, layer: usize, qubit: usize) -> Option<[Angle; 3]> {
        self.parameters.get(layer)?.get(qubit).copied()
    }

    /// Total number of angles (depth × n × 3)
    pub fn parameter_count(&self) -> usize {
        self.depth * self.num_qubits * sampling::ANGLES_PER_QUBIT
    }

    /// Gates one forward pass applies
    pub fn gate_count(&self) -> usize {
        self.depth
            * (self.num_qubits * sampling::ANGLES_PER_QUBIT
                + self.pattern.gate_count(self.num_qubits))
    }

    // ========================================================================
    // Parameter Access
    // ========================================================================

    /// Copy out the nested tensor
    pub fn parameters(&self) -> ParameterTensor {
        self.parameters
            .iter()
            .map(|layer| layer.iter().map(|a| a.to_vec()).collect())
            .collect()
    }

    /// Replace all angles
    /// Gantree: set_parameters(&mut, tensor) -> Result // 파라미터 갱신
    ///
    /// The tensor must be exactly depth × n × 3. On error the current angles
    /// are kept.
    pub fn set_parameters(&mut self, tensor: &[Vec<Vec<Angle>>]) -> QsimResult<()> {
        self.parameters = parse_tensor(self.num_qubits, self.depth, tensor)?;
        Ok(())
    }

    /// Flattened angles in `[layer][qubit][axis]` order
    pub fn flat_parameters(&self) -> ParamVec {
        self.parameters
            .iter()
            .flat_map(|layer| layer.iter().flat_map(|a| a.iter().copied()))
            .collect()
    }

    /// Replace all angles from a flat slice in `[layer][qubit][axis]` order
    pub fn set_flat_parameters(&mut self, flat: &[Angle]) -> QsimResult<()> {
        if flat.len() != self.parameter_count() {
            return Err(QsimError::ParameterShapeMismatch {
                expected: format!("{} values", self.parameter_count()),
                actual: format!("{} values", flat.len()),
            });
        }
        check_finite(flat)?;

        let n = self.num_qubits;
        let axes = sampling::ANGLES_PER_QUBIT;
        self.parameters = flat
            .chunks_exact(n * axes)
            .map(|layer| {
                layer
                    .chunks_exact(axes)
                    .map(|a| [a[0], a[1], a[2]])
                    .collect()
            })
            .collect();
        Ok(())
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Full gate sequence of one forward pass
    pub fn to_gates(&self) -> Vec<GateDescriptor> {
        let entangle = schedule(self.num_qubits, self.pattern);
        let mut out = Vec::with_capacity(self.gate_count());
        for layer in &self.parameters {
            for (q, &[rx, ry, rz]) in layer.iter().enumerate() {
                out.push(GateDescriptor::RotationX(q, rx));
                out.push(GateDescriptor::RotationY(q, ry));
                out.push(GateDescriptor::RotationZ(q, rz));
            }
            out.extend_from_slice(&entangle);
        }
        out
    }

    /// Apply all layers to `state` in place
    /// Gantree: forward(&self, state) -> Result // 순전파
    pub fn forward(&self, state: &mut StateVector) -> QsimResult<()> {
        if state.num_qubits() != self.num_qubits {
            return Err(QsimError::ParameterShapeMismatch {
                expected: format!("{}-qubit state", self.num_qubits),
                actual: format!("{}-qubit state", state.num_qubits()),
            });
        }

        let entangle = schedule(self.num_qubits, self.pattern);
        for layer in &self.parameters {
            for (q, &[rx, ry, rz]) in layer.iter().enumerate() {
                gates::apply_rotation_x(state, q, rx)?;
                gates::apply_rotation_y(state, q, ry)?;
                gates::apply_rotation_z(state, q, rz)?;
            }
            for gate in &entangle {
                gates::apply_gate(state, gate)?;
            }
        }
        log::trace!(
            "forward pass: {} layers on {} qubits ({})",
            self.depth,
            self.num_qubits,
            self.pattern
        );
        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to JSON
    pub fn to_json(&self) -> QsimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON, re-checking the tensor shape
    pub fn from_json(json: &str) -> QsimResult<Self> {
        let circuit: Self = serde_json::from_str(json)?;
        check_layout(circuit.num_qubits, circuit.depth)?;
        if circuit.parameters.len() != circuit.depth
            || circuit
                .parameters
                .iter()
                .any(|layer| layer.len() != circuit.num_qubits)
        {
            return Err(QsimError::ParameterShapeMismatch {
                expected: shape(circuit.depth, circuit.num_qubits),
                actual: format!("{} layers", circuit.parameters.len()),
            });
        }
        check_finite(&circuit.flat_parameters())?;
        Ok(circuit)
    }
}

impl fmt::Display for VariationalCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VariationalCircuit(qubits={}, depth={}, pattern={}, params={})",
            self.num_qubits,
            self.depth,
            self.pattern,
            self.parameter_count()
        )
    }
}

// ============================================================================
// Shape Helpers
// ============================================================================

fn shape(depth: usize, num_qubits: usize) -> String {
    format!("{}×{}×{}", depth, num_qubits, sampling::ANGLES_PER_QUBIT)
}

fn check_layout(num_qubits: usize, depth: usize) -> QsimResult<()> {
    if num_qubits == 0 {
        return Err(QsimError::InvalidQubitCount {
            requested: 0,
            min: qsim_core::limits::MIN_QUBITS,
            max: qsim_core::limits::HARD_MAX_QUBITS,
        });
    }
    if depth == 0 {
        return Err(QsimError::InvalidConfig(
            "variational depth must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn check_finite(values: &[Angle]) -> QsimResult<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(QsimError::NonFiniteInput { index, value }),
        None => Ok(()),
    }
}

fn parse_tensor(
    num_qubits: usize,
    depth: usize,
    tensor: &[Vec<Vec<Angle>>],
) -> QsimResult<Vec<Vec<[Angle; 3]>>> {
    let mismatch = |actual: String| QsimError::ParameterShapeMismatch {
        expected: shape(depth, num_qubits),
        actual,
    };

    if tensor.len() != depth {
        return Err(mismatch(format!("{} layers", tensor.len())));
    }

    let mut parsed = Vec::with_capacity(depth);
    for (l, layer) in tensor.iter().enumerate() {
        if layer.len() != num_qubits {
            return Err(mismatch(format!("layer {} has {} qubits", l, layer.len())));
        }
        let mut row = Vec::with_capacity(num_qubits);
        for (q, angles) in layer.iter().enumerate() {
            match angles.as_slice() {
                &[rx, ry, rz] => row.push([rx, ry, rz]),
                other => {
                    return Err(mismatch(format!(
                        "layer {} qubit {} has {} angles",
                        l,
                        q,
                        other.len()
                    )))
                }
            }
        }
        parsed.push(row);
    }

    let flat: Vec<Angle> = parsed.iter().flatten().flatten().copied().collect();
    check_finite(&flat)?;
    Ok(parsed)
}

// ============================================================================
// Tests
// ============================================================================
