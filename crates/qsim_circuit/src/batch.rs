//! Batch processing
//!
//! Gantree: L5_Interface → Batch
//!
//! Runs independent samples on the rayon pool, one amplitude vector per task.
//! With a configured seed, item `i` samples with `seed + i`, so results do not
//! depend on how rayon schedules the work.

use crate::handle::{apply_variational_layer, encode_classical_with, measure};
use crate::variational::VariationalCircuit;
use qsim_core::{QsimResult, QubitId, SimConfig};
use qsim_state::{AmplitudeEncoder, MeasurementResult, StateVector};
use rayon::prelude::*;

/// Encode each input independently
/// Gantree: encode_batch(inputs, n) -> Vec<Result<StateVector>> // 일괄 인코딩
///
/// Failures are reported per item; one bad row does not stop the rest.
pub fn encode_batch(inputs: &[Vec<f64>], num_qubits: usize) -> Vec<QsimResult<StateVector>> {
    log::debug!("encoding batch of {} into {} qubits", inputs.len(), num_qubits);
    let encoder = match AmplitudeEncoder::new(num_qubits) {
        Ok(encoder) => encoder,
        Err(err) => return inputs.iter().map(|_| Err(err.clone())).collect(),
    };
    inputs.par_iter().map(|v| encoder.encode(v)).collect()
}

/// Encode, run `circuit` and measure each input
/// Gantree: run_batch(config, inputs, circuit, qubits, shots) -> Result<Vec<MeasurementResult>> // 일괄 실행
///
/// Fails as a whole if any item fails.
pub fn run_batch(
    config: &SimConfig,
    inputs: &[Vec<f64>],
    circuit: &VariationalCircuit,
    qubits: &[QubitId],
    shots: u64,
) -> QsimResult<Vec<MeasurementResult>> {
    log::debug!(
        "running batch of {} through {} ({} shots each)",
        inputs.len(),
        circuit,
        shots
    );
    inputs
        .par_iter()
        .enumerate()
        .map(|(i, input)| run_one(&item_config(config, i), input, circuit, qubits, shots))
        .collect()
}

/// Feature vectors of a batch of results
pub fn feature_vectors(results: &[MeasurementResult]) -> QsimResult<Vec<Vec<f64>>> {
    results.iter().map(|r| r.to_feature_vector()).collect()
}

fn item_config(config: &SimConfig, index: usize) -> SimConfig {
    let mut item = config.clone();
    item.seed = config.seed.map(|s| s.wrapping_add(index as u64));
    item
}

fn run_one(
    config: &SimConfig,
    input: &[f64],
    circuit: &VariationalCircuit,
    qubits: &[QubitId],
    shots: u64,
) -> QsimResult<MeasurementResult> {
    let mut handle = encode_classical_with(config, input, circuit.num_qubits())?;
    apply_variational_layer(&mut handle, circuit)?;
    measure(&mut handle, qubits, shots)
}

// ============================================================================
// Tests
// ============================================================================
