//! QSIM Hybrid Feature Extraction
//!
//! Encodes a handful of classical rows, runs them through a seeded
//! variational circuit in parallel and prints the measured feature vectors.

use qsim_circuit::prelude::*;
use std::time::Instant;

fn main() -> QsimResult<()> {
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                 QSIM Hybrid Feature Extraction                       ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let num_qubits = 3;
    let shots = 4096u64;
    let config = SimConfig::default()
        .with_seed(42)
        .with_entanglement(EntanglementPattern::Circular)
        .with_depth(2)
        .with_shots(shots);

    let rows: Vec<Vec<f64>> = vec![
        vec![5.1, 3.5, 1.4, 0.2],
        vec![7.0, 3.2, 4.7, 1.4],
        vec![6.3, 3.3, 6.0, 2.5],
        vec![0.5, 0.0, 0.0, 0.5, 1.0, 0.0, 0.25, 0.0],
    ];

    println!("Configuration:");
    println!("  • Qubits: {}", num_qubits);
    println!("  • Depth: {}", config.variational_depth);
    println!("  • Entanglement: {}", config.entanglement);
    println!("  • Shots per row: {}", shots);
    println!();

    // =========================================================================
    // Single row, step by step
    // =========================================================================
    let circuit = VariationalCircuit::from_config(&config, num_qubits)?;
    println!("{}\n", circuit);

    let mut handle = encode_classical_with(&config, &rows[0], num_qubits)?;
    let encoded = handle.state().cloned();
    apply_variational_layer(&mut handle, &circuit)?;

    if let (Some(before), Some(after)) = (encoded, handle.state()) {
        println!("Encoded coherence:   {:.4}", before.coherence());
        println!("Evolved coherence:   {:.4}", after.coherence());
        println!("Fidelity to input:   {:.4}\n", before.fidelity(after)?);
    }

    let qubits: Vec<QubitId> = (0..num_qubits).collect();
    let result = measure(&mut handle, &qubits, shots)?;
    if let Some((bits, count)) = result.most_frequent() {
        println!("Most frequent: {} ({} / {})\n", bits, count, shots);
    }

    // =========================================================================
    // Whole batch in parallel
    // =========================================================================
    let start = Instant::now();
    let results = run_batch(&config, &rows, &circuit, &qubits, shots)?;
    let elapsed = start.elapsed();

    println!("┌──────┬────────────────────────────────────────────────────────────┐");
    println!("│ Row  │ Features                                                   │");
    println!("├──────┼────────────────────────────────────────────────────────────┤");
    for (i, features) in feature_vectors(&results)?.iter().enumerate() {
        let cells: Vec<String> = features.iter().map(|p| format!("{:.3}", p)).collect();
        println!("│ {:4} │ {:58} │", i, cells.join(" "));
    }
    println!("└──────┴────────────────────────────────────────────────────────────┘");
    println!("\nBatch time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}
