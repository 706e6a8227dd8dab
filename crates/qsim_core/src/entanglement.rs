//! Entanglement patterns for QSIM
//!
//! Gantree: L1_Circuit → EntanglementScheduler
//!
//! Maps a register size and coupling topology to the ordered CNOT sequence used
//! by variational layers. The result depends only on its inputs, never on
//! amplitudes, so schedules are reproducible across runs.

use crate::gate::GateDescriptor;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entanglement topology
/// Gantree: EntanglementPattern // 엔탱글 토폴로지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntanglementPattern {
    /// Nearest-neighbour chain: 0-1-2-...-N-1
    #[default]
    Linear,
    /// Chain closed into a ring: 0-1-...-N-1-0
    Circular,
    /// Every unordered pair
    AllToAll,
}

impl EntanglementPattern {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "chain" => Some(EntanglementPattern::Linear),
            "circular" | "ring" => Some(EntanglementPattern::Circular),
            "all_to_all" | "all-to-all" | "full" => Some(EntanglementPattern::AllToAll),
            _ => None,
        }
    }

    /// Ordered (control, target) pairs for an n-qubit register
    /// Gantree: pairs(n) -> Vec<(QubitId, QubitId)> // 결합 쌍
    pub fn pairs(&self, num_qubits: usize) -> Vec<(QubitId, QubitId)> {
        let n = num_qubits;
        match self {
            EntanglementPattern::Linear => (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
            EntanglementPattern::Circular => {
                let mut pairs: Vec<(QubitId, QubitId)> =
                    (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
                if n > 1 {
                    pairs.push((n - 1, 0));
                }
                pairs
            }
            EntanglementPattern::AllToAll => {
                let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
                for i in 0..n {
                    for j in (i + 1)..n {
                        pairs.push((i, j));
                    }
                }
                pairs
            }
        }
    }

    /// Number of CNOTs one layer of this pattern emits
    pub fn gate_count(&self, num_qubits: usize) -> usize {
        let n = num_qubits;
        match self {
            EntanglementPattern::Linear => n.saturating_sub(1),
            EntanglementPattern::Circular if n > 1 => n,
            EntanglementPattern::Circular => 0,
            EntanglementPattern::AllToAll => n * n.saturating_sub(1) / 2,
        }
    }
}

impl fmt::Display for EntanglementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntanglementPattern::Linear => write!(f, "linear"),
            EntanglementPattern::Circular => write!(f, "circular"),
            EntanglementPattern::AllToAll => write!(f, "all_to_all"),
        }
    }
}

/// CNOT sequence for a register and pattern
/// Gantree: schedule(n, pattern) -> Vec<GateDescriptor> // CNOT 스케줄
pub fn schedule(num_qubits: usize, pattern: EntanglementPattern) -> Vec<GateDescriptor> {
    pattern
        .pairs(num_qubits)
        .into_iter()
        .map(|(c, t)| GateDescriptor::Cnot(c, t))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(
            EntanglementPattern::Linear.pairs(4),
            vec![(0, 1), (1, 2), (2, 3)]
        );
        assert!(EntanglementPattern::Linear.pairs(1).is_empty());
    }

    #[test]
    fn test_circular() {
        assert_eq!(
            EntanglementPattern::Circular.pairs(4),
            vec![(0, 1), (1, 2), (2, 3), (3, 0)]
        );
        assert_eq!(EntanglementPattern::Circular.pairs(2), vec![(0, 1), (1, 0)]);
        assert!(EntanglementPattern::Circular.pairs(1).is_empty());
    }

    #[test]
    fn test_all_to_all_order() {
        assert_eq!(
            EntanglementPattern::AllToAll.pairs(4),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_schedule_is_cnots() {
        let gates = schedule(3, EntanglementPattern::Circular);
        assert_eq!(
            gates,
            vec![
                GateDescriptor::Cnot(0, 1),
                GateDescriptor::Cnot(1, 2),
                GateDescriptor::Cnot(2, 0)
            ]
        );
    }

    #[test]
    fn test_schedule_deterministic() {
        let a = schedule(6, EntanglementPattern::AllToAll);
        let b = schedule(6, EntanglementPattern::AllToAll);
        assert_eq!(a, b);
    }

    #[test]
    fn test_gate_count_matches_pairs() {
        for n in 1..8 {
            for pattern in [
                EntanglementPattern::Linear,
                EntanglementPattern::Circular,
                EntanglementPattern::AllToAll,
            ] {
                assert_eq!(pattern.gate_count(n), pattern.pairs(n).len(), "{} n={}", pattern, n);
            }
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(EntanglementPattern::parse("ring"), Some(EntanglementPattern::Circular));
        assert_eq!(EntanglementPattern::parse("ALL_TO_ALL"), Some(EntanglementPattern::AllToAll));
        assert_eq!(EntanglementPattern::parse("star"), None);
        assert_eq!(EntanglementPattern::default(), EntanglementPattern::Linear);
    }
}
