//! Core types for QSIM
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and the measurement bitstring shared across the workspace.

use crate::error::{QsimError, QsimResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed, little-endian bit position)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Rotation angle in radians
/// Gantree: Angle // pub type Angle = f64
pub type Angle = f64;

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

/// Flat parameter vector for variational circuits
pub type ParamVec = Vec<f64>;

// ============================================================================
// Bitstring
// ============================================================================

/// Outcome of observing a list of qubits.
///
/// Character `k` holds the value of the `k`-th requested qubit, so the textual
/// form follows the request order rather than the register's bit order.
/// Gantree: Bitstring // 비트열 타입
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Extract the requested qubits' bits from a full basis index
    /// Gantree: from_index(index, qubits) -> Self // 인덱스 추출
    pub fn from_index(index: usize, qubits: &[QubitId]) -> Self {
        Self {
            bits: qubits.iter().map(|&q| (index >> q) & 1 == 1).collect(),
        }
    }

    /// Parse from string (e.g., "0110")
    pub fn parse(s: &str) -> QsimResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QsimError::InvalidBitstring(format!(
                    "'{}' must contain only '0' and '1'",
                    s
                ))),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get bit at position
    pub fn get(&self, position: usize) -> Option<bool> {
        self.bits.get(position).copied()
    }

    /// Count number of 1s
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Pack into an index where position `k` is bit `k`
    pub fn to_index(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(k, _)| 1 << k)
            .sum()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
