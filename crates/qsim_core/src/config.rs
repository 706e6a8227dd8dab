//! Simulator configuration
//!
//! Gantree: L0_Foundation → SimConfig
//!
//! Register limits, sampling defaults and variational layout shared by the
//! engine and the public interface functions.

use crate::constants::{limits, numeric, sampling};
use crate::entanglement::EntanglementPattern;
use crate::error::{QsimError, QsimResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Simulator configuration
/// Gantree: SimConfig // 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Largest register the engine will allocate
    /// Gantree: max_qubits: usize // 최대 큐비트 (20)
    pub max_qubits: usize,

    /// Shots used when the caller does not specify any
    /// Gantree: default_shots: u64 // 샷 수 (1024)
    pub default_shots: u64,

    /// Seed for sampling and parameter initialization
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,

    /// Entanglement pattern for variational layers
    pub entanglement: EntanglementPattern,

    /// Number of variational layers
    pub variational_depth: usize,

    /// Tolerance used by normalization checks
    pub norm_tolerance: f64,
}

impl SimConfig {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set maximum register size
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set default shot count
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.default_shots = shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set entanglement pattern
    pub fn with_entanglement(mut self, pattern: EntanglementPattern) -> Self {
        self.entanglement = pattern;
        self
    }

    /// Set variational depth
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.variational_depth = depth;
        self
    }

    /// Set normalization tolerance
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> QsimResult<()> {
        if self.max_qubits < limits::MIN_QUBITS || self.max_qubits > limits::HARD_MAX_QUBITS {
            return Err(QsimError::InvalidConfig(format!(
                "max_qubits must be in [{}, {}], got {}",
                limits::MIN_QUBITS,
                limits::HARD_MAX_QUBITS,
                self.max_qubits
            )));
        }

        if self.variational_depth == 0 {
            return Err(QsimError::InvalidConfig(
                "variational_depth must be > 0".to_string(),
            ));
        }

        if !(self.norm_tolerance > 0.0 && self.norm_tolerance < 1.0) {
            return Err(QsimError::InvalidConfig(format!(
                "norm_tolerance must be in (0, 1), got {}",
                self.norm_tolerance
            )));
        }

        Ok(())
    }

    /// Check a requested register size against this configuration
    /// Gantree: check_qubits(n) -> Result // 큐비트 수 검증
    pub fn check_qubits(&self, num_qubits: usize) -> QsimResult<()> {
        let max = self.max_qubits.min(limits::HARD_MAX_QUBITS);
        if num_qubits < limits::MIN_QUBITS || num_qubits > max {
            return Err(QsimError::InvalidQubitCount {
                requested: num_qubits,
                min: limits::MIN_QUBITS,
                max,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QsimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> QsimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate
    pub fn from_file(path: impl AsRef<Path>) -> QsimResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        log::debug!("Loaded simulator config from {}", path.as_ref().display());
        Ok(config)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: limits::DEFAULT_MAX_QUBITS,
            default_shots: sampling::DEFAULT_SHOTS,
            seed: None,
            entanglement: EntanglementPattern::Linear,
            variational_depth: sampling::DEFAULT_DEPTH,
            norm_tolerance: numeric::NORM_TOLERANCE,
        }
    }
}

impl fmt::Display for SimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimConfig(max_qubits={}, shots={}, depth={}, entanglement={})",
            self.max_qubits, self.default_shots, self.variational_depth, self.entanglement
        )
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
    fn test_default() {
        let config = SimConfig::default();
        assert_eq!(config.max_qubits, 20);
        assert_eq!(config.default_shots, 1024);
        assert!(config.seed.is_none());
        assert_abs_diff_eq!(config.norm_tolerance, 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimConfig::default()
            .with_max_qubits(12)
            .with_shots(4096)
            .with_seed(42)
            .with_entanglement(EntanglementPattern::AllToAll)
            .with_depth(3);

        assert_eq!(config.max_qubits, 12);
        assert_eq!(config.default_shots, 4096);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.entanglement, EntanglementPattern::AllToAll);
        assert_eq!(config.variational_depth, 3);
    }

    #[test]
    fn test_validation() {
        assert!(SimConfig::default().with_max_qubits(0).validate().is_err());
        assert!(SimConfig::default().with_max_qubits(40).validate().is_err());
        assert!(SimConfig::default().with_depth(0).validate().is_err());
        assert!(SimConfig::default().with_norm_tolerance(0.0).validate().is_err());
    }

    #[test]
    fn test_check_qubits() {
        let config = SimConfig::default().with_max_qubits(10);
        assert!(config.check_qubits(1).is_ok());
        assert!(config.check_qubits(10).is_ok());
        assert!(matches!(
            config.check_qubits(0),
            Err(QsimError::InvalidQubitCount { requested: 0, .. })
        ));
        assert!(matches!(
            config.check_qubits(11),
            Err(QsimError::InvalidQubitCount { max: 10, .. })
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig::default()
            .with_seed(7)
            .with_entanglement(EntanglementPattern::Circular);
        let json = config.to_json().unwrap();
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_tolerance_survives() {
        let config = SimConfig::default().with_norm_tolerance(2.5e-7);
        let parsed = SimConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_abs_diff_eq!(parsed.norm_tolerance, 2.5e-7, epsilon = 1e-20);

        let explicit = SimConfig::from_json(r#"{ "norm_tolerance": 0.001 }"#).unwrap();
        assert_abs_diff_eq!(explicit.norm_tolerance, 1e-3, epsilon = 1e-15);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let parsed = SimConfig::from_json(r#"{ "max_qubits": 8 }"#).unwrap();
        assert_eq!(parsed.max_qubits, 8);
        assert_eq!(parsed.default_shots, 1024);
    }

    #[test]
    fn test_json_invalid_rejected() {
        assert!(SimConfig::from_json(r#"{ "max_qubits": 99 }"#).is_err());
        assert!(matches!(
            SimConfig::from_json("{"),
            Err(QsimError::JsonError(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let err = SimConfig::from_file("/nonexistent/qsim.json").unwrap_err();
        assert!(matches!(err, QsimError::FileError(_)));
    }
}
