//! Supports reading lattice parameters from a YAML file.

use std::io;
use std::path::Path;

use crate::params::PlanningParams;

/// Failures while reading or validating a parameter file.
#[derive(Debug)]
pub enum ParamsFileError {
    IoError(io::Error),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ParamsFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParamsFileError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParamsFileError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParamsFileError::ValidationError(ref msg) =>
                write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for ParamsFileError {}

impl From<io::Error> for ParamsFileError {
    fn from(err: io::Error) -> Self {
        ParamsFileError::IoError(err)
    }
}

impl PlanningParams {
    /// Read lattice parameters from a YAML file like this:
    /// ```yaml
    /// num_joints: 7
    /// coord_delta: [0.0698, 0.0698, 0.0698, 0.0698, 0.0698, 0.0698, 0.0698]
    /// cost_multiplier: 1000
    /// max_prim_offset: 0.0698
    /// ```
    /// `max_prim_offset` may be omitted and defaults to 4 degrees.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParamsFileError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse lattice parameters from a YAML string and validate them.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParamsFileError> {
        let params: PlanningParams = serde_yaml::from_str(yaml)
            .map_err(|e| ParamsFileError::ParseError(e.to_string()))?;
        params.validated()
    }

    fn validated(self) -> Result<Self, ParamsFileError> {
        if self.num_joints == 0 {
            return Err(ParamsFileError::ValidationError(
                "num_joints must be at least 1".to_string(),
            ));
        }
        if self.coord_delta.len() != self.num_joints {
            return Err(ParamsFileError::ValidationError(format!(
                "coord_delta must have one entry per joint: expected {}, found {}",
                self.num_joints,
                self.coord_delta.len()
            )));
        }
        if self.coord_delta.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(ParamsFileError::ValidationError(
                "coord_delta entries must be finite and positive".to_string(),
            ));
        }
        if self.cost_multiplier < 1 {
            return Err(ParamsFileError::ValidationError(
                "cost_multiplier must be positive".to_string(),
            ));
        }
        if !self.max_prim_offset.is_finite() || self.max_prim_offset <= 0.0 {
            return Err(ParamsFileError::ValidationError(
                "max_prim_offset must be finite and positive".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "
num_joints: 3
coord_delta: [0.1, 0.1, 0.2]
cost_multiplier: 1000
max_prim_offset: 0.1
";

    #[test]
    fn test_reads_complete_file() {
        let params = PlanningParams::from_yaml(GOOD).expect("should parse");
        assert_eq!(params.num_joints, 3);
        assert_eq!(params.coord_delta, vec![0.1, 0.1, 0.2]);
        assert_eq!(params.cost_multiplier, 1000);
        assert_eq!(params.max_prim_offset, 0.1);
    }

    #[test]
    fn test_max_prim_offset_defaults() {
        let yaml = "
num_joints: 2
coord_delta: [0.1, 0.1]
cost_multiplier: 100
";
        let params = PlanningParams::from_yaml(yaml).expect("should parse");
        assert!((params.max_prim_offset - 4.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_mismatched_delta_length() {
        let yaml = "
num_joints: 4
coord_delta: [0.1, 0.1]
cost_multiplier: 100
";
        match PlanningParams::from_yaml(yaml) {
            Err(ParamsFileError::ValidationError(msg)) => {
                assert!(msg.contains("one entry per joint"), "got: {}", msg)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_nonpositive_delta() {
        let yaml = "
num_joints: 2
coord_delta: [0.1, -0.1]
cost_multiplier: 100
";
        assert!(matches!(
            PlanningParams::from_yaml(yaml),
            Err(ParamsFileError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_zero_cost_multiplier() {
        let yaml = "
num_joints: 1
coord_delta: [0.1]
cost_multiplier: 0
";
        assert!(matches!(
            PlanningParams::from_yaml(yaml),
            Err(ParamsFileError::ValidationError(_))
        ));
    }

    #[test]
    fn test_reports_malformed_yaml() {
        assert!(matches!(
            PlanningParams::from_yaml("num_joints: [not a number"),
            Err(ParamsFileError::ParseError(_))
        ));
    }
}
