//! Defines the lattice discretization and cost parameters.

use serde::{Deserialize, Serialize};

/// Parameters fixing the shape of the configuration-space lattice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningParams {
    /// Number of planned joints. Configurations handed to the lattice must
    /// carry at least this many values.
    pub num_joints: usize,

    /// Per-joint lattice resolution Δ in radians (or meters for prismatic
    /// joints). One entry per planned joint.
    pub coord_delta: Vec<f64>,

    /// Integer cost charged per transition. Edge costs are
    /// `cost_multiplier` regardless of the action magnitude.
    pub cost_multiplier: i32,

    /// Largest joint displacement a single unit primitive spans. Only
    /// consulted by cost policies that scale with the number of primitives;
    /// the default flat policy ignores it.
    #[serde(default = "default_max_prim_offset")]
    pub max_prim_offset: f64,
}

fn default_max_prim_offset() -> f64 {
    // matches the common 4 degree primitive resolution
    4.0_f64.to_radians()
}

impl PlanningParams {
    /// Parameters with the same resolution on every joint.
    pub fn uniform(num_joints: usize, delta: f64, cost_multiplier: i32) -> Self {
        PlanningParams {
            num_joints,
            coord_delta: vec![delta; num_joints],
            cost_multiplier,
            max_prim_offset: delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_replicates_delta() {
        let params = PlanningParams::uniform(7, 0.1, 1000);
        assert_eq!(params.num_joints, 7);
        assert_eq!(params.coord_delta, vec![0.1; 7]);
        assert_eq!(params.cost_multiplier, 1000);
    }
}
