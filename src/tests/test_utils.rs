//! Shared fixtures for the lattice scenarios: a 2-DOF planar arm whose FK is
//! the identity on the first two joints, a scriptable collision oracle, a
//! uniform grid and a one-action primitive generator.

use std::cell::Cell;
use std::f64::consts::PI;
use std::sync::Arc;

use crate::goal::ActiveGoal;
use crate::heuristic::Heuristic;
use crate::lattice::ArmLattice;
use crate::params::PlanningParams;
use crate::planner_traits::{
    Action, ActionSpace, CollisionOracle, ForwardKinematics, Joints, OccupancyGrid, RobotModel,
    StateValidity, SweepValidity,
};

pub const DELTA: f64 = PI / 4.0;
pub const COST: i32 = 1000;

fn close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
}

/// Two revolute joints limited to `[-π, π]`; the planning-link pose is
/// `[q0, q1, 0, 0, 0, 0]`, which makes workspace positions easy to read off.
pub struct PlanarArm;

impl RobotModel for PlanarArm {
    fn min_pos_limit(&self, _joint: usize) -> f64 {
        -PI
    }
    fn max_pos_limit(&self, _joint: usize) -> f64 {
        PI
    }
    fn has_pos_limit(&self, _joint: usize) -> bool {
        true
    }
    fn check_joint_limits(&self, joints: &[f64], _verbose: bool) -> bool {
        joints.iter().take(2).all(|q| (-PI..=PI).contains(q))
    }
    fn forward_kinematics(&self) -> Option<&dyn ForwardKinematics> {
        Some(self)
    }
}

impl ForwardKinematics for PlanarArm {
    fn compute_planning_link_fk(&self, joints: &[f64]) -> Option<[f64; 6]> {
        Some([joints[0], joints[1], 0.0, 0.0, 0.0, 0.0])
    }
}

/// Same arm with no FK capability, for the `FkUnavailable` paths.
pub struct ArmWithoutFk;

impl RobotModel for ArmWithoutFk {
    fn min_pos_limit(&self, _joint: usize) -> f64 {
        -PI
    }
    fn max_pos_limit(&self, _joint: usize) -> f64 {
        PI
    }
    fn has_pos_limit(&self, _joint: usize) -> bool {
        true
    }
    fn check_joint_limits(&self, joints: &[f64], _verbose: bool) -> bool {
        joints.iter().take(2).all(|q| (-PI..=PI).contains(q))
    }
}

/// Oracle scripted per test: configurations in `invalid_states` fail the
/// point query, segments ending in `blocked_to` fail the sweep query.
#[derive(Default)]
pub struct ScriptedOracle {
    pub invalid_states: Vec<Joints>,
    pub blocked_to: Vec<Joints>,
    pub clear_distance: f64,
}

impl ScriptedOracle {
    pub fn permissive() -> Self {
        ScriptedOracle {
            invalid_states: Vec::new(),
            blocked_to: Vec::new(),
            clear_distance: 0.5,
        }
    }
}

impl CollisionOracle for ScriptedOracle {
    fn is_state_valid(&self, joints: &[f64], _verbose: bool) -> StateValidity {
        let hit = self.invalid_states.iter().any(|s| close(s, joints));
        StateValidity {
            valid: !hit,
            distance: if hit { 0.0 } else { self.clear_distance },
        }
    }

    fn is_state_to_state_valid(&self, _from: &[f64], to: &[f64]) -> SweepValidity {
        let hit = self.blocked_to.iter().any(|s| close(s, to));
        SweepValidity {
            valid: !hit,
            path_length: 1,
            checks: 1,
            distance: if hit { 0.0 } else { self.clear_distance },
        }
    }
}

pub struct UnitGrid {
    pub resolution: f64,
}

impl OccupancyGrid for UnitGrid {
    fn world_to_grid(&self, x: f64, y: f64, z: f64) -> [i32; 3] {
        [
            (x / self.resolution).floor() as i32,
            (y / self.resolution).floor() as i32,
            (z / self.resolution).floor() as i32,
        ]
    }
    fn reference_frame(&self) -> &str {
        "planning"
    }
    fn resolution(&self) -> f64 {
        self.resolution
    }
}

/// Exactly one primitive: advance joint 0 by `step`, one waypoint.
pub struct StepJointZero {
    pub step: f64,
}

impl ActionSpace for StepJointZero {
    fn apply(&self, source: &[f64]) -> Option<Vec<Action>> {
        Some(vec![vec![vec![source[0] + self.step, source[1]]]])
    }
}

/// Heuristic that measures grid-cell Manhattan distance to the goal cell and
/// records every notification it receives.
#[derive(Default)]
pub struct RecordingHeuristic {
    pub start_updates: Cell<usize>,
    pub goal_updates: Cell<usize>,
}

impl Heuristic for RecordingHeuristic {
    fn goal_heuristic(&self, lattice: &ArmLattice, state_id: usize) -> i32 {
        let state = lattice.state(state_id).expect("state must exist");
        let goal_cell = lattice.goal_constraints().map_or([0; 3], |g| g.grid_cell);
        (0..3)
            .map(|i| (state.grid_cell[i] - goal_cell[i]).abs())
            .sum()
    }

    fn from_to_heuristic(&self, _lattice: &ArmLattice, _from_id: usize, _to_id: usize) -> i32 {
        42
    }

    fn metric_goal_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        (x * x + y * y + z * z).sqrt()
    }

    fn updated_start(&self, _start: &[f64]) {
        self.start_updates.set(self.start_updates.get() + 1);
    }

    fn updated_goal(&self, _goal: &ActiveGoal) {
        self.goal_updates.set(self.goal_updates.get() + 1);
    }
}

/// A 2-DOF lattice (Δ = π/4, limits ±π, cost multiplier 1000) over the given
/// oracle, with the single-step action space attached.
pub fn planar_lattice(oracle: ScriptedOracle) -> ArmLattice {
    let mut lattice = ArmLattice::new(
        Arc::new(PlanarArm),
        Arc::new(oracle),
        PlanningParams::uniform(2, DELTA, COST),
        Arc::new(UnitGrid { resolution: 0.02 }),
    );
    lattice.set_action_space(Arc::new(StepJointZero { step: DELTA }));
    lattice
}
