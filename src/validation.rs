//! Validation of a candidate action against joint limits and the collision
//! oracle.

use bitflags::bitflags;
use tracing::debug;

use crate::planner_traits::{Action, CollisionOracle, RobotModel};

bitflags! {
    /// Reasons an action was rejected. Empty means the action is valid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Violation: u32 {
        /// Some waypoint of the action violates a joint position limit.
        const JOINT_LIMIT = 1 << 0;
        /// The segment from the source configuration to the first waypoint
        /// collides.
        const PATH_PREFIX_COLLIDES = 1 << 2;
        /// A segment between two adjacent waypoints collides.
        const PATH_INTERIOR_COLLIDES = 1 << 3;
    }
}

/// Outcome of [`check_action`].
#[derive(Debug, Clone, Copy)]
pub struct ActionCheck {
    pub violations: Violation,
    /// Distance to the nearest obstacle from the last segment the oracle
    /// checked. Worst case along the action, since checking stops at the
    /// first violation.
    pub distance: f64,
}

impl ActionCheck {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate one action leaving `source`.
///
/// Waypoints are checked against the joint limits first; then the oracle
/// sweeps the segment from `source` to the first waypoint, then every
/// adjacent waypoint pair. Checking stops at the first violation.
pub fn check_action(
    robot: &dyn RobotModel,
    oracle: &dyn CollisionOracle,
    source: &[f64],
    action: &Action,
) -> ActionCheck {
    debug_assert!(!action.is_empty(), "actions must carry at least one waypoint");

    let mut violations = Violation::empty();
    let mut distance = 0.0;

    for (widx, waypoint) in action.iter().enumerate() {
        if !robot.check_joint_limits(waypoint, false) {
            debug!(waypoint = widx, "action waypoint violates joint limits");
            violations |= Violation::JOINT_LIMIT;
            break;
        }
    }
    if !violations.is_empty() {
        return ActionCheck { violations, distance };
    }

    let sweep = oracle.is_state_to_state_valid(source, &action[0]);
    distance = sweep.distance;
    if !sweep.valid {
        debug!(
            distance,
            path_length = sweep.path_length,
            "path to first waypoint in collision"
        );
        violations |= Violation::PATH_PREFIX_COLLIDES;
        return ActionCheck { violations, distance };
    }

    for j in 1..action.len() {
        let sweep = oracle.is_state_to_state_valid(&action[j - 1], &action[j]);
        distance = sweep.distance;
        if !sweep.valid {
            debug!(
                distance,
                segment = j,
                "path between waypoints in collision"
            );
            violations |= Violation::PATH_INTERIOR_COLLIDES;
            break;
        }
    }

    ActionCheck { violations, distance }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner_traits::{StateValidity, SweepValidity};

    struct Limitless;

    impl RobotModel for Limitless {
        fn min_pos_limit(&self, _joint: usize) -> f64 {
            -1.0
        }
        fn max_pos_limit(&self, _joint: usize) -> f64 {
            1.0
        }
        fn has_pos_limit(&self, _joint: usize) -> bool {
            true
        }
        fn check_joint_limits(&self, joints: &[f64], _verbose: bool) -> bool {
            joints.iter().all(|q| q.abs() <= 1.0)
        }
    }

    /// Oracle that rejects any segment whose endpoint matches `poison`.
    struct PoisonedOracle {
        poison: Vec<f64>,
    }

    impl CollisionOracle for PoisonedOracle {
        fn is_state_valid(&self, _joints: &[f64], _verbose: bool) -> StateValidity {
            StateValidity { valid: true, distance: 1.0 }
        }
        fn is_state_to_state_valid(&self, _from: &[f64], to: &[f64]) -> SweepValidity {
            let hit = to == self.poison.as_slice();
            SweepValidity {
                valid: !hit,
                path_length: 1,
                checks: 1,
                distance: if hit { 0.0 } else { 0.5 },
            }
        }
    }

    fn clear_oracle() -> PoisonedOracle {
        PoisonedOracle { poison: vec![f64::NAN] }
    }

    #[test]
    fn test_valid_action_passes() {
        let action = vec![vec![0.1, 0.1], vec![0.2, 0.2]];
        let check = check_action(&Limitless, &clear_oracle(), &[0.0, 0.0], &action);
        assert!(check.is_valid());
        assert_eq!(check.distance, 0.5);
    }

    #[test]
    fn test_joint_limit_violation_short_circuits() {
        let action = vec![vec![0.1, 0.1], vec![2.0, 0.0]];
        let check = check_action(&Limitless, &clear_oracle(), &[0.0, 0.0], &action);
        assert_eq!(check.violations, Violation::JOINT_LIMIT);
        // the oracle never ran, the distance is untouched
        assert_eq!(check.distance, 0.0);
    }

    #[test]
    fn test_prefix_collision() {
        let oracle = PoisonedOracle { poison: vec![0.1, 0.1] };
        let action = vec![vec![0.1, 0.1], vec![0.2, 0.2]];
        let check = check_action(&Limitless, &oracle, &[0.0, 0.0], &action);
        assert_eq!(check.violations, Violation::PATH_PREFIX_COLLIDES);
        assert_eq!(check.distance, 0.0);
    }

    #[test]
    fn test_interior_collision() {
        let oracle = PoisonedOracle { poison: vec![0.2, 0.2] };
        let action = vec![vec![0.1, 0.1], vec![0.2, 0.2], vec![0.3, 0.3]];
        let check = check_action(&Limitless, &oracle, &[0.0, 0.0], &action);
        assert_eq!(check.violations, Violation::PATH_INTERIOR_COLLIDES);
    }
}
