//! Goal constraints and the goal-region test.

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::angles::normalize_angle;
use crate::planner_traits::{Joints, PoseSixDof};
use crate::planning_error::PlanningError;
use crate::tip_pose::target_offset_pose;

/// A Cartesian goal: target pose of the end effector, the body-frame tip
/// offset the tolerances are measured at, and the tolerances themselves.
///
/// Cardinalities (pose 6, offset 3, tolerances 3 each) are validated when the
/// goal is handed to the lattice, not at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseGoal {
    /// Target pose `[x, y, z, roll, pitch, yaw]` of the end effector in the
    /// planning frame.
    pub pose: Vec<f64>,
    /// Tip offset `[x, y, z]` in the end-effector body frame.
    pub offset: Vec<f64>,
    /// Positional tolerances `[dx, dy, dz]` in meters.
    pub xyz_tolerance: Vec<f64>,
    /// Rotational tolerances in radians. Only the first entry is consulted,
    /// as a bound on the total rotation error magnitude.
    pub rpy_tolerance: Vec<f64>,
}

/// Goal constraint as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GoalConstraint {
    /// Reach a 6-DOF pose within positional and rotational tolerance.
    Pose(PoseGoal),
    /// Reach a position within tolerance; orientation is ignored.
    Position(PoseGoal),
    /// Reach a joint configuration within per-joint tolerance.
    JointStates {
        angles: Vec<f64>,
        tolerances: Vec<f64>,
    },
}

/// Which test the active goal applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    Pose,
    Position,
    JointStates,
}

/// The goal currently armed on the lattice, with everything the per-candidate
/// test needs precomputed: the offset target pose and its grid cell.
#[derive(Debug, Clone)]
pub struct ActiveGoal {
    pub kind: GoalKind,
    /// Target pose of the end effector itself.
    pub pose: PoseSixDof,
    /// Tip offset in the end-effector body frame.
    pub offset: [f64; 3],
    pub xyz_tolerance: [f64; 3],
    pub rpy_tolerance: [f64; 3],
    /// Target pose moved to the tip-offset point. Goal tests and the goal
    /// grid cell use this, not `pose`.
    pub tgt_off_pose: PoseSixDof,
    /// Grid cell of the offset target position.
    pub grid_cell: [i32; 3],
    /// Joint target, for `JointStates` goals.
    pub angles: Joints,
    /// Per-joint tolerances, for `JointStates` goals.
    pub angle_tolerances: Vec<f64>,
}

fn fixed<const N: usize>(values: &[f64], what: &str) -> Result<[f64; N], PlanningError> {
    <[f64; N]>::try_from(values).map_err(|_| {
        PlanningError::InvalidArgument(format!(
            "{} must have {} elements, found {}",
            what,
            N,
            values.len()
        ))
    })
}

impl ActiveGoal {
    /// Resolve a Cartesian goal: validate cardinalities and precompute the
    /// offset target pose. The grid cell is filled in by the lattice, which
    /// owns the grid.
    pub(crate) fn from_pose_goal(kind: GoalKind, goal: &PoseGoal) -> Result<Self, PlanningError> {
        let pose: PoseSixDof = fixed(&goal.pose, "goal pose")?;
        let offset = fixed(&goal.offset, "goal offset")?;
        let xyz_tolerance = fixed(&goal.xyz_tolerance, "xyz tolerance")?;
        let rpy_tolerance = fixed(&goal.rpy_tolerance, "rpy tolerance")?;
        let tgt_off_pose = target_offset_pose(&pose, &offset);
        Ok(ActiveGoal {
            kind,
            pose,
            offset,
            xyz_tolerance,
            rpy_tolerance,
            tgt_off_pose,
            grid_cell: [0; 3],
            angles: Vec::new(),
            angle_tolerances: Vec::new(),
        })
    }

    /// Whether the tip-offset position of `pose` lies within the positional
    /// tolerance box around the target. Always false for joint-space goals,
    /// which do not reason about workspace positions.
    pub fn position_entered(&self, pose: &PoseSixDof) -> bool {
        match self.kind {
            GoalKind::Pose | GoalKind::Position => (0..3).all(|i| {
                (pose[i] - self.tgt_off_pose[i]).abs() <= self.xyz_tolerance[i]
            }),
            GoalKind::JointStates => false,
        }
    }

    /// The goal predicate: does a candidate configuration with the given
    /// tip-offset pose satisfy this goal?
    pub fn is_satisfied(&self, state: &[f64], pose: &PoseSixDof) -> bool {
        match self.kind {
            GoalKind::JointStates => self
                .angles
                .iter()
                .zip(self.angle_tolerances.iter())
                .enumerate()
                .all(|(i, (target, tol))| (state[i] - target).abs() <= *tol),
            GoalKind::Pose => {
                self.position_entered(pose)
                    && rotation_error(pose, &self.tgt_off_pose) < self.rpy_tolerance[0]
            }
            GoalKind::Position => self.position_entered(pose),
        }
    }
}

/// Magnitude of the rotation between two RPY orientations.
///
/// Both orientations become unit quaternions (Z·Y·X from the stored angles);
/// the error is `normalize(2·acos(|q·q_goal|))`. The absolute value folds the
/// quaternion double cover, so `q` and `-q` compare equal.
fn rotation_error(pose: &PoseSixDof, target: &PoseSixDof) -> f64 {
    let q = UnitQuaternion::from_euler_angles(pose[3], pose[4], pose[5]);
    let qg = UnitQuaternion::from_euler_angles(target[3], target[4], target[5]);
    let dot = q.coords.dot(&qg.coords).abs().min(1.0);
    normalize_angle(2.0 * dot.acos()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn position_goal(target: [f64; 3], tol: f64) -> ActiveGoal {
        let goal = PoseGoal {
            pose: vec![target[0], target[1], target[2], 0.0, 0.0, 0.0],
            offset: vec![0.0; 3],
            xyz_tolerance: vec![tol; 3],
            rpy_tolerance: vec![0.0; 3],
        };
        ActiveGoal::from_pose_goal(GoalKind::Position, &goal).unwrap()
    }

    #[test]
    fn test_cardinality_validation() {
        let bad = PoseGoal {
            pose: vec![0.0; 5],
            offset: vec![0.0; 3],
            xyz_tolerance: vec![0.0; 3],
            rpy_tolerance: vec![0.0; 3],
        };
        assert!(matches!(
            ActiveGoal::from_pose_goal(GoalKind::Pose, &bad),
            Err(PlanningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_position_goal_ignores_rotation() {
        let goal = position_goal([1.0, 0.0, 0.5], 0.01);
        let pose = [1.005, 0.0, 0.5, 1.2, -0.4, 2.9];
        assert!(goal.is_satisfied(&[], &pose));
        let off_target = [1.02, 0.0, 0.5, 0.0, 0.0, 0.0];
        assert!(!goal.is_satisfied(&[], &off_target));
    }

    #[test]
    fn test_pose_goal_requires_orientation() {
        let goal = PoseGoal {
            pose: vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            offset: vec![0.0; 3],
            xyz_tolerance: vec![0.01; 3],
            rpy_tolerance: vec![0.05; 3],
        };
        let goal = ActiveGoal::from_pose_goal(GoalKind::Pose, &goal).unwrap();
        assert!(goal.is_satisfied(&[], &[0.0, 0.0, 0.0, 0.0, 0.0, 0.02]));
        assert!(!goal.is_satisfied(&[], &[0.0, 0.0, 0.0, 0.0, 0.0, 0.2]));
    }

    #[test]
    fn test_rotation_error_folds_double_cover() {
        // yaw of pi and -pi describe the same orientation
        let a = [0.0, 0.0, 0.0, 0.0, 0.0, PI];
        let b = [0.0, 0.0, 0.0, 0.0, 0.0, -PI];
        assert!(rotation_error(&a, &b) < 1e-9);
    }

    #[test]
    fn test_joint_goal_tolerances() {
        let mut goal = position_goal([0.0, 0.0, 0.0], 0.05);
        goal.kind = GoalKind::JointStates;
        goal.angles = vec![PI / 4.0, 0.0];
        goal.angle_tolerances = vec![0.01, 0.01];
        let pose = [9.0, 9.0, 9.0, 0.0, 0.0, 0.0]; // pose plays no role
        assert!(goal.is_satisfied(&[PI / 4.0 + 0.005, -0.005], &pose));
        assert!(!goal.is_satisfied(&[PI / 4.0 + 0.02, 0.0], &pose));
    }

    #[test]
    fn test_offset_shifts_the_target() {
        let goal = PoseGoal {
            pose: vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            offset: vec![0.0, 0.0, 0.2],
            xyz_tolerance: vec![0.01; 3],
            rpy_tolerance: vec![PI; 3],
        };
        let goal = ActiveGoal::from_pose_goal(GoalKind::Position, &goal).unwrap();
        // tolerances are measured at the offset point, not the flange
        assert!(goal.position_entered(&[1.0, 0.0, 0.2, 0.0, 0.0, 0.0]));
        assert!(!goal.position_entered(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
    }
}
