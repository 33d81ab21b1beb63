//! Planning-frame pose of the tip-with-offset point.
//!
//! Goal tolerances are measured not at the end-effector origin but at a fixed
//! offset from it, expressed in the end-effector body frame (think: the tip of
//! a tool bolted to the flange). The helpers here move a planning-frame pose
//! to that offset point.

use nalgebra::{UnitQuaternion, Vector3};

use crate::planner_traits::PoseSixDof;

/// Apply a body-frame translational offset to a planning-frame pose.
///
/// The offset is rotated into the planning frame by the pose orientation and
/// added to the translation. The orientation is returned unchanged, a pure
/// translation cannot alter it.
pub fn target_offset_pose(pose: &PoseSixDof, offset: &[f64; 3]) -> PoseSixDof {
    let rotation = UnitQuaternion::from_euler_angles(pose[3], pose[4], pose[5]);
    let tip = Vector3::new(pose[0], pose[1], pose[2])
        + rotation * Vector3::new(offset[0], offset[1], offset[2]);
    [tip.x, tip.y, tip.z, pose[3], pose[4], pose[5]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_pose_eq(a: &PoseSixDof, b: &PoseSixDof) {
        for i in 0..6 {
            assert!((a[i] - b[i]).abs() < 1e-9, "component {}: {} vs {}", i, a[i], b[i]);
        }
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let pose = [1.0, 2.0, 3.0, 0.4, 0.5, 0.6];
        assert_pose_eq(&target_offset_pose(&pose, &[0.0, 0.0, 0.0]), &pose);
    }

    #[test]
    fn test_offset_translates_along_body_axes() {
        // identity orientation: body frame coincides with the planning frame
        let pose = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let shifted = target_offset_pose(&pose, &[0.25, 0.0, -0.5]);
        assert_pose_eq(&shifted, &[1.25, 0.0, -0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_offset_rotates_with_yaw() {
        // yaw of 90 degrees turns the body x axis onto the planning y axis
        let pose = [0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2];
        let shifted = target_offset_pose(&pose, &[1.0, 0.0, 0.0]);
        assert_pose_eq(&shifted, &[0.0, 1.0, 0.0, 0.0, 0.0, FRAC_PI_2]);
    }

    #[test]
    fn test_orientation_survives_offset() {
        let pose = [0.1, 0.2, 0.3, 0.7, -0.2, 1.1];
        let shifted = target_offset_pose(&pose, &[0.0, 0.0, 0.4]);
        assert_eq!(&shifted[3..], &pose[3..]);
    }
}
