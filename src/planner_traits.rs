//! Defines the collaborator contracts the lattice plans against.
//!
//! The lattice itself owns none of the robot specifics. The robot model,
//! collision oracle, occupancy grid and action space are all supplied by the
//! embedding application through the traits below and are only ever read by
//! the lattice.

/// Joint configuration of the arm, one value per joint, in radians (rotary
/// joints) or meters (prismatic joints). The number of planned joints is fixed
/// by [`crate::params::PlanningParams::num_joints`]; a configuration may carry
/// trailing extra variables that the lattice ignores.
pub type Joints = Vec<f64>;

/// One candidate transition produced by the action space: a non-empty ordered
/// sequence of waypoint configurations. The last waypoint is the destination
/// of the action.
pub type Action = Vec<Joints>;

/// A pose in the planning frame as `[x, y, z, roll, pitch, yaw]`, with the
/// rotation given as XYZ-extrinsic (equivalently Z·Y·X intrinsic) angles.
pub type PoseSixDof = [f64; 6];

/// Verdict of a single-configuration collision query, together with the
/// distance to the nearest obstacle the oracle observed while answering.
#[derive(Debug, Clone, Copy)]
pub struct StateValidity {
    pub valid: bool,
    pub distance: f64,
}

/// Verdict of a swept segment query between two configurations.
#[derive(Debug, Clone, Copy)]
pub struct SweepValidity {
    pub valid: bool,
    /// Length of the interpolated path the oracle actually checked, in
    /// whatever unit the oracle counts (waypoints, cells).
    pub path_length: usize,
    /// Number of individual checks the oracle performed.
    pub checks: usize,
    pub distance: f64,
}

/// Forward-kinematics capability of a robot model. Kept as a separate trait so
/// that models without FK can still be planned against joint-space goals that
/// do not require it.
pub trait ForwardKinematics {
    /// Pose of the planning link (the end effector) in the planning frame for
    /// the given configuration, or `None` if the solver fails on it.
    fn compute_planning_link_fk(&self, joints: &[f64]) -> Option<PoseSixDof>;
}

/// Kinematic description of the arm: per-joint limits, continuity, and an
/// optional forward-kinematics capability.
pub trait RobotModel {
    /// Lower position limit of the joint. Meaningless for continuous joints.
    fn min_pos_limit(&self, joint: usize) -> f64;

    /// Upper position limit of the joint. Meaningless for continuous joints.
    fn max_pos_limit(&self, joint: usize) -> f64;

    /// Whether the joint has position limits at all. A joint without limits is
    /// continuous and wraps at 2π.
    fn has_pos_limit(&self, joint: usize) -> bool;

    /// Check the whole configuration against the limits. Continuous joints
    /// pass trivially. `verbose` asks the model to report which joint failed
    /// through its own logging.
    fn check_joint_limits(&self, joints: &[f64], verbose: bool) -> bool;

    /// The forward-kinematics capability of this model, if it has one.
    fn forward_kinematics(&self) -> Option<&dyn ForwardKinematics> {
        None
    }
}

/// Collision oracle the lattice validates transitions against. Point and
/// swept-segment queries; both report the distance to the nearest obstacle
/// observed during the query.
pub trait CollisionOracle {
    /// Validity of a single configuration. `verbose` asks the oracle to log
    /// the colliding pair on failure.
    fn is_state_valid(&self, joints: &[f64], verbose: bool) -> StateValidity;

    /// Validity of the swept segment between two configurations.
    fn is_state_to_state_valid(&self, from: &[f64], to: &[f64]) -> SweepValidity;
}

/// World to voxel-grid coordinate transform of the workspace the heuristics
/// reason over.
pub trait OccupancyGrid {
    /// Discretize a planning-frame position into grid indices.
    fn world_to_grid(&self, x: f64, y: f64, z: f64) -> [i32; 3];

    /// Name of the fixed frame that grid and poses are expressed in.
    fn reference_frame(&self) -> &str;

    /// Edge length of one grid cell in meters.
    fn resolution(&self) -> f64;
}

/// Motion-primitive generator. Given a source configuration, enumerates the
/// candidate actions leaving it.
pub trait ActionSpace {
    /// Candidate actions from `source`, or `None` if the generator itself
    /// failed (which aborts the expansion, as opposed to an empty list which
    /// simply means a dead end).
    fn apply(&self, source: &[f64]) -> Option<Vec<Action>>;
}
