//! Error handling for lattice operations

/// Unified error reported by `set_start`, `set_goal` and path extraction.
///
/// Per-expansion failures (an action the FK solver cannot evaluate, a
/// generator hiccup) are not errors; the expansion just skips the action or
/// returns an empty successor list.
#[derive(Debug)]
pub enum PlanningError {
    /// Malformed input: wrong cardinality, unknown state id, empty id path.
    InvalidArgument(String),
    /// The start configuration violates the position limits of some joint.
    JointLimitsViolated,
    /// The start configuration is in collision; carries the distance to the
    /// nearest obstacle as reported by the oracle.
    StartInCollision { distance: f64 },
    /// The robot model has no forward-kinematics capability, or FK failed on
    /// the given configuration.
    FkUnavailable,
    /// No action space has been attached to the lattice.
    NoActionSpace,
    /// A multi-state path handed to extraction begins with the reserved goal
    /// entry, which has no concrete configuration to start from.
    InvalidPathHead,
    /// No valid, collision-free action from the predecessor reaches the goal
    /// region; the synthetic goal entry cannot be resolved.
    NoValidGoalEdge,
    /// The operation is not supported by this lattice.
    UnsupportedOperation(&'static str),
    /// No goal has been set, or the stored goal is of a type the operation
    /// cannot work with.
    UnknownGoalType,
}

impl std::fmt::Display for PlanningError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PlanningError::InvalidArgument(ref msg) =>
                write!(f, "Invalid argument: {}", msg),
            PlanningError::JointLimitsViolated =>
                write!(f, "Configuration violates the joint limits"),
            PlanningError::StartInCollision { distance } =>
                write!(f, "Start configuration is in collision (distance to nearest obstacle {:.3}m)", distance),
            PlanningError::FkUnavailable =>
                write!(f, "Forward kinematics is unavailable or failed"),
            PlanningError::NoActionSpace =>
                write!(f, "No action space attached to the lattice"),
            PlanningError::InvalidPathHead =>
                write!(f, "Cannot extract a non-trivial path starting from the goal state"),
            PlanningError::NoValidGoalEdge =>
                write!(f, "No valid goal successor found during path extraction"),
            PlanningError::UnsupportedOperation(what) =>
                write!(f, "Unsupported operation: {}", what),
            PlanningError::UnknownGoalType =>
                write!(f, "No goal set or goal type unknown"),
        }
    }
}

impl std::error::Error for PlanningError {}
