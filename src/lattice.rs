//! The configuration-space lattice graph.
//!
//! Continuous joint space is discretized into per-joint bins; every bin that
//! the search touches becomes a [`LatticeState`] with a stable dense id. The
//! search algorithm drives the graph through [`ArmLattice::get_successors`],
//! [`ArmLattice::get_lazy_successors`] and [`ArmLattice::get_true_cost`], and
//! finally hands back a sequence of state ids that
//! [`ArmLattice::extract_path`] turns into concrete joint configurations.
//!
//! One state id is reserved: the absorbing goal entry. Any successor whose
//! destination satisfies the goal predicate is reported under that single id,
//! so the search terminates on one node no matter how many configurations
//! satisfy the goal region.

use std::cell::Cell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::angles::normalize_angle_positive;
use crate::goal::{ActiveGoal, GoalConstraint, GoalKind, PoseGoal};
use crate::heuristic::{Heuristic, HeuristicStack};
use crate::params::PlanningParams;
use crate::planner_traits::{
    ActionSpace, CollisionOracle, Joints, OccupancyGrid, PoseSixDof, RobotModel,
};
use crate::planning_error::PlanningError;
use crate::tip_pose;
use crate::validation::check_action;

/// Id of the reserved absorbing goal entry, allocated at construction.
const GOAL_STATE_ID: usize = 0;

/// One discrete cell of the lattice that the search has touched.
#[derive(Debug, Clone)]
pub struct LatticeState {
    /// Dense id; equals the insertion index and never changes.
    pub id: usize,
    /// Discrete coordinate, one integer per planned joint.
    pub coord: Vec<i32>,
    /// The first continuous configuration that landed in this bin.
    pub config: Joints,
    /// Grid cell of the tip-offset position at insertion time.
    pub grid_cell: [i32; 3],
    /// Distance to the nearest obstacle reported by the oracle at insertion
    /// time. Not refreshed afterwards; transitions are re-validated per edge.
    pub distance: f64,
    /// Scratch slot for the last heuristic value computed for this state.
    pub heur: Cell<i32>,
}

/// Per-instance counters over the lifetime of the lattice.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatticeProfile {
    pub expansions: u64,
    pub lazy_expansions: u64,
    pub true_cost_evaluations: u64,
}

/// The lattice graph over the configuration space of one arm.
///
/// Collaborators are shared by reference and only ever read; the lattice owns
/// the state table exclusively. All operations are synchronous and the type is
/// meant to be driven from a single thread, the caller serializes access.
pub struct ArmLattice {
    robot: Arc<dyn RobotModel>,
    oracle: Arc<dyn CollisionOracle>,
    grid: Arc<dyn OccupancyGrid>,
    actions: Option<Arc<dyn ActionSpace>>,
    heuristics: HeuristicStack,
    params: PlanningParams,

    min_limits: Vec<f64>,
    continuous: Vec<bool>,
    /// Number of bins per joint; consulted for the wrap of continuous joints.
    coord_bins: Vec<i32>,

    states: Vec<LatticeState>,
    /// Coordinate to id map. The reserved goal entry is deliberately absent,
    /// so a genuine all-zeros coordinate resolves to its own state.
    coord_to_id: HashMap<Vec<i32>, usize>,

    goal: Option<ActiveGoal>,
    near_goal: bool,
    episode_start: Instant,
    start_id: Option<usize>,
    expanded: Vec<usize>,
    profile: LatticeProfile,
}

impl ArmLattice {
    /// Build an empty lattice over the given robot. Joint limits and
    /// continuity are read from the model once, here. The action space and
    /// heuristics are attached separately.
    pub fn new(
        robot: Arc<dyn RobotModel>,
        oracle: Arc<dyn CollisionOracle>,
        params: PlanningParams,
        grid: Arc<dyn OccupancyGrid>,
    ) -> Self {
        assert!(params.num_joints > 0, "cannot plan for zero joints");
        assert_eq!(
            params.coord_delta.len(),
            params.num_joints,
            "one resolution entry per planned joint"
        );

        let n = params.num_joints;
        let mut min_limits = Vec::with_capacity(n);
        let mut max_limits = Vec::with_capacity(n);
        let mut continuous = Vec::with_capacity(n);
        for j in 0..n {
            min_limits.push(robot.min_pos_limit(j));
            max_limits.push(robot.max_pos_limit(j));
            continuous.push(!robot.has_pos_limit(j));
        }

        let coord_bins: Vec<i32> = (0..n)
            .map(|j| {
                let delta = params.coord_delta[j];
                if continuous[j] {
                    (2.0 * PI / delta).round() as i32
                } else {
                    ((max_limits[j] - min_limits[j]) / delta).round() as i32 + 1
                }
            })
            .collect();

        let goal_entry = LatticeState {
            id: GOAL_STATE_ID,
            coord: vec![0; n],
            config: Joints::new(),
            grid_cell: [0; 3],
            distance: 0.0,
            heur: Cell::new(0),
        };
        debug!(goal_state_id = GOAL_STATE_ID, "lattice created");

        ArmLattice {
            robot,
            oracle,
            grid,
            actions: None,
            heuristics: HeuristicStack::default(),
            params,
            min_limits,
            continuous,
            coord_bins,
            states: vec![goal_entry],
            coord_to_id: HashMap::new(),
            goal: None,
            near_goal: false,
            episode_start: Instant::now(),
            start_id: None,
            expanded: Vec::new(),
            profile: LatticeProfile::default(),
        }
    }

    /// Attach the motion-primitive generator. Without one, expansions produce
    /// no successors.
    pub fn set_action_space(&mut self, actions: Arc<dyn ActionSpace>) {
        self.actions = Some(actions);
    }

    /// Attach a heuristic. Queries delegate to the first attached one.
    pub fn add_heuristic(&mut self, heuristic: Arc<dyn Heuristic>) {
        self.heuristics.push(heuristic);
    }

    pub fn num_heuristics(&self) -> usize {
        self.heuristics.len()
    }

    // ---- state table ----

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Id of the reserved absorbing goal entry. Stable for the lattice's
    /// lifetime.
    pub fn goal_state_id(&self) -> usize {
        GOAL_STATE_ID
    }

    /// Id of the start state, once `set_start` has accepted one.
    pub fn start_state_id(&self) -> Option<usize> {
        self.start_id
    }

    pub fn state(&self, state_id: usize) -> Option<&LatticeState> {
        self.states.get(state_id)
    }

    /// Id of the state occupying a coordinate, if the search has touched it.
    /// Never resolves to the goal entry.
    pub fn state_id_for_coord(&self, coord: &[i32]) -> Option<usize> {
        self.coord_to_id.get(coord).copied()
    }

    /// Joint configuration stored on a state. The reserved goal entry carries
    /// no meaningful configuration and is refused.
    pub fn state_config(&self, state_id: usize) -> Result<&Joints, PlanningError> {
        if state_id >= self.states.len() {
            return Err(PlanningError::InvalidArgument(format!(
                "unknown state id {}",
                state_id
            )));
        }
        if state_id == GOAL_STATE_ID {
            return Err(PlanningError::UnsupportedOperation(
                "resolving the reserved goal entry to joint values",
            ));
        }
        Ok(&self.states[state_id].config)
    }

    pub fn start_configuration(&self) -> Option<&Joints> {
        self.start_id.map(|id| &self.states[id].config)
    }

    /// The joint target of the active goal, for joint-space goals.
    pub fn goal_configuration(&self) -> Option<&Joints> {
        match &self.goal {
            Some(g) if g.kind == GoalKind::JointStates => Some(&g.angles),
            _ => None,
        }
    }

    /// The active goal, if one is armed.
    pub fn goal_constraints(&self) -> Option<&ActiveGoal> {
        self.goal.as_ref()
    }

    /// Target end-effector pose of the active goal, as last armed. For joint
    /// goals this is the FK of the target configuration.
    pub fn goal_pose(&self) -> Option<&PoseSixDof> {
        self.goal.as_ref().map(|g| &g.pose)
    }

    /// Ids of every state expanded so far, in expansion order.
    pub fn expanded_states(&self) -> &[usize] {
        &self.expanded
    }

    pub fn profile(&self) -> LatticeProfile {
        self.profile
    }

    fn get_or_create_state(
        &mut self,
        coord: Vec<i32>,
        config: Joints,
        distance: f64,
        grid_cell: [i32; 3],
    ) -> usize {
        if let Some(&id) = self.coord_to_id.get(&coord) {
            return id;
        }
        let id = self.states.len();
        self.coord_to_id.insert(coord.clone(), id);
        self.states.push(LatticeState {
            id,
            coord,
            config,
            grid_cell,
            distance,
            heur: Cell::new(0),
        });
        id
    }

    // ---- coordinate codec ----

    /// Discretize a configuration. Continuous joints normalize into `[0, 2π)`
    /// first and wrap their top bin back to 0; limited joints bin relative to
    /// the lower limit.
    pub fn angles_to_coord(&self, angles: &[f64]) -> Vec<i32> {
        let n = self.params.num_joints;
        assert!(angles.len() >= n, "configuration shorter than the joint count");
        (0..n)
            .map(|i| {
                let delta = self.params.coord_delta[i];
                if self.continuous[i] {
                    let pos = normalize_angle_positive(angles[i]);
                    let mut c = ((pos + delta * 0.5) / delta).floor() as i32;
                    if c == self.coord_bins[i] {
                        c = 0;
                    }
                    c
                } else {
                    ((angles[i] - self.min_limits[i]) / delta).round() as i32
                }
            })
            .collect()
    }

    /// Continuous configuration at the center of a coordinate's bins.
    pub fn coord_to_angles(&self, coord: &[i32]) -> Joints {
        let n = self.params.num_joints;
        assert!(coord.len() >= n, "coordinate shorter than the joint count");
        (0..n)
            .map(|i| {
                let delta = self.params.coord_delta[i];
                if self.continuous[i] {
                    coord[i] as f64 * delta
                } else {
                    self.min_limits[i] + coord[i] as f64 * delta
                }
            })
            .collect()
    }

    // ---- start and goal ----

    /// Accept a start configuration. Fails if the configuration is too short,
    /// FK cannot evaluate it, it violates the joint limits, or it is in
    /// collision. On success the start state is inserted (or found) and
    /// heuristics are notified.
    pub fn set_start(&mut self, state: &[f64]) -> Result<(), PlanningError> {
        if state.len() < self.params.num_joints {
            return Err(PlanningError::InvalidArgument(format!(
                "start carries {} joint positions, the lattice plans {}",
                state.len(),
                self.params.num_joints
            )));
        }

        let pose = self.compute_planning_frame_fk(state)?;

        if !self.robot.check_joint_limits(state, true) {
            warn!("start configuration violates the joint limits");
            return Err(PlanningError::JointLimitsViolated);
        }

        let validity = self.oracle.is_state_valid(state, true);
        if !validity.valid {
            warn!(
                distance = validity.distance,
                "start configuration is in collision"
            );
            return Err(PlanningError::StartInCollision {
                distance: validity.distance,
            });
        }

        let coord = self.angles_to_coord(state);
        let cell = self.grid.world_to_grid(pose[0], pose[1], pose[2]);
        let id = self.get_or_create_state(coord, state.to_vec(), validity.distance, cell);
        self.start_id = Some(id);
        debug!(state_id = id, "start state set");

        self.heuristics.notify_start(state);
        Ok(())
    }

    /// Arm a goal. Cartesian goals are validated and discretized here; joint
    /// goals are FK'd into a synthesized pose goal first and keep the joint
    /// target for the goal test.
    pub fn set_goal(&mut self, goal: &GoalConstraint) -> Result<(), PlanningError> {
        match goal {
            GoalConstraint::Pose(pg) => {
                let active = ActiveGoal::from_pose_goal(GoalKind::Pose, pg)?;
                self.arm_goal(active);
                Ok(())
            }
            GoalConstraint::Position(pg) => {
                let active = ActiveGoal::from_pose_goal(GoalKind::Position, pg)?;
                self.arm_goal(active);
                Ok(())
            }
            GoalConstraint::JointStates { angles, tolerances } => {
                self.set_goal_configuration(angles, tolerances)
            }
        }
    }

    fn set_goal_configuration(
        &mut self,
        angles: &[f64],
        tolerances: &[f64],
    ) -> Result<(), PlanningError> {
        if angles.len() != self.params.num_joints {
            return Err(PlanningError::InvalidArgument(format!(
                "joint goal carries {} positions, the lattice plans {}",
                angles.len(),
                self.params.num_joints
            )));
        }
        if tolerances.len() != angles.len() {
            return Err(PlanningError::InvalidArgument(
                "joint goal needs one tolerance per joint".to_string(),
            ));
        }

        let fk = self
            .robot
            .forward_kinematics()
            .ok_or(PlanningError::FkUnavailable)?;
        let pose = fk
            .compute_planning_link_fk(angles)
            .ok_or(PlanningError::FkUnavailable)?;

        // the pose tolerance is synthesized and should not decide anything
        // for a joint-space goal; the joint test below is the real one
        let synthesized = PoseGoal {
            pose: pose.to_vec(),
            offset: vec![0.0; 3],
            xyz_tolerance: vec![0.05; 3],
            rpy_tolerance: vec![0.05; 3],
        };
        let mut active = ActiveGoal::from_pose_goal(GoalKind::JointStates, &synthesized)?;
        active.angles = angles.to_vec();
        active.angle_tolerances = tolerances.to_vec();
        self.arm_goal(active);
        Ok(())
    }

    fn arm_goal(&mut self, mut active: ActiveGoal) {
        let cell = self.grid.world_to_grid(
            active.tgt_off_pose[0],
            active.tgt_off_pose[1],
            active.tgt_off_pose[2],
        );
        active.grid_cell = cell;
        self.states[GOAL_STATE_ID].grid_cell = cell;

        debug!(
            grid_cell = ?cell,
            pose = ?active.tgt_off_pose,
            kind = ?active.kind,
            "new goal set"
        );

        self.near_goal = false;
        self.episode_start = Instant::now();
        self.heuristics.notify_goal(&active);
        self.goal = Some(active);
    }

    // ---- goal predicate ----

    /// Goal test with the near-goal bookkeeping: the first candidate to enter
    /// the position tolerance is reported once per episode.
    fn is_goal(&mut self, state: &[f64], pose: &PoseSixDof) -> bool {
        let Some(goal) = self.goal.as_ref() else {
            warn!("goal test invoked with no goal set");
            return false;
        };

        if !self.near_goal && goal.position_entered(pose) {
            info!(
                x = pose[0],
                y = pose[1],
                z = pose[2],
                tolerance = goal.xyz_tolerance[0],
                elapsed_s = self.episode_start.elapsed().as_secs_f64(),
                expansions = self.expanded.len(),
                "search entered the goal position tolerance"
            );
            self.near_goal = true;
        }

        goal.is_satisfied(state, pose)
    }

    // ---- kinematics ----

    /// Planning-frame pose of the tip-offset point for a configuration, using
    /// the active goal's offset (zero when no goal is armed).
    pub fn compute_planning_frame_fk(&self, state: &[f64]) -> Result<PoseSixDof, PlanningError> {
        let fk = self
            .robot
            .forward_kinematics()
            .ok_or(PlanningError::FkUnavailable)?;
        let pose = fk
            .compute_planning_link_fk(state)
            .ok_or(PlanningError::FkUnavailable)?;
        let offset = self.goal.as_ref().map_or([0.0; 3], |g| g.offset);
        Ok(tip_pose::target_offset_pose(&pose, &offset))
    }

    /// Move an end-effector pose to the active goal's tip-offset point.
    pub fn target_offset_pose(&self, pose: &PoseSixDof) -> PoseSixDof {
        let offset = self.goal.as_ref().map_or([0.0; 3], |g| g.offset);
        tip_pose::target_offset_pose(pose, &offset)
    }

    // ---- expansion ----

    /// Eager successor generation. Every returned edge has passed action
    /// validation; destinations satisfying the goal predicate are reported
    /// under the reserved goal id. The goal entry itself is absorbing.
    pub fn get_successors(&mut self, state_id: usize) -> (Vec<usize>, Vec<i32>) {
        assert!(state_id < self.states.len(), "unknown state id");
        self.profile.expansions += 1;

        let mut succs = Vec::new();
        let mut costs = Vec::new();

        if state_id == GOAL_STATE_ID {
            return (succs, costs);
        }

        let Some(action_space) = self.actions.clone() else {
            warn!("no action space attached, state has no successors");
            return (succs, costs);
        };

        let source = self.states[state_id].config.clone();
        debug!(
            state_id,
            coord = ?self.states[state_id].coord,
            "expanding state"
        );

        let Some(actions) = action_space.apply(&source) else {
            warn!(state_id, "action space failed to produce actions");
            return (succs, costs);
        };
        debug!(actions = actions.len(), "candidate actions");

        let mut goal_succ_count = 0;
        for action in &actions {
            let Some(last) = action.last() else { continue };

            let check = check_action(self.robot.as_ref(), self.oracle.as_ref(), &source, action);
            if !check.is_valid() {
                continue;
            }

            let succ_coord = self.angles_to_coord(last);

            let Ok(pose) = self.compute_planning_frame_fk(last) else {
                warn!("planning-frame FK failed for a successor, skipping");
                continue;
            };
            let cell = self.grid.world_to_grid(pose[0], pose[1], pose[2]);

            let succ_id = self.get_or_create_state(succ_coord, last.clone(), check.distance, cell);

            let is_goal = self.is_goal(last, &pose);
            if is_goal {
                goal_succ_count += 1;
            }

            succs.push(if is_goal { GOAL_STATE_ID } else { succ_id });
            costs.push(self.edge_cost(is_goal));
        }

        if goal_succ_count > 0 {
            debug!(goal_succ_count, "expansion produced goal successors");
        }

        self.expanded.push(state_id);
        (succs, costs)
    }

    /// Lazy successor generation: no action validation, every edge reported
    /// with an unverified cost (`false` in the third list). The caller
    /// materializes true costs through [`ArmLattice::get_true_cost`].
    pub fn get_lazy_successors(
        &mut self,
        state_id: usize,
    ) -> (Vec<usize>, Vec<i32>, Vec<bool>) {
        assert!(state_id < self.states.len(), "unknown state id");
        self.profile.lazy_expansions += 1;

        let mut succs = Vec::new();
        let mut costs = Vec::new();
        let mut true_costs = Vec::new();

        if state_id == GOAL_STATE_ID {
            return (succs, costs, true_costs);
        }

        let Some(action_space) = self.actions.clone() else {
            warn!("no action space attached, state has no successors");
            return (succs, costs, true_costs);
        };

        let source = self.states[state_id].config.clone();
        debug!(
            state_id,
            coord = ?self.states[state_id].coord,
            "lazily expanding state"
        );

        let Some(actions) = action_space.apply(&source) else {
            warn!(state_id, "action space failed to produce actions");
            return (succs, costs, true_costs);
        };

        for action in &actions {
            let Some(last) = action.last() else { continue };

            let succ_coord = self.angles_to_coord(last);

            let Ok(pose) = self.compute_planning_frame_fk(last) else {
                warn!("planning-frame FK failed for a successor, skipping");
                continue;
            };
            let cell = self.grid.world_to_grid(pose[0], pose[1], pose[2]);

            let succ_id = self.get_or_create_state(succ_coord, last.clone(), 0.0, cell);

            let is_goal = self.is_goal(last, &pose);
            succs.push(if is_goal { GOAL_STATE_ID } else { succ_id });
            costs.push(self.edge_cost(is_goal));
            true_costs.push(false);
        }

        self.expanded.push(state_id);
        (succs, costs, true_costs)
    }

    /// Materialize the true cost of a lazily reported edge: the minimum cost
    /// over all valid actions from the parent that reach the child (the goal
    /// region for the goal entry, the child's coordinate otherwise). `-1`
    /// when no action qualifies.
    pub fn get_true_cost(&mut self, parent_id: usize, child_id: usize) -> i32 {
        assert!(parent_id < self.states.len(), "unknown parent state id");
        assert!(child_id < self.states.len(), "unknown child state id");
        self.profile.true_cost_evaluations += 1;

        debug!(parent_id, child_id, "evaluating true cost of transition");

        let Some(action_space) = self.actions.clone() else {
            return -1;
        };
        let parent_config = self.states[parent_id].config.clone();
        let Some(actions) = action_space.apply(&parent_config) else {
            warn!(parent_id, "action space failed to produce actions");
            return -1;
        };

        let goal_edge = child_id == GOAL_STATE_ID;
        let child_coord = self.states[child_id].coord.clone();

        let mut best_cost: Option<i32> = None;
        for action in &actions {
            let Some(last) = action.last() else { continue };

            let Ok(pose) = self.compute_planning_frame_fk(last) else {
                warn!("planning-frame FK failed while evaluating an action");
                continue;
            };

            if goal_edge {
                if !self.is_goal(last, &pose) {
                    continue;
                }
            } else if self.angles_to_coord(last) != child_coord {
                continue;
            }

            let check =
                check_action(self.robot.as_ref(), self.oracle.as_ref(), &parent_config, action);
            if !check.is_valid() {
                continue;
            }

            let cost = self.edge_cost(goal_edge);
            if best_cost.map_or(true, |c| cost < c) {
                best_cost = Some(cost);
            }
        }

        best_cost.unwrap_or(-1)
    }

    /// Predecessor generation is not implemented; the lattice is driven by
    /// forward searches only.
    pub fn get_predecessors(&self, _state_id: usize) -> (Vec<usize>, Vec<i32>) {
        warn!("predecessor expansion is not implemented, returning no predecessors");
        (Vec::new(), Vec::new())
    }

    /// Default edge-cost policy: one cost multiplier per transition,
    /// independent of the action magnitude.
    fn edge_cost(&self, _goal_edge: bool) -> i32 {
        self.params.cost_multiplier
    }

    // ---- path extraction ----

    /// Turn a search result (a sequence of state ids) into concrete joint
    /// configurations. Occurrences of the reserved goal id are re-resolved to
    /// the destination of the cheapest valid goal-satisfying action from the
    /// preceding state.
    pub fn extract_path(&self, id_path: &[usize]) -> Result<Vec<Joints>, PlanningError> {
        if id_path.is_empty() {
            return Err(PlanningError::InvalidArgument(
                "cannot extract a path from an empty id sequence".to_string(),
            ));
        }

        // degenerate single-state paths: some planners produce them when the
        // start already satisfies the goal
        if id_path.len() == 1 {
            let state_id = id_path[0];
            if state_id == GOAL_STATE_ID {
                let start_id = self.start_id.ok_or_else(|| {
                    PlanningError::InvalidArgument("no start state set".to_string())
                })?;
                return Ok(vec![self.states[start_id].config.clone()]);
            }
            return Ok(vec![self.state_config(state_id)?.clone()]);
        }

        if id_path[0] == GOAL_STATE_ID {
            return Err(PlanningError::InvalidPathHead);
        }

        let action_space = self.actions.as_ref().ok_or(PlanningError::NoActionSpace)?;

        let mut path = Vec::with_capacity(id_path.len());
        path.push(self.state_config(id_path[0])?.clone());

        for window in id_path.windows(2) {
            let (prev_id, curr_id) = (window[0], window[1]);

            if prev_id == GOAL_STATE_ID {
                return Err(PlanningError::InvalidArgument(
                    "goal entry cannot precede another state in a path".to_string(),
                ));
            }

            if curr_id == GOAL_STATE_ID {
                // the goal entry is synthetic; find the configuration the
                // search actually reached it through
                let goal = self.goal.as_ref().ok_or(PlanningError::UnknownGoalType)?;
                let prev_config = &self.states[prev_id].config;

                let actions = action_space
                    .apply(prev_config)
                    .ok_or(PlanningError::NoValidGoalEdge)?;

                let mut best: Option<(i32, &Joints)> = None;
                for action in &actions {
                    let Some(last) = action.last() else { continue };
                    let Ok(pose) = self.compute_planning_frame_fk(last) else {
                        continue;
                    };
                    if !goal.is_satisfied(last, &pose) {
                        continue;
                    }
                    let check = check_action(
                        self.robot.as_ref(),
                        self.oracle.as_ref(),
                        prev_config,
                        action,
                    );
                    if !check.is_valid() {
                        continue;
                    }
                    let cost = self.edge_cost(true);
                    if best.map_or(true, |(c, _)| cost < c) {
                        best = Some((cost, last));
                    }
                }

                let (_, destination) = best.ok_or(PlanningError::NoValidGoalEdge)?;
                path.push(destination.clone());
            } else {
                path.push(self.state_config(curr_id)?.clone());
            }
        }

        Ok(path)
    }

    // ---- heuristic facade ----

    /// Cost-to-goal estimate for a state, from heuristic 0 (0 when none is
    /// attached). The value is also cached on the state's scratch slot.
    pub fn get_goal_heuristic(&self, state_id: usize) -> i32 {
        assert!(state_id < self.states.len(), "unknown state id");
        let h = self.heuristics.goal_heuristic(self, state_id);
        self.states[state_id].heur.set(h);
        h
    }

    /// Cost-from-start estimate for a state, from heuristic 0.
    pub fn get_start_heuristic(&self, state_id: usize) -> i32 {
        assert!(state_id < self.states.len(), "unknown state id");
        let h = self.heuristics.start_heuristic(self, state_id);
        self.states[state_id].heur.set(h);
        h
    }

    /// Cost estimate between two states, from heuristic 0.
    pub fn get_from_to_heuristic(&self, from_id: usize, to_id: usize) -> i32 {
        assert!(from_id < self.states.len(), "unknown state id");
        assert!(to_id < self.states.len(), "unknown state id");
        self.heuristics.from_to_heuristic(self, from_id, to_id)
    }

    /// Metric distance from the start tip position to a point, from
    /// heuristic 0.
    pub fn get_metric_start_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        self.heuristics.metric_start_distance(x, y, z)
    }

    /// Metric distance from a point to the goal region, from heuristic 0.
    pub fn get_metric_goal_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        self.heuristics.metric_goal_distance(x, y, z)
    }

    /// As [`ArmLattice::get_metric_start_distance`], measured at the
    /// tip-offset point of an end-effector pose.
    pub fn get_metric_start_distance_to_pose(&self, pose: &PoseSixDof) -> f64 {
        let p = self.target_offset_pose(pose);
        self.get_metric_start_distance(p[0], p[1], p[2])
    }

    /// As [`ArmLattice::get_metric_goal_distance`], measured at the
    /// tip-offset point of an end-effector pose.
    pub fn get_metric_goal_distance_to_pose(&self, pose: &PoseSixDof) -> f64 {
        let p = self.target_offset_pose(pose);
        self.get_metric_goal_distance(p[0], p[1], p[2])
    }
}
