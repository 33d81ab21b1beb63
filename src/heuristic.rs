//! Heuristics the search consults through the lattice.
//!
//! Heuristics live outside the lattice (a workspace BFS over the occupancy
//! grid, Euclidean distance, joint-space metrics). The lattice only routes:
//! the graph facade delegates to the first attached heuristic and answers 0
//! when none is attached. Heuristics read graph state through the lattice
//! reference they are handed on every call, never through retained pointers.

use std::sync::Arc;

use crate::goal::ActiveGoal;
use crate::lattice::ArmLattice;

/// A heuristic usable by the search. Every method has a neutral default, so
/// implementations override only the subset they can answer.
pub trait Heuristic {
    /// Estimated cost-to-goal of a graph state.
    fn goal_heuristic(&self, _lattice: &ArmLattice, _state_id: usize) -> i32 {
        0
    }

    /// Estimated cost from the start to a graph state.
    fn start_heuristic(&self, _lattice: &ArmLattice, _state_id: usize) -> i32 {
        0
    }

    /// Estimated cost between two graph states.
    fn from_to_heuristic(&self, _lattice: &ArmLattice, _from_id: usize, _to_id: usize) -> i32 {
        0
    }

    /// Metric distance in meters from the start tip position to a point.
    fn metric_start_distance(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        0.0
    }

    /// Metric distance in meters from a point to the goal region.
    fn metric_goal_distance(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        0.0
    }

    /// Called when the lattice accepts a new start state.
    fn updated_start(&self, _start: &[f64]) {}

    /// Called when the lattice accepts a new goal.
    fn updated_goal(&self, _goal: &ActiveGoal) {}
}

/// The heuristics attached to a lattice, in attachment order. Queries go to
/// heuristic 0; notifications go to all of them.
#[derive(Default)]
pub struct HeuristicStack {
    heuristics: Vec<Arc<dyn Heuristic>>,
}

impl HeuristicStack {
    pub fn push(&mut self, heuristic: Arc<dyn Heuristic>) {
        self.heuristics.push(heuristic);
    }

    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }

    pub(crate) fn goal_heuristic(&self, lattice: &ArmLattice, state_id: usize) -> i32 {
        self.heuristics
            .first()
            .map_or(0, |h| h.goal_heuristic(lattice, state_id))
    }

    pub(crate) fn start_heuristic(&self, lattice: &ArmLattice, state_id: usize) -> i32 {
        self.heuristics
            .first()
            .map_or(0, |h| h.start_heuristic(lattice, state_id))
    }

    pub(crate) fn from_to_heuristic(
        &self,
        lattice: &ArmLattice,
        from_id: usize,
        to_id: usize,
    ) -> i32 {
        self.heuristics
            .first()
            .map_or(0, |h| h.from_to_heuristic(lattice, from_id, to_id))
    }

    pub(crate) fn metric_start_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        self.heuristics
            .first()
            .map_or(0.0, |h| h.metric_start_distance(x, y, z))
    }

    pub(crate) fn metric_goal_distance(&self, x: f64, y: f64, z: f64) -> f64 {
        self.heuristics
            .first()
            .map_or(0.0, |h| h.metric_goal_distance(x, y, z))
    }

    pub(crate) fn notify_start(&self, start: &[f64]) {
        for h in &self.heuristics {
            h.updated_start(start);
        }
    }

    pub(crate) fn notify_goal(&self, goal: &ActiveGoal) {
        for h in &self.heuristics {
            h.updated_goal(goal);
        }
    }
}
