//! Configuration-space lattice graph for articulated robot arm motion planning.
//!
//! This crate discretizes the joint space of an N-joint arm into a lattice and
//! exposes it as a weighted graph for an external heuristic search (A*, ARA*,
//! MHA* and friends). Successors are generated lazily from motion primitives
//! supplied by an action-space collaborator, validated against joint limits
//! and a collision oracle, and absorbed into a single reserved goal node once
//! they satisfy the active goal constraint. After the search returns a
//! sequence of state ids, the lattice reconstructs the concrete joint-space
//! path, resolving the synthetic goal node back into the configuration the
//! search actually reached it through.
//!
//! # Features
//!
//! - Lattice states are created on demand and keyed by their discrete
//!   coordinate; continuous joints wrap modulo 2π, limited joints bin within
//!   their range.
//! - Three goal types: a full 6-DOF pose with translational and rotational
//!   tolerances, a position with translation only, and a joint configuration
//!   with per-joint tolerances. Pose goals are measured at a configurable tip
//!   offset expressed in the end-effector body frame.
//! - Eager, lazy and true-cost expansion, matching the contract of lazy
//!   weighted searches: lazy edges skip collision checking and are
//!   materialized later through `get_true_cost`.
//! - Heuristics attach to the lattice and are consulted through a uniform
//!   facade; they read graph state back through the public API.
//! - The robot model, collision oracle, occupancy grid and action space are
//!   trait objects supplied by the embedding application.
//!
//! The lattice is single threaded by contract: drive it from one thread and
//! serialize access.

pub mod angles;
pub mod goal;
pub mod heuristic;
pub mod lattice;
pub mod params;
pub mod params_from_file;
pub mod planner_traits;
pub mod planning_error;
pub mod tip_pose;
pub mod validation;

#[cfg(test)]
mod tests;
