//! # Creatures - Discrete-Time Ecosystem Core
//!
//! Agents move across a bounded toroidal plane, sense stationary resources,
//! and bite them to gain health. Each agent's action comes from an external
//! decision policy; the crate only promises a deterministic world given a
//! fixed seed and deterministic policies.
//!
//! ## Features
//!
//! - Grid (4-directional) and continuous (steering) movement models
//! - Ray-fan and nearest-target perception
//! - Symmetric health-transfer combat with respawning resources
//! - Sequential tick scheduling, tolerant of removals mid-tick
//! - Read-only snapshots for renderers
//! - Population evaluation for external trainers, parallel across trials
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Entity storage and occupancy queries
//! - [`simulation::scheduler`] - Per-tick agent turns
//! - [`simulation::sensing`] - Observation vectors
//! - [`simulation::combat`] - Attack resolution
//! - [`simulation::geometric_utils`] - Segment and rectangle math

/// Core simulation logic and data structures.
pub mod simulation {
    /// Feed-forward network policy.
    pub mod brain;
    /// Attack resolution and health transfer.
    pub mod combat;
    /// Entities, kinds and the kind dispatch table.
    pub mod entity;
    /// World construction and placement errors.
    pub mod error;
    /// Population fitness evaluation.
    pub mod evaluation;
    /// Segment, ray and rectangle geometry.
    pub mod geometric_utils;
    /// Simulation parameters.
    pub mod params;
    /// Decision policies and fitness sinks.
    pub mod policy;
    /// Cells, offsets and the toroidal wrap rule.
    pub mod position;
    /// Tick scheduling and agent turns.
    pub mod scheduler;
    /// Perception models.
    pub mod sensing;
    /// Render snapshots.
    pub mod snapshot;
    /// KD-tree index over attackable entities.
    pub mod spatial;
    /// The world and its entity collection.
    pub mod world;
}

pub use simulation::entity::{Entity, EntityId, EntityKind};
pub use simulation::error::WorldError;
pub use simulation::params::{MovementModel, Params, PerceptionModel};
pub use simulation::policy::{AgentSpec, ConstantPolicy, FitnessSink, Policy, SharedFitness};
pub use simulation::position::{Bounds, Delta, Direction, Position};
pub use simulation::scheduler::{ActOutcome, RunSummary, TickPhase, TickReport};
pub use simulation::world::World;
