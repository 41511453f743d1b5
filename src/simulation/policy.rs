//! Decision and fitness-reporting capabilities supplied by the caller.
//!
//! The world never looks inside a policy: it hands over an observation
//! vector and receives an action index back.

use ndarray::Array1;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use super::entity::EntityKind;

/// Maps an observation vector to a discrete action index.
///
/// Implementations must be deterministic for simulation runs to be
/// reproducible. `Sync` lets independent worlds share one policy.
pub trait Policy: Send + Sync {
    /// Chooses an action for the current tick.
    fn decide(&self, observation: &Array1<f32>) -> usize;
}

impl<F> Policy for F
where
    F: Fn(&Array1<f32>) -> usize + Send + Sync,
{
    fn decide(&self, observation: &Array1<f32>) -> usize {
        self(observation)
    }
}

/// Always returns the same action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantPolicy(pub usize);

impl Policy for ConstantPolicy {
    fn decide(&self, _observation: &Array1<f32>) -> usize {
        self.0
    }
}

/// Receives an agent's fitness whenever it changes through combat.
pub trait FitnessSink: Send + Sync {
    /// Stores the latest fitness value.
    fn record(&self, fitness: i64);
}

/// A fitness cell shared between the world and an external trainer.
#[derive(Debug, Clone, Default)]
pub struct SharedFitness(Arc<AtomicI64>);

impl SharedFitness {
    /// Creates a cell holding 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded fitness.
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl FitnessSink for SharedFitness {
    fn record(&self, fitness: i64) {
        self.0.store(fitness, Ordering::Relaxed);
    }
}

/// One initial agent: its kind, its policy and an optional fitness sink.
#[derive(Clone)]
pub struct AgentSpec {
    /// Must be an agent kind.
    pub kind: EntityKind,
    /// Decision policy bound to the agent for its whole life.
    pub policy: Arc<dyn Policy>,
    /// Receives fitness updates.
    pub fitness_sink: Option<Arc<dyn FitnessSink>>,
}

impl AgentSpec {
    /// A predator driven by `policy`, with no fitness sink.
    pub fn new(policy: Arc<dyn Policy>) -> Self {
        Self {
            kind: EntityKind::PredatorAgent,
            policy,
            fitness_sink: None,
        }
    }

    /// Sets the agent kind.
    #[must_use]
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attaches a fitness sink.
    #[must_use]
    pub fn with_fitness_sink(mut self, sink: Arc<dyn FitnessSink>) -> Self {
        self.fitness_sink = Some(sink);
        self
    }
}

impl fmt::Debug for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentSpec")
            .field("kind", &self.kind)
            .field("fitness_sink", &self.fitness_sink.is_some())
            .finish_non_exhaustive()
    }
}
