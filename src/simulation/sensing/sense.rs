//! Abstract sense trait shared by the perception models.
//!
//! A sense turns the world as seen from one agent into the fixed-length
//! observation vector handed to that agent's policy.

use ndarray::Array1;

use super::super::entity::{Entity, Sensor};
use super::super::params::Params;
use super::super::world::World;

/// The result of one sensing pass.
#[derive(Debug, Clone)]
pub struct Observation {
    /// Policy input; always `input_size` long.
    pub values: Array1<f32>,
    /// Rays cast during the pass (ray-fan only), for visualization.
    pub sensors: Vec<Sensor>,
}

/// Trait for the perception models an agent can use.
pub trait Sense: Sync {
    /// Observes the world from `agent`'s point of view.
    ///
    /// Only attackable entities other than `agent` are ever reported.
    fn sense(&self, agent: &Entity, world: &World) -> Observation;

    /// Returns the length of the observation vector.
    fn input_size(&self, params: &Params) -> usize;

    /// Returns a human-readable name for this sense.
    fn name(&self) -> &str;
}
