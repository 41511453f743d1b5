//! Ray-fan vision.
//!
//! Rays leave the centre of the agent's body, spread evenly across the view
//! angle around its heading. Each ray reports the distance to the nearest
//! attackable body it crosses.

use geo::Line;
use ndarray::Array1;

use super::super::entity::{Entity, Sensor};
use super::super::geometric_utils::{distance_to_rect, ray_end};
use super::super::params::Params;
use super::super::world::World;
use super::sense::{Observation, Sense};
use super::targets_within;

/// Fan of `sensors_qty` rays of length `sensor_len`.
///
/// A ray that hits nothing reports `sensor_len`. Agents without a heading
/// (grid movement) look along angle 0.
pub struct Vision;

impl Vision {
    /// Creates a new vision sense.
    pub fn new() -> Self {
        Self
    }

    /// Absolute direction of ray `i`.
    pub fn ray_angle(params: &Params, orientation: f32, i: usize) -> f32 {
        let step = params.sensors_view_angle / params.sensors_qty as f32;
        orientation - params.sensors_view_angle / 2.0 + i as f32 * step
    }
}

impl Default for Vision {
    fn default() -> Self {
        Self::new()
    }
}

impl Sense for Vision {
    fn sense(&self, agent: &Entity, world: &World) -> Observation {
        let params = world.params();
        let start = agent.center(params);
        let orientation = agent
            .agent
            .as_ref()
            .and_then(|state| state.motion.orientation())
            .unwrap_or(0.0);

        let targets: Vec<_> = targets_within(world, agent, start, params.sensor_len)
            .into_iter()
            .map(|target| target.rect(params))
            .collect();

        let mut values = Array1::zeros(params.sensors_qty);
        let mut sensors = Vec::with_capacity(params.sensors_qty);

        for i in 0..params.sensors_qty {
            let angle = Self::ray_angle(params, orientation, i);
            let segment = Line::new(start, ray_end(start, params.sensor_len, angle));

            let nearest = targets
                .iter()
                .filter_map(|rect| distance_to_rect(&segment, rect))
                .min_by(f32::total_cmp);
            let reach = nearest.map_or(params.sensor_len, |d| d.min(params.sensor_len));

            values[i] = reach;
            sensors.push(Sensor {
                segment: Line::new(start, ray_end(start, reach, angle)),
                angle,
            });
        }

        Observation { values, sensors }
    }

    fn input_size(&self, params: &Params) -> usize {
        params.sensors_qty
    }

    fn name(&self) -> &'static str {
        "Vision"
    }
}
