//! Nearest-target scan.
//!
//! Finds the closest attackable entity by Euclidean distance between cell
//! positions and describes it relative to the agent.

use geo::Coord;
use ndarray::Array1;

use super::super::entity::Entity;
use super::super::geometric_utils::distance;
use super::super::params::Params;
use super::super::world::World;
use super::sense::{Observation, Sense};

/// Channels in a nearest-target observation.
pub const NEAREST_TARGET_CHANNELS: usize = 6;

/// Distance reported when nothing attackable exists.
pub const NO_TARGET_DISTANCE: f32 = 99_999.99;

/// Scan over every attackable entity, reporting the single closest one.
///
/// Output layout: `[east, north, west, south, distance, strength]` where
/// east/west carry `|dx|` and north/south carry `|dy|` (y grows north). Of
/// each opposing pair at most one channel is non-zero. The strength channel
/// is the target's strength times `strength_scale`. Ties on distance go to
/// the target that comes first in world order.
pub struct NearestTarget;

impl NearestTarget {
    /// Creates a new nearest-target sense.
    pub fn new() -> Self {
        Self
    }

    /// The closest attackable entity to `agent` and its distance.
    pub fn nearest<'w>(agent: &Entity, world: &'w World) -> Option<(&'w Entity, f32)> {
        let params = world.params();
        let origin = cell_coord(agent);
        let mut best: Option<(&Entity, f32)> = None;

        for target in world.entities() {
            if target.id == agent.id || !target.can_be_attacked(params) {
                continue;
            }
            let d = distance(origin, cell_coord(target));
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((target, d));
            }
        }

        best
    }
}

impl Default for NearestTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Sense for NearestTarget {
    fn sense(&self, agent: &Entity, world: &World) -> Observation {
        let params = world.params();
        let mut values = Array1::zeros(NEAREST_TARGET_CHANNELS);

        match Self::nearest(agent, world) {
            Some((target, d)) => {
                let dx = (target.pos.x - agent.pos.x) as f32;
                let dy = (target.pos.y - agent.pos.y) as f32;
                values[0] = dx.max(0.0);
                values[1] = dy.max(0.0);
                values[2] = (-dx).max(0.0);
                values[3] = (-dy).max(0.0);
                values[4] = d;
                values[5] = target.strength() as f32 * params.strength_scale;
            }
            None => values[4] = NO_TARGET_DISTANCE,
        }

        Observation {
            values,
            sensors: Vec::new(),
        }
    }

    fn input_size(&self, _params: &Params) -> usize {
        NEAREST_TARGET_CHANNELS
    }

    fn name(&self) -> &'static str {
        "NearestTarget"
    }
}

fn cell_coord(entity: &Entity) -> Coord<f32> {
    Coord {
        x: entity.pos.x as f32,
        y: entity.pos.y as f32,
    }
}
