//! Perception models that build agent observations.

mod nearest;
mod sense;
mod vision;

pub use nearest::{NEAREST_TARGET_CHANNELS, NO_TARGET_DISTANCE, NearestTarget};
pub use sense::{Observation, Sense};
pub use vision::Vision;

use geo::Coord;
use std::collections::HashSet;

use super::entity::{Entity, EntityId};
use super::params::PerceptionModel;
use super::world::World;

static VISION: Vision = Vision;
static NEAREST_TARGET: NearestTarget = NearestTarget;

/// The sense implementing `model`.
pub fn sense_for(model: PerceptionModel) -> &'static dyn Sense {
    match model {
        PerceptionModel::RayFan => &VISION,
        PerceptionModel::NearestTarget => &NEAREST_TARGET,
    }
}

/// Attackable entities other than `agent` whose body could lie within
/// `radius` of `pos`.
///
/// Uses the world's target index when it is current and falls back to a
/// full scan otherwise. The result is in world order either way.
pub(crate) fn targets_within<'w>(
    world: &'w World,
    agent: &Entity,
    pos: Coord<f32>,
    radius: f32,
) -> Vec<&'w Entity> {
    let params = world.params();
    let keep = |target: &Entity| target.id != agent.id && target.can_be_attacked(params);

    match &world.index {
        Some(index) => {
            let hits: HashSet<EntityId> = index.query(pos, radius).into_iter().collect();
            world
                .entities()
                .iter()
                .filter(|target| hits.contains(&target.id) && keep(*target))
                .collect()
        }
        None => world.entities().iter().filter(|target| keep(*target)).collect(),
    }
}
