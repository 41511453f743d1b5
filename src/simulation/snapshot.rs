//! Read-only views of world state for renderers.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind, Sensor};
use super::position::Position;
use super::world::World;

/// What a renderer needs to draw one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Identity, stable across ticks.
    pub id: EntityId,
    /// Kind.
    pub kind: EntityKind,
    /// Cell.
    pub position: Position,
    /// Health.
    pub health: u32,
    /// Heading, for steering agents.
    pub orientation: Option<f32>,
    /// Rays from the last sensing pass, for ray-fan agents.
    pub sensors: Vec<Sensor>,
}

/// A copy of the world between two ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Completed ticks.
    pub tick: u64,
    /// World generation.
    pub generation: u32,
    /// Plane width.
    pub width: i32,
    /// Plane height.
    pub height: i32,
    /// Every entity in world order.
    pub entities: Vec<EntityView>,
}

impl WorldSnapshot {
    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl World {
    /// Captures the current state for rendering.
    pub fn snapshot(&self) -> WorldSnapshot {
        let entities = self
            .entities()
            .iter()
            .map(|entity| EntityView {
                id: entity.id,
                kind: entity.kind,
                position: entity.pos,
                health: entity.health,
                orientation: entity
                    .agent
                    .as_ref()
                    .and_then(|agent| agent.motion.orientation()),
                sensors: entity
                    .agent
                    .as_ref()
                    .map(|agent| agent.sensors.clone())
                    .unwrap_or_default(),
            })
            .collect();

        WorldSnapshot {
            tick: self.tick_count(),
            generation: self.generation(),
            width: self.bounds().width,
            height: self.bounds().height,
            entities,
        }
    }
}
