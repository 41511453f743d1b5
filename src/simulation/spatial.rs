//! Spatial indexing for efficient target queries.
//!
//! Only attackable entities are indexed, keyed by the centre of their body.
//! The world rebuilds the index lazily after any change that could move,
//! add or remove a target.

use geo::Coord;
use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};

use super::entity::{Entity, EntityId};
use super::params::Params;

/// Type alias for the 2D KD-tree used for target queries.
pub type Tree2D = KdTree<f32, EntityId, [f32; 2]>;

/// KD-tree over the centres of attackable entities.
#[derive(Debug)]
pub struct SpatialIndex {
    targets: Tree2D,
    /// Largest body half-diagonal among indexed entities.
    max_reach: f32,
}

impl SpatialIndex {
    /// Builds an index over every entity that can currently be attacked.
    pub fn build(entities: &[Entity], params: &Params) -> Result<Self, KdTreeError> {
        let mut targets = KdTree::new(2);
        let mut max_reach: f32 = 0.0;
        for entity in entities.iter().filter(|e| e.can_be_attacked(params)) {
            let center = entity.center(params);
            targets.add([center.x, center.y], entity.id)?;
            let half = entity.body_size(params) as f32 / 2.0;
            max_reach = max_reach.max(half * std::f32::consts::SQRT_2);
        }
        Ok(Self { targets, max_reach })
    }

    /// Number of indexed targets.
    pub fn len(&self) -> usize {
        self.targets.size()
    }

    /// Whether no target is indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of targets whose body could touch a disc of `radius` around `pos`.
    ///
    /// The radius is widened by the largest body half-diagonal so that a
    /// body whose centre lies just outside still counts.
    pub fn query(&self, pos: Coord<f32>, radius: f32) -> Vec<EntityId> {
        let reach = radius + self.max_reach;
        self.targets
            .within(&[pos.x, pos.y], reach.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(_, &id)| id)
            .collect()
    }
}
