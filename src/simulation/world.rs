//! World state: entity storage, occupancy queries and toroidal arithmetic.
//!
//! The world exclusively owns its entity collection. Only the tick scheduler
//! and the combat resolver it invokes mutate entities once a run has started;
//! callers read through [`World::entities`] or [`World::snapshot`] between
//! ticks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::entity::{AgentState, Entity, EntityId, EntityKind};
use super::error::WorldError;
use super::params::Params;
use super::policy::AgentSpec;
use super::position::{Bounds, Delta, Position};
use super::scheduler::TickPhase;
use super::spatial::SpatialIndex;

/// The simulated plane and everything on it.
#[derive(Debug)]
pub struct World {
    pub(super) params: Params,
    pub(super) bounds: Bounds,
    /// Insertion order; iteration order for ticks and first-wins tie-breaks.
    pub(super) entities: Vec<Entity>,
    pub(super) next_id: u64,
    pub(super) next_slot: usize,
    pub(super) generation: u32,
    pub(super) tick: u64,
    pub(super) phase: TickPhase,
    pub(super) rng: ChaCha8Rng,
    /// Cached target index; `None` after any change to attackable entities.
    pub(super) index: Option<SpatialIndex>,
}

impl World {
    /// Builds a world with one agent per population entry plus the configured
    /// resources, all placed at distinct random cells.
    ///
    /// Agents are placed first, in population order, then ordinary
    /// resources, then poisoned ones.
    ///
    /// # Errors
    ///
    /// Fails fast when the parameters are invalid, when a population entry is
    /// not an agent kind, or when agents plus resources would fill the plane
    /// (at least one cell must stay free).
    pub fn new(population: Vec<AgentSpec>, params: Params) -> Result<Self, WorldError> {
        let mut world = Self::empty(params)?;

        let requested =
            population.len() + world.params.n_resources + world.params.n_poisoned_resources;
        let capacity = world.bounds.capacity();
        if requested >= capacity {
            return Err(WorldError::Overcrowded {
                requested,
                capacity,
            });
        }
        if let Some(spec) = population.iter().find(|spec| !spec.kind.is_agent()) {
            return Err(WorldError::NotAnAgent(spec.kind));
        }

        for spec in population {
            let pos = world.random_free_position();
            world.place_agent(spec, pos);
        }
        for _ in 0..world.params.n_resources {
            let pos = world.random_free_position();
            world.place_resource(EntityKind::Resource, pos);
        }
        for _ in 0..world.params.n_poisoned_resources {
            let pos = world.random_free_position();
            world.place_resource(EntityKind::PoisonedResource, pos);
        }

        debug!(
            width = world.bounds.width,
            height = world.bounds.height,
            agents = world.agent_count(),
            resources = world.resource_count(),
            seed = world.params.seed,
            "world created"
        );

        Ok(world)
    }

    /// Builds a world with nothing on it, for scripted placement.
    pub fn empty(params: Params) -> Result<Self, WorldError> {
        params.validate()?;
        Ok(Self {
            bounds: params.bounds(),
            rng: ChaCha8Rng::seed_from_u64(params.seed),
            generation: params.generation,
            params,
            entities: Vec::new(),
            next_id: 0,
            next_slot: 0,
            tick: 0,
            phase: TickPhase::Idle,
            index: None,
        })
    }

    /// Places an agent at an explicit cell.
    pub fn insert_agent(&mut self, spec: AgentSpec, pos: Position) -> Result<EntityId, WorldError> {
        if !spec.kind.is_agent() {
            return Err(WorldError::NotAnAgent(spec.kind));
        }
        self.check_vacant(pos)?;
        Ok(self.place_agent(spec, pos))
    }

    /// Places a resource at an explicit cell.
    pub fn insert_resource(
        &mut self,
        kind: EntityKind,
        pos: Position,
    ) -> Result<EntityId, WorldError> {
        if !kind.is_resource() {
            return Err(WorldError::NotAResource(kind));
        }
        self.check_vacant(pos)?;
        Ok(self.place_resource(kind, pos))
    }

    /// Places a resource of `kind` at a random free cell.
    ///
    /// # Errors
    ///
    /// Refuses when the plane has no free cell left.
    pub fn spawn_resource(&mut self, kind: EntityKind) -> Result<EntityId, WorldError> {
        if !kind.is_resource() {
            return Err(WorldError::NotAResource(kind));
        }
        let capacity = self.bounds.capacity();
        if self.entities.len() >= capacity {
            return Err(WorldError::Overcrowded {
                requested: self.entities.len() + 1,
                capacity,
            });
        }
        let pos = self.random_free_position();
        Ok(self.place_resource(kind, pos))
    }

    /// Removes an entity, keeping the order of the others.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.index_of(id)?;
        let removed = self.entities.remove(idx);
        self.invalidate_index();
        Some(removed)
    }

    /// Removes a dead entity and, if its kind is reborn on death, places a
    /// replacement of the same kind at a fresh random free cell.
    ///
    /// Returns the replacement's id and cell.
    pub fn kill(&mut self, id: EntityId) -> Option<(EntityId, Position)> {
        let removed = self.remove_entity(id)?;
        if !removed.kind.traits().reborn_on_death {
            return None;
        }
        // The removal just freed a cell, so a free cell always exists.
        let pos = self.random_free_position();
        let new_id = self.place_resource(removed.kind, pos);
        debug!(old = %id, new = %new_id, kind = ?removed.kind, %pos, "resource respawned");
        Some((new_id, pos))
    }

    /// Rejection-samples a uniformly random cell with no resident entity.
    ///
    /// Precondition: at least one free cell exists. World construction and
    /// [`World::spawn_resource`] enforce this before calling.
    pub fn random_free_position(&mut self) -> Position {
        loop {
            let pos = Position::new(
                self.rng.random_range(1..=self.bounds.width),
                self.rng.random_range(1..=self.bounds.height),
            );
            if self.occupant(pos).is_none() {
                return pos;
            }
        }
    }

    /// The first entity, in insertion order, whose position equals `pos`.
    ///
    /// # Errors
    ///
    /// Out-of-range coordinates are rejected, never wrapped.
    pub fn entity_at(&self, pos: Position) -> Result<Option<&Entity>, WorldError> {
        self.bounds.check(pos)?;
        Ok(self.occupant(pos).map(|idx| &self.entities[idx]))
    }

    /// Destination of a grid step from `base`, wrapped onto the plane.
    pub fn wrap_position(&self, base: Position, delta: Delta) -> Position {
        self.bounds.wrap_delta(base, delta)
    }

    /// Destination of a steering step from `base`, wrapped onto the plane.
    pub fn wrap_heading(&self, base: Position, orientation: f32, speed: f32) -> Position {
        self.bounds.wrap_heading(base, orientation, speed)
    }

    /// All live entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Agents in insertion order.
    pub fn agents(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_agent())
    }

    /// Number of agents on the plane.
    pub fn agent_count(&self) -> usize {
        self.agents().count()
    }

    /// Number of resources (of any kind) on the plane.
    pub fn resource_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind.is_resource()).count()
    }

    /// Current fitness of an entity, if it is still on the plane.
    pub fn fitness(&self, id: EntityId) -> Option<i64> {
        self.entity(id).map(|e| e.fitness(self.generation))
    }

    /// Current world generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Moves the generation counter forward by one.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Scheduler state.
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    /// Parameters the world was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Plane dimensions.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(super) fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub(super) fn occupant(&self, pos: Position) -> Option<usize> {
        self.entities.iter().position(|e| e.pos == pos)
    }

    pub(super) fn invalidate_index(&mut self) {
        self.index = None;
    }

    /// Rebuilds the target index if it was invalidated.
    pub(super) fn ensure_index(&mut self) {
        if self.index.is_none() {
            // Positions are small integers, so the tree never sees a
            // non-finite coordinate; on failure sensing falls back to a scan.
            self.index = SpatialIndex::build(&self.entities, &self.params).ok();
        }
    }

    /// Pushes an agent's current fitness to its sink, if it has one.
    pub(super) fn report_fitness(&self, entity: &Entity) {
        if let Some(sink) = entity.agent.as_ref().and_then(|a| a.fitness_sink.as_ref()) {
            sink.record(entity.fitness(self.generation));
        }
    }

    fn check_vacant(&self, pos: Position) -> Result<(), WorldError> {
        self.bounds.check(pos)?;
        if self.occupant(pos).is_some() {
            return Err(WorldError::Occupied { x: pos.x, y: pos.y });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn place_agent(&mut self, spec: AgentSpec, pos: Position) -> EntityId {
        let id = self.allocate_id();
        let slot = self.next_slot;
        self.next_slot += 1;
        let orientation = self.rng.random::<f32>() * std::f32::consts::PI;
        let state = AgentState::new(
            slot,
            self.generation,
            self.params.movement,
            orientation,
            self.params.initial_speed,
            spec.policy,
            spec.fitness_sink,
        );
        let entity = Entity::agent(id, spec.kind, pos, self.params.agent_health, state);
        self.report_fitness(&entity);
        if entity.can_be_attacked(&self.params) {
            self.invalidate_index();
        }
        self.entities.push(entity);
        id
    }

    fn place_resource(&mut self, kind: EntityKind, pos: Position) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(Entity::resource(
            id,
            kind,
            pos,
            self.params.resource_health,
        ));
        self.invalidate_index();
        id
    }
}
