//! Entities living on the plane: resources and agents.
//!
//! Kind-specific behavior comes from a single dispatch table,
//! [`EntityKind::traits`], instead of a type per kind.

use geo::{Coord, Line, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::params::{MovementModel, Params};
use super::policy::{FitnessSink, Policy};
use super::position::Position;

/// Stable identity of an entity for the lifetime of a world.
///
/// Ids are never reused; a respawned resource gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Stationary food. Respawns when eaten.
    Resource,
    /// Stationary food that hits back harder than it feeds.
    PoisonedResource,
    /// Policy-driven agent scored by its health.
    PredatorAgent,
    /// Agent that only ages; scored by health plus survival time.
    VegetarianAgent,
}

/// How an entity's combat strength follows from its health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthRule {
    /// Constant strength regardless of health.
    Fixed(u32),
    /// `ceil(health / 5)`.
    HealthFifth,
}

impl StrengthRule {
    /// Strength for the given health.
    pub fn strength(self, health: u32) -> u32 {
        match self {
            StrengthRule::Fixed(strength) => strength,
            StrengthRule::HealthFifth => health.div_ceil(5),
        }
    }
}

/// Per-kind behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTraits {
    /// Takes a turn every tick.
    pub actor: bool,
    /// Senses, consults its policy, moves and attacks on its turn. Actors
    /// without this flag only age.
    pub forages: bool,
    /// Replaced at a random free cell when killed.
    pub reborn_on_death: bool,
    /// Strength as a function of health.
    pub strength: StrengthRule,
}

impl EntityKind {
    /// The behavior table for this kind.
    pub const fn traits(self) -> KindTraits {
        match self {
            EntityKind::Resource => KindTraits {
                actor: false,
                forages: false,
                reborn_on_death: true,
                strength: StrengthRule::Fixed(0),
            },
            EntityKind::PoisonedResource => KindTraits {
                actor: false,
                forages: false,
                reborn_on_death: true,
                strength: StrengthRule::Fixed(10),
            },
            EntityKind::PredatorAgent => KindTraits {
                actor: true,
                forages: true,
                reborn_on_death: false,
                strength: StrengthRule::HealthFifth,
            },
            EntityKind::VegetarianAgent => KindTraits {
                actor: true,
                forages: false,
                reborn_on_death: false,
                strength: StrengthRule::Fixed(0),
            },
        }
    }

    /// Whether this kind is driven by a policy.
    pub const fn is_agent(self) -> bool {
        self.traits().actor
    }

    /// Whether this kind is stationary food.
    pub const fn is_resource(self) -> bool {
        !self.traits().actor
    }
}

/// A single cast ray, kept for visualization only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Ray from the body centre; shortened to the nearest hit, if any.
    pub segment: Line<f32>,
    /// Absolute direction in radians.
    pub angle: f32,
}

/// How an agent is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Discrete 4-directional steps; no heading.
    Grid,
    /// Heading plus a speed that decays with world friction.
    Steering {
        /// Heading in radians.
        orientation: f32,
        /// Cells moved per tick.
        speed: f32,
    },
}

impl Motion {
    /// Heading, when the motion model has one.
    pub fn orientation(&self) -> Option<f32> {
        match self {
            Motion::Grid => None,
            Motion::Steering { orientation, .. } => Some(*orientation),
        }
    }
}

/// State that only agents carry.
#[derive(Clone)]
pub struct AgentState {
    /// Index of the agent in the population it was created from.
    pub slot: usize,
    /// Number of ticks the agent has acted.
    pub age: u64,
    /// World generation at creation time.
    pub generation: u32,
    /// Movement state.
    pub motion: Motion,
    /// Rays from the last ray-fan sensing pass.
    pub sensors: Vec<Sensor>,
    /// Decision policy.
    pub policy: Arc<dyn Policy>,
    /// Receives fitness after every attack.
    pub fitness_sink: Option<Arc<dyn FitnessSink>>,
}

impl AgentState {
    /// Fresh agent state for `movement` starting with `orientation` and `speed`.
    pub fn new(
        slot: usize,
        generation: u32,
        movement: MovementModel,
        orientation: f32,
        speed: f32,
        policy: Arc<dyn Policy>,
        fitness_sink: Option<Arc<dyn FitnessSink>>,
    ) -> Self {
        let motion = match movement {
            MovementModel::Grid => Motion::Grid,
            MovementModel::Continuous => Motion::Steering { orientation, speed },
        };
        Self {
            slot,
            age: 0,
            generation,
            motion,
            sensors: Vec::new(),
            policy,
            fitness_sink,
        }
    }
}

impl fmt::Debug for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentState")
            .field("slot", &self.slot)
            .field("age", &self.age)
            .field("generation", &self.generation)
            .field("motion", &self.motion)
            .field("sensors", &self.sensors.len())
            .finish_non_exhaustive()
    }
}

/// Anything occupying the plane.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Identity.
    pub id: EntityId,
    /// Kind; selects behavior through [`EntityKind::traits`].
    pub kind: EntityKind,
    /// Top-left cell of the body.
    pub pos: Position,
    /// Health; 0 means dead.
    pub health: u32,
    /// Present for agents only.
    pub agent: Option<AgentState>,
}

impl Entity {
    /// Creates a resource.
    pub fn resource(id: EntityId, kind: EntityKind, pos: Position, health: u32) -> Self {
        Self {
            id,
            kind,
            pos,
            health,
            agent: None,
        }
    }

    /// Creates an agent.
    pub fn agent(
        id: EntityId,
        kind: EntityKind,
        pos: Position,
        health: u32,
        state: AgentState,
    ) -> Self {
        Self {
            id,
            kind,
            pos,
            health,
            agent: Some(state),
        }
    }

    /// Checks if the entity is alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Combat damage this entity deals, from its current health.
    pub fn strength(&self) -> u32 {
        self.kind.traits().strength.strength(self.health)
    }

    /// Whether this entity can currently be sensed and attacked.
    ///
    /// Resources qualify while alive. Predators qualify only when the world
    /// opts into agent-vs-agent combat. Vegetarians never do.
    pub fn can_be_attacked(&self, params: &Params) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.kind {
            EntityKind::Resource | EntityKind::PoisonedResource => true,
            EntityKind::PredatorAgent => params.predators_attackable,
            EntityKind::VegetarianAgent => false,
        }
    }

    /// Fitness as seen by an external trainer.
    ///
    /// Predators score their health. Vegetarians score health plus the
    /// generations survived, or 0 once dead. Resources score 0.
    pub fn fitness(&self, world_generation: u32) -> i64 {
        let Some(agent) = &self.agent else {
            return 0;
        };
        match self.kind {
            EntityKind::VegetarianAgent => {
                if self.is_alive() {
                    i64::from(self.health) + i64::from(world_generation)
                        - i64::from(agent.generation)
                } else {
                    0
                }
            }
            _ => i64::from(self.health),
        }
    }

    /// Side length of this entity's body square.
    pub fn body_size(&self, params: &Params) -> i32 {
        if self.kind.is_agent() {
            params.agent_size
        } else {
            params.resource_size
        }
    }

    /// Body square anchored at the entity position.
    pub fn rect(&self, params: &Params) -> Rect<f32> {
        body_rect(self.pos, self.body_size(params))
    }

    /// Centre of the body square.
    pub fn center(&self, params: &Params) -> Coord<f32> {
        self.rect(params).center()
    }
}

/// A `size`-sided square whose top-left corner sits at `pos`.
pub fn body_rect(pos: Position, size: i32) -> Rect<f32> {
    let min = Coord {
        x: pos.x as f32,
        y: pos.y as f32,
    };
    let max = Coord {
        x: (pos.x + size) as f32,
        y: (pos.y + size) as f32,
    };
    Rect::new(min, max)
}

/// Adds a signed health change, clamping at 0.
pub fn apply_health_delta(health: u32, delta: i64) -> u32 {
    let next = i64::from(health) + delta;
    u32::try_from(next.max(0)).unwrap_or(u32::MAX)
}
