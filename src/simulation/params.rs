use serde::{Deserialize, Serialize};

use super::error::WorldError;
use super::position::Bounds;
use super::sensing::NEAREST_TARGET_CHANNELS;

/// How agents translate an action index into movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementModel {
    /// One cell per tick in one of four directions. Moving into an attackable
    /// entity attacks it instead of moving.
    Grid,
    /// Orientation plus decaying speed. Movement always completes; every
    /// attackable body overlapping the agent afterwards is attacked.
    Continuous,
}

/// Which sensor produces the observation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerceptionModel {
    /// A fan of rays cast against attackable bodies.
    RayFan,
    /// Direction channels, distance and strength of the single nearest target.
    NearestTarget,
}

/// Simulation parameters that control world behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Plane width in cells.
    pub width: i32,
    /// Plane height in cells.
    pub height: i32,
    /// Fraction of speed lost per tick (continuous movement only).
    pub friction: f32,
    /// Seed for the world RNG (placement and initial orientation).
    pub seed: u64,
    /// Generation counter value the world starts with.
    pub generation: u32,
    /// Ordinary resources seeded at construction.
    pub n_resources: usize,
    /// Poisoned resources seeded at construction.
    pub n_poisoned_resources: usize,
    /// Health of freshly placed resources.
    pub resource_health: u32,
    /// Health of freshly placed agents.
    pub agent_health: u32,
    /// Movement model shared by every agent in the world.
    pub movement: MovementModel,
    /// Perception model shared by every agent in the world.
    pub perception: PerceptionModel,
    /// Speed agents start with (continuous movement only).
    pub initial_speed: f32,
    /// Orientation change per unit of `action - 1`, in radians.
    pub turn_step: f32,
    /// Number of rays in the fan.
    pub sensors_qty: usize,
    /// Angle covered by the fan, in radians.
    pub sensors_view_angle: f32,
    /// Length of each ray.
    pub sensor_len: f32,
    /// Side length of an agent's body square.
    pub agent_size: i32,
    /// Side length of a resource's body square.
    pub resource_size: i32,
    /// Multiplier applied to the target strength channel of the
    /// nearest-target observation.
    pub strength_scale: f32,
    /// Whether predator agents are valid targets for other agents.
    pub predators_attackable: bool,
}

impl Params {
    /// Discrete 4-directional world with nearest-target sensing.
    pub fn grid() -> Self {
        Self {
            width: 50,
            height: 50,
            friction: 0.0,
            seed: 0,
            generation: 1,
            n_resources: 50,
            n_poisoned_resources: 0,
            resource_health: 1,
            agent_health: 10,
            movement: MovementModel::Grid,
            perception: PerceptionModel::NearestTarget,
            initial_speed: 10.0,
            turn_step: 10f32.to_radians(),
            sensors_qty: 9,
            sensors_view_angle: 90f32.to_radians(),
            sensor_len: 200.0,
            agent_size: 20,
            resource_size: 10,
            strength_scale: 0.1,
            predators_attackable: false,
        }
    }

    /// Steering world with ray-fan sensing.
    pub fn continuous() -> Self {
        Self {
            width: 1200,
            height: 800,
            movement: MovementModel::Continuous,
            perception: PerceptionModel::RayFan,
            ..Self::grid()
        }
    }

    /// The plane described by `width` and `height`.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Length of the observation vector agents receive.
    pub fn observation_size(&self) -> usize {
        match self.perception {
            PerceptionModel::RayFan => self.sensors_qty,
            PerceptionModel::NearestTarget => NEAREST_TARGET_CHANNELS,
        }
    }

    /// Checks every field for an accepted range.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width < 1 || self.height < 1 {
            return Err(WorldError::InvalidParams(format!(
                "plane must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(WorldError::InvalidParams(format!(
                "friction must lie in [0, 1], got {}",
                self.friction
            )));
        }
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(WorldError::InvalidParams(format!(
                "initial speed must be finite and non-negative, got {}",
                self.initial_speed
            )));
        }
        if !self.turn_step.is_finite() || !self.strength_scale.is_finite() {
            return Err(WorldError::InvalidParams(
                "turn step and strength scale must be finite".to_string(),
            ));
        }
        if self.sensors_qty == 0 {
            return Err(WorldError::InvalidParams(
                "at least one sensor ray is required".to_string(),
            ));
        }
        if !self.sensors_view_angle.is_finite() || self.sensors_view_angle < 0.0 {
            return Err(WorldError::InvalidParams(format!(
                "sensor view angle must be finite and non-negative, got {}",
                self.sensors_view_angle
            )));
        }
        if !(self.sensor_len.is_finite() && self.sensor_len > 0.0) {
            return Err(WorldError::InvalidParams(format!(
                "sensor length must be positive, got {}",
                self.sensor_len
            )));
        }
        if self.resource_health == 0 || self.agent_health == 0 {
            return Err(WorldError::InvalidParams(format!(
                "entities must start alive, got agent health {} and resource health {}",
                self.agent_health, self.resource_health
            )));
        }
        if self.agent_size < 1 || self.resource_size < 1 {
            return Err(WorldError::InvalidParams(format!(
                "body sizes must be positive, got agent {} and resource {}",
                self.agent_size, self.resource_size
            )));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::grid()
    }
}
