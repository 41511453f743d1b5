//! Health transfer between an attacker and its victim.
//!
//! The rule is symmetric and order-sensitive: the victim's buffer
//! `health - strength` is read before the victim takes damage, the victim
//! loses the attacker's strength (clamped at 0), and the attacker gains
//! `min(attacker.strength, buffer)`. A buffer below zero (a victim stronger
//! than it is healthy, such as poisoned food) drains the attacker instead.

use tracing::trace;

use super::entity::{EntityId, apply_health_delta};
use super::position::Position;
use super::world::World;

/// Health values after one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    /// Attacker health afterwards.
    pub attacker_health: u32,
    /// Victim health afterwards.
    pub victim_health: u32,
    /// Signed change applied to the attacker before clamping.
    pub gain: i64,
    /// Health the victim actually lost.
    pub damage: u32,
}

/// Applies the transfer rule to raw values.
pub fn exchange(
    attacker_health: u32,
    attacker_strength: u32,
    victim_health: u32,
    victim_strength: u32,
) -> Exchange {
    let buffer = i64::from(victim_health) - i64::from(victim_strength);
    let victim_after = apply_health_delta(victim_health, -i64::from(attacker_strength));
    let gain = i64::from(attacker_strength).min(buffer);

    Exchange {
        attacker_health: apply_health_delta(attacker_health, gain),
        victim_health: victim_after,
        gain,
        damage: victim_health - victim_after,
    }
}

/// Everything one attack changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Who attacked.
    pub attacker: EntityId,
    /// Who was attacked.
    pub victim: EntityId,
    /// Resulting health values.
    pub exchange: Exchange,
    /// The victim reached 0 health and was removed.
    pub victim_killed: bool,
    /// The attacker reached 0 health and was removed.
    pub attacker_killed: bool,
    /// Replacement placed for a reborn victim.
    pub respawn: Option<(EntityId, Position)>,
}

/// Resolves `attacker` biting `victim`.
///
/// Dead entities are removed on the spot and reborn resources are replaced
/// at a random free cell before this returns. Fitness sinks of both parties
/// receive their new fitness.
///
/// Returns `None` if either id is no longer on the plane or both ids are
/// the same entity.
pub fn resolve_attack(
    world: &mut World,
    attacker: EntityId,
    victim: EntityId,
) -> Option<AttackOutcome> {
    if attacker == victim {
        return None;
    }
    let ai = world.index_of(attacker)?;
    let vi = world.index_of(victim)?;

    let result = {
        let a = &world.entities[ai];
        let v = &world.entities[vi];
        exchange(a.health, a.strength(), v.health, v.strength())
    };

    world.entities[ai].health = result.attacker_health;
    world.entities[vi].health = result.victim_health;

    trace!(
        %attacker,
        %victim,
        damage = result.damage,
        gain = result.gain,
        attacker_health = result.attacker_health,
        victim_health = result.victim_health,
        "attack resolved"
    );

    world.report_fitness(&world.entities[ai]);
    world.report_fitness(&world.entities[vi]);

    let victim_killed = result.victim_health == 0;
    let attacker_killed = result.attacker_health == 0;

    let respawn = if victim_killed {
        world.kill(victim)
    } else {
        None
    };
    if attacker_killed {
        world.kill(attacker);
    }

    Some(AttackOutcome {
        attacker,
        victim,
        exchange: result,
        victim_killed,
        attacker_killed,
        respawn,
    })
}
