//! Tick scheduling: every agent acts once per tick, sequentially.
//!
//! Agents act in insertion order. Effects are visible immediately to agents
//! acting later in the same tick. The roster of agent ids is captured when
//! the tick starts and liveness is looked up again before each act, so an
//! agent removed earlier in the tick gets a no-op turn and nobody is skipped
//! or acts twice.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use super::combat::{AttackOutcome, resolve_attack};
use super::entity::{EntityId, Motion};
use super::geometric_utils::rects_overlap;
use super::params::MovementModel;
use super::position::{Direction, Position};
use super::sensing::sense_for;
use super::world::World;

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickPhase {
    /// Between ticks; the world may be read.
    Idle,
    /// Agents are acting.
    Acting,
}

/// What one call to [`World::act`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum ActOutcome {
    /// No agent with that id is on the plane.
    Absent,
    /// The agent has no health left.
    Inert,
    /// The agent's kind does not forage; its turn only aged it.
    Aged,
    /// The agent sensed, decided and moved or attacked.
    Acted {
        /// Action index returned by the policy.
        action: usize,
        /// Cell before acting.
        from: Position,
        /// Cell after acting; equals `from` after a grid attack or if the
        /// agent died.
        to: Position,
        /// Attacks made, in resolution order.
        attacks: Vec<AttackOutcome>,
    },
}

/// Per-tick counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Agents on the plane when the tick started.
    pub agents_at_start: usize,
    /// Agents that acted.
    pub acted: usize,
    /// Roster entries that were already gone or inert when their turn came.
    pub skipped: usize,
    /// Attacks resolved.
    pub attacks: usize,
    /// Victims removed.
    pub kills: usize,
    /// Replacement resources placed.
    pub respawns: usize,
    /// Agents removed, whether as attacker or victim.
    pub deaths: usize,
}

impl TickReport {
    fn absorb(&mut self, other: &TickReport) {
        self.agents_at_start += other.agents_at_start;
        self.acted += other.acted;
        self.skipped += other.skipped;
        self.attacks += other.attacks;
        self.kills += other.kills;
        self.respawns += other.respawns;
        self.deaths += other.deaths;
    }
}

/// Totals over a multi-tick run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Agents still on the plane at the end.
    pub survivors: usize,
    /// Counters summed over all ticks.
    pub totals: TickReport,
}

impl World {
    /// Advances the simulation by exactly one step.
    pub fn tick(&mut self) -> TickReport {
        self.phase = TickPhase::Acting;

        let roster: Vec<EntityId> = self.agents().map(|agent| agent.id).collect();
        let mut report = TickReport {
            agents_at_start: roster.len(),
            ..TickReport::default()
        };

        for id in roster {
            match self.act(id) {
                ActOutcome::Absent | ActOutcome::Inert => report.skipped += 1,
                ActOutcome::Aged => report.acted += 1,
                ActOutcome::Acted { attacks, .. } => {
                    report.acted += 1;
                    for attack in &attacks {
                        report.attacks += 1;
                        if attack.victim_killed {
                            report.kills += 1;
                            if attack.respawn.is_some() {
                                report.respawns += 1;
                            } else {
                                report.deaths += 1;
                            }
                        }
                        if attack.attacker_killed {
                            report.deaths += 1;
                        }
                    }
                }
            }
        }

        self.tick += 1;
        self.phase = TickPhase::Idle;
        report
    }

    /// Ticks until `max_ticks` have run or no agent is left.
    pub fn run(&mut self, max_ticks: u64) -> RunSummary {
        let mut summary = RunSummary::default();
        while summary.ticks < max_ticks && self.agent_count() > 0 {
            let report = self.tick();
            summary.totals.absorb(&report);
            summary.ticks += 1;
        }
        summary.survivors = self.agent_count();
        summary
    }

    /// One agent's turn: sense, decide, move or attack.
    ///
    /// Acting on an id that is gone, or on a dead agent, does nothing. Kinds
    /// that do not forage only age.
    pub fn act(&mut self, id: EntityId) -> ActOutcome {
        let Some(idx) = self.index_of(id) else {
            return ActOutcome::Absent;
        };
        if !self.entities[idx].is_alive() {
            return ActOutcome::Inert;
        }
        let forages = self.entities[idx].kind.traits().forages;
        let Some(agent) = self.entities[idx].agent.as_mut() else {
            return ActOutcome::Absent;
        };
        agent.age += 1;
        if !forages {
            return ActOutcome::Aged;
        }
        let policy = Arc::clone(&agent.policy);

        self.ensure_index();
        let sense = sense_for(self.params.perception);
        let observation = sense.sense(&self.entities[idx], self);
        let action = policy.decide(&observation.values);
        trace!(agent = %id, sense = sense.name(), action, "agent decided");
        if let Some(agent) = self.entities[idx].agent.as_mut() {
            agent.sensors = observation.sensors;
        }

        let from = self.entities[idx].pos;
        let attacks = match self.params.movement {
            MovementModel::Grid => self.step_grid(id, idx, action),
            MovementModel::Continuous => self.step_steering(id, idx, action),
        };
        let to = self.entity(id).map_or(from, |agent| agent.pos);

        ActOutcome::Acted {
            action,
            from,
            to,
            attacks,
        }
    }

    /// Moves one cell, or attacks whatever attackable entity holds the
    /// destination cell instead of moving.
    fn step_grid(&mut self, id: EntityId, idx: usize, action: usize) -> Vec<AttackOutcome> {
        let from = self.entities[idx].pos;
        let dest = self.wrap_position(from, Direction::from_action(action).delta());

        let victim = self
            .entities
            .iter()
            .find(|e| e.pos == dest && e.id != id && e.can_be_attacked(&self.params))
            .map(|e| e.id);

        match victim {
            Some(victim) => resolve_attack(self, id, victim).into_iter().collect(),
            None => {
                self.move_entity(idx, dest);
                Vec::new()
            }
        }
    }

    /// Turns, moves along the new heading, bleeds speed to friction, then
    /// attacks every attackable body it overlaps.
    fn step_steering(&mut self, id: EntityId, idx: usize, action: usize) -> Vec<AttackOutcome> {
        let Some(Motion::Steering { orientation, speed }) =
            self.entities[idx].agent.as_ref().map(|agent| agent.motion)
        else {
            return Vec::new();
        };

        let turn = action.min(2) as f32 - 1.0;
        let orientation = orientation + self.params.turn_step * turn;
        let dest = self.wrap_heading(self.entities[idx].pos, orientation, speed);
        let speed = (speed * (1.0 - self.params.friction)).max(0.0);

        if let Some(agent) = self.entities[idx].agent.as_mut() {
            agent.motion = Motion::Steering { orientation, speed };
        }
        self.move_entity(idx, dest);

        let body = self.entities[idx].rect(&self.params);
        let victims: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| {
                e.id != id
                    && e.can_be_attacked(&self.params)
                    && rects_overlap(&body, &e.rect(&self.params))
            })
            .map(|e| e.id)
            .collect();

        let mut attacks = Vec::with_capacity(victims.len());
        for victim in victims {
            let Some(outcome) = resolve_attack(self, id, victim) else {
                continue;
            };
            let attacker_killed = outcome.attacker_killed;
            attacks.push(outcome);
            if attacker_killed {
                break;
            }
        }
        attacks
    }

    fn move_entity(&mut self, idx: usize, dest: Position) {
        self.entities[idx].pos = dest;
        if self.entities[idx].can_be_attacked(&self.params) {
            self.invalidate_index();
        }
    }
}
