//! Population-to-fitness evaluation for external trainers.
//!
//! A fresh world is built for every evaluation; worlds are never reused
//! across generations. Independent trials run in parallel, one world per
//! thread, while each world still ticks sequentially.

use rayon::prelude::*;
use tracing::info;

use super::error::WorldError;
use super::params::Params;
use super::policy::AgentSpec;
use super::world::World;

/// Fitness of every population slot in `world`.
///
/// Agents no longer on the plane score 0.
pub fn slot_fitness(world: &World, population_size: usize) -> Vec<i64> {
    let mut fitness = vec![0; population_size];
    for agent in world.agents() {
        if let Some(state) = &agent.agent {
            if let Some(slot) = fitness.get_mut(state.slot) {
                *slot = agent.fitness(world.generation());
            }
        }
    }
    fitness
}

/// Runs one world for `ticks` ticks and returns fitness per population slot.
pub fn evaluate(
    population: &[AgentSpec],
    params: &Params,
    ticks: u64,
) -> Result<Vec<i64>, WorldError> {
    let mut world = World::new(population.to_vec(), params.clone())?;
    let summary = world.run(ticks);
    let fitness = slot_fitness(&world, population.len());

    info!(
        seed = params.seed,
        ticks = summary.ticks,
        survivors = summary.survivors,
        kills = summary.totals.kills,
        best = fitness.iter().copied().max().unwrap_or(0),
        "evaluation finished"
    );

    Ok(fitness)
}

/// Runs one world per seed in parallel and averages fitness per slot.
///
/// Fitness sinks attached to the population receive updates from every
/// trial, in no particular order.
pub fn evaluate_trials(
    population: &[AgentSpec],
    params: &Params,
    ticks: u64,
    seeds: &[u64],
) -> Result<Vec<f32>, WorldError> {
    if seeds.is_empty() {
        return Ok(vec![0.0; population.len()]);
    }

    let trials = seeds
        .par_iter()
        .map(|&seed| {
            let params = Params {
                seed,
                ..params.clone()
            };
            evaluate(population, &params, ticks)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut mean = vec![0.0f32; population.len()];
    for trial in &trials {
        for (total, fitness) in mean.iter_mut().zip(trial) {
            *total += *fitness as f32;
        }
    }
    let n = trials.len() as f32;
    mean.iter_mut().for_each(|total| *total /= n);
    Ok(mean)
}
