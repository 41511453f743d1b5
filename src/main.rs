use std::sync::Arc;

use creatures::simulation::brain::Brain;
use creatures::simulation::evaluation::slot_fitness;
use creatures::{AgentSpec, Params, SharedFitness, World, WorldError};
use tracing::info;

const POPULATION: usize = 20;
const TICKS: u64 = 200;

fn main() -> Result<(), WorldError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let params = Params::grid();

    let layer_sizes = vec![
        params.observation_size(), // input size
        10,                        // hidden layer size
        4,                         // output size (one score per direction)
    ];

    let sinks: Vec<SharedFitness> = (0..POPULATION).map(|_| SharedFitness::new()).collect();
    let population: Vec<AgentSpec> = sinks
        .iter()
        .enumerate()
        .map(|(i, sink)| {
            let brain = Brain::seeded(&layer_sizes, 1.0, params.seed + i as u64);
            AgentSpec::new(Arc::new(brain)).with_fitness_sink(Arc::new(sink.clone()))
        })
        .collect();

    info!(
        agents = POPULATION,
        resources = params.n_resources,
        width = params.width,
        height = params.height,
        "starting headless simulation"
    );

    let mut world = World::new(population, params)?;
    let summary = world.run(TICKS);

    info!(
        ticks = summary.ticks,
        survivors = summary.survivors,
        attacks = summary.totals.attacks,
        kills = summary.totals.kills,
        "simulation finished"
    );

    for (slot, fitness) in slot_fitness(&world, POPULATION).iter().enumerate() {
        info!(slot, fitness, reported = sinks[slot].get(), "agent fitness");
    }

    Ok(())
}
