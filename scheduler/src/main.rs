use clap::Parser;
use mlq_scheduler::{
    config::{Config, Policy},
    scheduler::{CreationOrderScheduler, PriorityScheduler, ProcessRunner, Scheduler, Simulation},
    tracer,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    tracer::init_tracing(&config)?;

    match config.policy {
        Policy::CreationOrder => run(CreationOrderScheduler::new(), &config),
        Policy::Priority => run(PriorityScheduler::new(), &config),
    }
}

fn run<S: Scheduler>(scheduler: S, config: &Config) -> anyhow::Result<()> {
    let mut simulation = Simulation::with_interval(scheduler, config.tick_interval());
    for spec in &config.spawn {
        simulation.create_from_spec(*spec)?;
    }

    if config.headless {
        for _ in 0..config.ticks {
            simulation.tick();
        }
        let snapshot = simulation.shutdown();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let mut runner = ProcessRunner::new(simulation)?;
    while runner.run()? {}

    let snapshot = runner.into_simulation().shutdown();
    info!(
        finished = snapshot.stats.finished,
        average_wait = snapshot.stats.average_wait,
        "Session ended"
    );
    Ok(())
}
