//! Cell Colony - Entry Point
//!
//! Runs a colony on a background worker and prints one status line per
//! generation.

use std::path::PathBuf;
use std::time::Duration;

use cell_colony::core::config::SimulationConfig;
use cell_colony::core::error::Result;
use cell_colony::entity::cell::Species;
use cell_colony::simulation::{FieldSnapshot, LongRun, Simulator};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Cell colony simulator
#[derive(Parser, Debug)]
#[command(name = "cell-colony")]
#[command(about = "Simulate a grid colony of cells with disease, symbiosis and weather")]
struct Args {
    /// Fill the field with a single species; mixed population when omitted
    #[arg(long)]
    species: Option<String>,

    /// Generations to run (defaults to runner.long_run_generations)
    #[arg(long)]
    generations: Option<u64>,

    /// Pause between generations in milliseconds (defaults to runner.delay_ms)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Field rows (defaults to grid.depth)
    #[arg(long)]
    depth: Option<usize>,

    /// Field columns (defaults to grid.width)
    #[arg(long)]
    width: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final snapshot as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cell_colony=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let depth = args.depth.unwrap_or(config.grid.depth);
    let width = args.width.unwrap_or(config.grid.width);
    let generations = args.generations.unwrap_or(config.runner.long_run_generations);
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.runner.delay_ms));

    let mut simulator = Simulator::new(depth, width, config)?;
    match &args.species {
        Some(name) => simulator.initialize_with_selected_cell_type(name),
        None => simulator.populate(),
    }

    println!("\n=== CELL COLONY ===");
    println!(
        "{}x{} field, {} generations, {} cells tracked",
        depth,
        width,
        generations,
        simulator.tracked_cells().len()
    );
    println!();

    let (handle, snapshots) = LongRun::spawn(simulator, generations, delay);
    let mut last: Option<FieldSnapshot> = None;
    for snapshot in snapshots.iter() {
        println!("{}", status_line(&snapshot));
        last = Some(snapshot);
    }

    let (simulator, end) = match handle.join() {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Simulation worker panicked");
            return Ok(());
        }
    };
    tracing::info!("Run ended: {:?}", end);
    print_population(&simulator);

    if let (Some(path), Some(snapshot)) = (&args.json, &last) {
        std::fs::write(path, snapshot.to_json()?)?;
        tracing::info!("Final snapshot written to {}", path.display());
    }

    Ok(())
}

fn status_line(snapshot: &FieldSnapshot) -> String {
    let population: Vec<String> = Species::ALL
        .iter()
        .map(|species| {
            let count = snapshot.population.get(species).copied().unwrap_or(0);
            format!("{}={}", short_name(*species), count)
        })
        .collect();
    format!(
        "Gen {:>6} | {:<4} | {} | diseased {:>4} | {}",
        snapshot.generation,
        snapshot.temperature,
        snapshot.elapsed_time,
        snapshot.diseased_alive,
        population.join(" ")
    )
}

fn short_name(species: Species) -> &'static str {
    match species {
        Species::Mycoplasma => "myco",
        Species::MyFungiChangeColor => "fungi",
        Species::MyEvolvingCellChangeBehaviors => "evolving",
        Species::NonDeterministicCells => "nondet",
    }
}

fn print_population<R: rand::Rng>(simulator: &Simulator<R>) {
    let counts = simulator.field().population_counts();
    println!();
    println!("Population after {} generations:", simulator.generation());
    for species in Species::ALL {
        println!("  {:<32} {}", species.name(), counts.get(&species).copied().unwrap_or(0));
    }
}
