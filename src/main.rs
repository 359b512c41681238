use clap::Parser;

use grid_pathfinder::config::Config;
use grid_pathfinder::simulation::Simulation;

fn main() {
    env_logger::init();
    let config = Config::parse();

    if !config.quiet {
        println!("Starting pathfinding simulation...");
        println!("Grid size: {}x{}", config.grid_size, config.grid_size);
        println!(
            "Wall density: {}, Obstacle probability: {}",
            config.wall_density, config.obstacle_probability
        );
        println!("Algorithm: {}", config.algorithm);
        if config.no_visualization {
            println!("Visualization disabled - running in fast mode");
        } else {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
            println!("Press Ctrl+C to stop the simulation");
        }
        println!();
    }

    if config.algorithm == "all" {
        match Simulation::run_all_algorithms(&config) {
            Ok((seed, rows)) => {
                let optimal = Simulation::comparison_optimal(&config, seed);
                Simulation::print_comparison_results(&rows, optimal);
            }
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match Simulation::new(config) {
        Ok(mut simulation) => {
            let stats = simulation.run();
            println!("\n=== FINAL RESULTS ===");
            println!("{}", stats);
        }
        Err(e) => {
            eprintln!("Failed to create simulation: {}", e);
            std::process::exit(1);
        }
    }
}
