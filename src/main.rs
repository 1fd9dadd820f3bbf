use clap::Parser;

use astar_visualizer::config::Config;
use astar_visualizer::render::TerminalRenderer;
use astar_visualizer::scenario::Scenario;
use astar_visualizer::statistics::{reference_path_cells, RunStatistics};
use astar_visualizer::SearchOutcome;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received stop signal");
        r.store(false, Ordering::SeqCst);
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    match run(&config, &running) {
        Ok(outcome) if outcome == SearchOutcome::Cancelled => std::process::exit(130),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(config: &Config, running: &AtomicBool) -> Result<SearchOutcome, Box<dyn std::error::Error>> {
    let scenario = Scenario::generate(config.grid_size, config.num_walls, config.seed)
        .with_endpoints(config.start, config.end)?;

    if !config.quiet {
        println!("Grid size: {}x{}", config.grid_size, config.grid_size);
        println!("Walls: {} | Seed: {}", scenario.walls.len(), scenario.seed);
        println!("Start: {:?} | End: {:?}", scenario.start, scenario.end);
        if config.no_visualization {
            println!("Visualization disabled - running in fast mode");
        } else {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
            println!("Press Ctrl+C to stop the search");
        }
        println!();
    }

    let mut session = scenario.build_session()?;
    let reference = reference_path_cells(session.grid(), scenario.start, scenario.end);
    let mut renderer = TerminalRenderer::new(config.delay_ms, !config.no_visualization);

    let started = Instant::now();
    let report = session.run(
        |grid| renderer.draw(grid),
        || !running.load(Ordering::SeqCst),
    )?;
    let elapsed = started.elapsed();

    log::info!(
        "search finished: {:?} after {} expansions in {:.2?}",
        report.outcome,
        report.expanded,
        elapsed
    );

    if !config.no_visualization {
        renderer.show(session.grid());
    }

    let stats = RunStatistics::new(
        &report,
        reference,
        config.grid_size,
        scenario.walls.len(),
        renderer.frames(),
        elapsed,
    );
    if !config.quiet {
        println!("\n=== FINAL RESULTS ===");
        println!("{}", stats);
    }
    if !stats.matches_reference() {
        log::warn!("search result disagrees with the reference search");
    }

    Ok(report.outcome)
}
