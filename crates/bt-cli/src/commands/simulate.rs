use std::path::Path;

use bt_simulation::{SimEventKind, Simulation, StepCount};
use colored::Colorize;

use super::SpawnSpec;
use crate::panel;

pub fn run(
    templates: &Path,
    spawn: &[SpawnSpec],
    ticks: StepCount,
    environment: Option<&Path>,
    json: bool,
    verbose: bool,
) -> Result<(), String> {
    let mut sim = super::build_simulation(templates, spawn, environment)?;
    sim.advance(ticks.get());
    let snapshot = sim.snapshot();

    if json {
        let out = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("failed to serialize state: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({} ticks, {} templates, {} plants)",
            ticks,
            sim.catalog().len(),
            sim.plants().len()
        )
        .dimmed()
    );
    println!();

    if verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().events() {
            let tick_label = format!("[tick {:>3}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    } else {
        let deaths = death_notices(&sim);
        if !deaths.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for notice in &deaths {
                println!("  {}  {}", "DEATH".red().bold(), notice);
            }
            println!();
        }
    }

    panel::print_panels(&snapshot);
    Ok(())
}

/// One line per dead plant, read from the population rather than the
/// bounded event log so no death is ever missing.
fn death_notices(sim: &Simulation) -> Vec<String> {
    sim.plants()
        .iter()
        .filter(|p| !p.alive)
        .map(|p| format!("{} {} died at age {}", p.kind, p.id, p.age))
        .collect()
}

fn colorize_event(kind: &SimEventKind, desc: &str) -> String {
    match kind {
        SimEventKind::PlantSpawned { .. } => desc.green().to_string(),
        SimEventKind::PlantWithered { .. } => desc.yellow().to_string(),
        SimEventKind::PlantRecovered { .. } => desc.cyan().to_string(),
        SimEventKind::PlantDied { .. } => desc.red().bold().to_string(),
    }
}
