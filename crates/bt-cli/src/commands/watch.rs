use std::path::Path;
use std::time::Duration;

use bt_simulation::StepCount;
use colored::Colorize;
use tokio::time::MissedTickBehavior;

use super::SpawnSpec;
use crate::panel;

/// Drive the simulation one tick per interval, redrawing after each tick.
///
/// Runs on a current-thread runtime: a tick always finishes before the next
/// timer fire is handled, and late fires are delayed rather than bunched.
pub fn run(
    templates: &Path,
    spawn: &[SpawnSpec],
    ticks: Option<StepCount>,
    environment: Option<&Path>,
    interval_ms: u64,
) -> Result<(), String> {
    let mut sim = super::build_simulation(templates, spawn, environment)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start timer: {e}"))?;

    panel::print_panels(&sim.snapshot());

    runtime.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            if ticks.is_some_and(|limit| sim.current_tick() >= limit.get()) {
                break;
            }
            tokio::select! {
                _ = interval.tick() => {
                    sim.advance(1);
                    println!("{}", "─".repeat(40).dimmed());
                    panel::print_panels(&sim.snapshot());
                }
                _ = &mut ctrl_c => {
                    println!("  {}", "interrupted".dimmed());
                    break;
                }
            }
        }
    });

    Ok(())
}
