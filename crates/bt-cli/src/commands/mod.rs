pub mod simulate;
pub mod templates;
pub mod watch;

use std::path::Path;

use bt_core::{Environment, TemplateCatalog};
use bt_simulation::{SimConfig, SimError, Simulation};

/// Most recent events kept per run; older ones are dropped first.
pub const EVENT_LOG_CAP: usize = 500;

/// A `--spawn` argument: a template type and how many to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSpec {
    pub kind: String,
    pub count: usize,
}

/// Parse `type` or `type:count`.
pub fn parse_spawn(s: &str) -> Result<SpawnSpec, String> {
    let (kind, count) = match s.rsplit_once(':') {
        Some((kind, count)) => {
            let count = count
                .parse::<usize>()
                .map_err(|_| format!("invalid spawn count in \"{s}\""))?;
            (kind, count)
        }
        None => (s, 1),
    };
    if kind.is_empty() {
        return Err(format!("missing plant type in \"{s}\""));
    }
    Ok(SpawnSpec {
        kind: kind.to_string(),
        count,
    })
}

fn load_catalog(path: &Path) -> Result<TemplateCatalog, String> {
    TemplateCatalog::from_path(path).map_err(|e| e.to_string())
}

fn load_environment(path: Option<&Path>) -> Result<Environment, String> {
    match path {
        Some(path) => Environment::from_path(path).map_err(|e| e.to_string()),
        None => Ok(Environment::default()),
    }
}

/// Load templates and environment, then spawn the requested plants in order.
///
/// Unknown plant types are skipped; the engine logs a warning for each.
fn build_simulation(
    templates: &Path,
    spawn: &[SpawnSpec],
    environment: Option<&Path>,
) -> Result<Simulation, String> {
    let catalog = load_catalog(templates)?;
    let config = SimConfig::default()
        .with_environment(load_environment(environment)?)
        .with_max_events(EVENT_LOG_CAP);

    let mut sim = Simulation::new(config, catalog);
    for spec in spawn {
        for _ in 0..spec.count {
            match sim.spawn(&spec.kind) {
                Ok(_) => {}
                Err(SimError::TemplateNotFound(_)) => break,
                Err(e) => return Err(e.to_string()),
            }
        }
    }
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spawn_plain_type() {
        assert_eq!(
            parse_spawn("fern").unwrap(),
            SpawnSpec {
                kind: "fern".into(),
                count: 1
            }
        );
    }

    #[test]
    fn parse_spawn_with_count() {
        assert_eq!(parse_spawn("fern:3").unwrap().count, 3);
    }

    #[test]
    fn event_log_is_capped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plants.json");
        std::fs::write(&path, r#"[{"type": "moss", "max_health": 5, "healing_rate": 1}]"#)
            .unwrap();
        let spawn = [SpawnSpec {
            kind: "moss".into(),
            count: EVENT_LOG_CAP + 10,
        }];

        let sim = build_simulation(&path, &spawn, None).unwrap();

        assert_eq!(sim.config().max_events, EVENT_LOG_CAP);
        assert_eq!(sim.plants().len(), EVENT_LOG_CAP + 10);
        assert_eq!(sim.events().len(), EVENT_LOG_CAP);
    }

    #[test]
    fn parse_spawn_rejects_bad_count() {
        assert!(parse_spawn("fern:-1").is_err());
        assert!(parse_spawn("fern:x").is_err());
        assert!(parse_spawn(":2").is_err());
    }
}
