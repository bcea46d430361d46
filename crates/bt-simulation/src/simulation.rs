use bt_core::{Environment, Plant, PlantId, PlantTemplate, TemplateCatalog};
use tracing::{debug, info, warn};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::metabolism::metabolize;
use crate::snapshot::{PlantSnapshot, SimSnapshot};

/// The top-level simulation orchestrator.
///
/// Owns the environment, the plant population, the clock, and the event
/// log. [`Simulation::advance`] is the only operation that mutates the
/// environment or existing plants.
pub struct Simulation {
    config: SimConfig,
    catalog: TemplateCatalog,
    environment: Environment,
    plants: Vec<Plant>,
    clock: SimClock,
    events: EventLog,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("plants", &self.plants.len())
            .field("templates", &self.catalog.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation at tick 0 with the config's starting environment
    /// and an empty population.
    pub fn new(config: SimConfig, catalog: TemplateCatalog) -> Self {
        let environment = config.environment.clone();
        let events = EventLog::new(config.max_events);
        Self {
            config,
            catalog,
            environment,
            plants: Vec::new(),
            clock: SimClock::new(),
            events,
        }
    }

    /// Return to the starting state: seed environment, no plants, tick 0,
    /// empty event log. The template catalog is kept.
    pub fn reset(&mut self) {
        self.environment = self.config.environment.clone();
        self.plants.clear();
        self.clock.reset();
        self.events.clear();
        debug!("simulation reset");
    }

    /// Replace the template catalog. Existing plants are unaffected.
    pub fn set_catalog(&mut self, catalog: TemplateCatalog) {
        self.catalog = catalog;
    }

    /// Spawn a plant from the catalog template named `kind`.
    ///
    /// An unknown `kind` is logged and returned as
    /// [`SimError::TemplateNotFound`]; the population is left unchanged.
    pub fn spawn(&mut self, kind: &str) -> SimResult<PlantId> {
        let Some(template) = self.catalog.get(kind).cloned() else {
            warn!(kind, "template not found; nothing spawned");
            return Err(SimError::TemplateNotFound(kind.to_owned()));
        };
        Ok(self.spawn_template(&template))
    }

    /// Spawn a plant directly from a template.
    pub fn spawn_template(&mut self, template: &PlantTemplate) -> PlantId {
        let id = PlantId(self.plants.len());
        self.plants.push(template.spawn(id));
        self.events.push(SimEvent::new(
            self.clock.tick(),
            SimEventKind::PlantSpawned {
                plant: id,
                kind: template.kind.clone(),
            },
            format!("{} {} sprouted", template.kind, id),
        ));
        debug!(%id, kind = %template.kind, "plant spawned");
        id
    }

    /// Advance the simulation by `steps` ticks. Returns the new tick.
    ///
    /// Within a tick, plants are processed in population order against the
    /// live environment, so later plants see what earlier ones consumed and
    /// produced that same tick. Zero steps is a no-op.
    pub fn advance(&mut self, steps: u64) -> u64 {
        for _ in 0..steps {
            self.tick();
        }
        self.clock.tick()
    }

    fn tick(&mut self) {
        let tick = self.clock.tick() + 1;
        for plant in &mut self.plants {
            let Some(outcome) = metabolize(plant, &mut self.environment.resources) else {
                continue;
            };

            if outcome.was_healthy && !outcome.healthy {
                self.events.push(SimEvent::new(
                    tick,
                    SimEventKind::PlantWithered { plant: plant.id },
                    format!("{} {} could not meet its needs", plant.kind, plant.id),
                ));
            } else if !outcome.was_healthy && outcome.healthy {
                self.events.push(SimEvent::new(
                    tick,
                    SimEventKind::PlantRecovered { plant: plant.id },
                    format!("{} {} recovered", plant.kind, plant.id),
                ));
            }

            if outcome.died {
                info!(id = %plant.id, kind = %plant.kind, age = plant.age, tick, "plant died");
                self.events.push(SimEvent::new(
                    tick,
                    SimEventKind::PlantDied {
                        plant: plant.id,
                        age: plant.age,
                    },
                    format!("{} {} died at age {}", plant.kind, plant.id, plant.age),
                ));
            }
        }
        self.clock.advance();
        debug!(tick, living = self.living_count(), "tick complete");
    }

    /// Capture the current state for a renderer.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick: self.clock.tick(),
            resources: self.environment.resources.clone(),
            light: self.environment.light.clone(),
            plants: self.plants.iter().map(PlantSnapshot::from).collect(),
        }
    }

    /// The live environment.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Every plant spawned so far, dead ones included.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Look up a plant by id.
    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(id.0)
    }

    /// Number of plants still alive.
    pub fn living_count(&self) -> usize {
        self.plants.iter().filter(|p| p.alive).count()
    }

    /// The loaded templates.
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// The run configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The tick clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_core::RateTable;

    fn fern() -> PlantTemplate {
        PlantTemplate::new("fern", 100.0, 2.0)
            .with_input(
                RateTable::new()
                    .with("substrate", "water", 1.0)
                    .with("substrate", "nutrient", 1.0)
                    .with("atmosphere", "co2", 1.0),
            )
            .with_output(
                RateTable::new()
                    .with("substrate", "waste", 1.0)
                    .with("atmosphere", "o2", 1.0)
                    .with("atmosphere", "water", 1.0),
            )
    }

    fn catalog() -> TemplateCatalog {
        let moss = PlantTemplate::new("moss", 5.0, 1.0);
        TemplateCatalog::from_templates(vec![fern(), moss]).unwrap()
    }

    fn sim() -> Simulation {
        Simulation::new(SimConfig::default(), catalog())
    }

    fn sim_with_fern_at(health: f64, water: f64) -> Simulation {
        let mut env = Environment::default();
        env.resources.set("substrate", "water", water);
        let mut sim = Simulation::new(
            SimConfig::default().with_environment(env),
            TemplateCatalog::new(),
        );
        sim.spawn_template(&fern());
        sim.plants[0].health = health;
        sim
    }

    #[test]
    fn spawn_known_template() {
        let mut sim = sim();
        let id = sim.spawn("fern").unwrap();
        assert_eq!(id, PlantId(0));
        let plant = sim.plant(id).unwrap();
        assert_eq!(plant.health, 100.0);
        assert_eq!(plant.age, 0);
        assert!(plant.alive);
        assert_eq!(sim.events().len(), 1);
    }

    #[test]
    fn spawn_unknown_template_is_rejected() {
        let mut sim = sim();
        let err = sim.spawn("cactus").unwrap_err();
        assert!(matches!(err, SimError::TemplateNotFound(ref k) if k == "cactus"));
        assert!(sim.plants().is_empty());
        assert_eq!(sim.environment(), &Environment::default());
    }

    #[test]
    fn healthy_scenario_after_one_tick() {
        let mut sim = sim_with_fern_at(10.0, 500.0);
        assert_eq!(sim.advance(1), 1);

        let res = &sim.environment().resources;
        assert_eq!(res.get("substrate", "water"), 490.0);
        assert_eq!(res.get("atmosphere", "water"), 10.0);
        assert_eq!(res.get("substrate", "nutrient"), 490.0);
        assert_eq!(res.get("atmosphere", "co2"), 490.0);
        assert_eq!(res.get("substrate", "waste"), 10.0);
        assert_eq!(res.get("atmosphere", "o2"), 10.0);

        let plant = &sim.plants()[0];
        assert_eq!(plant.health, 12.0);
        assert_eq!(plant.age, 1);
        assert!(plant.alive);
    }

    #[test]
    fn insufficient_water_scenario() {
        let mut sim = sim_with_fern_at(10.0, 5.0);
        sim.advance(1);

        let plant = &sim.plants()[0];
        assert!(!plant.healthy);
        assert_eq!(plant.health, 9.0);
        assert_eq!(plant.age, 1);
        assert_eq!(sim.environment().resources.get("substrate", "water"), 5.0);
        assert_eq!(
            sim.events().events().last().unwrap().kind,
            SimEventKind::PlantWithered { plant: PlantId(0) }
        );
    }

    #[test]
    fn recovery_is_logged() {
        let mut sim = sim_with_fern_at(10.0, 5.0);
        sim.advance(1);
        sim.environment.resources.set("substrate", "water", 500.0);
        sim.advance(1);
        assert!(sim.plants()[0].healthy);
        assert!(
            sim.events()
                .events_at_tick(2)
                .iter()
                .any(|e| e.kind == SimEventKind::PlantRecovered { plant: PlantId(0) })
        );
    }

    #[test]
    fn dead_plant_is_skipped() {
        let starving = PlantTemplate::new("sprout", 1.0, 1.0)
            .with_input(RateTable::new().with("substrate", "sunlight", 1.0));
        let mut sim = Simulation::new(SimConfig::default(), TemplateCatalog::new());
        let id = sim.spawn_template(&starving);

        sim.advance(1);
        let plant = sim.plant(id).unwrap().clone();
        assert_eq!(plant.health, 0.0);
        assert!(!plant.alive);

        let env = sim.environment().clone();
        sim.advance(3);
        assert_eq!(sim.plant(id).unwrap(), &plant);
        assert_eq!(sim.environment(), &env);
        assert_eq!(sim.current_tick(), 4);
        assert_eq!(sim.living_count(), 0);
    }

    #[test]
    fn later_plants_see_earlier_consumption() {
        // 15 water: the first plant takes 10, leaving 5 for the second.
        let thirsty = PlantTemplate::new("reed", 10.0, 1.0)
            .with_input(RateTable::new().with("substrate", "water", 1.0));
        let env = Environment::new([("substrate", "water", 15.0)].into_iter().collect());
        let mut sim = Simulation::new(
            SimConfig::default().with_environment(env),
            TemplateCatalog::new(),
        );
        let first = sim.spawn_template(&thirsty);
        let second = sim.spawn_template(&thirsty);

        sim.advance(1);

        assert!(sim.plant(first).unwrap().healthy);
        assert!(!sim.plant(second).unwrap().healthy);
        assert_eq!(sim.environment().resources.get("substrate", "water"), 5.0);
    }

    #[test]
    fn zero_steps_is_noop() {
        let mut sim = sim();
        sim.spawn("fern").unwrap();
        let before = sim.snapshot();
        assert_eq!(sim.advance(0), 0);
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn empty_population_still_ticks() {
        let mut sim = sim();
        sim.advance(100);
        assert_eq!(sim.current_tick(), 100);
        assert_eq!(sim.environment(), &Environment::default());
    }

    #[test]
    fn advance_n_matches_repeated_single_steps() {
        let build = || {
            let mut sim = sim();
            sim.spawn("fern").unwrap();
            sim.spawn("moss").unwrap();
            sim.spawn("fern").unwrap();
            sim
        };

        let mut batch = build();
        batch.advance(40);

        let mut stepped = build();
        for _ in 0..40 {
            stepped.advance(1);
        }

        assert_eq!(batch.snapshot(), stepped.snapshot());
        assert_eq!(batch.snapshot(), {
            let mut again = build();
            again.advance(40);
            again.snapshot()
        });
    }

    #[test]
    fn reset_restores_seed() {
        let mut sim = sim();
        sim.spawn("fern").unwrap();
        sim.advance(5);
        sim.reset();
        assert_eq!(sim.current_tick(), 0);
        assert!(sim.plants().is_empty());
        assert!(sim.events().is_empty());
        assert_eq!(sim.environment(), &Environment::default());
        assert_eq!(sim.catalog().len(), 2);
    }

    #[test]
    fn late_catalog_enables_spawning() {
        let mut sim = Simulation::new(SimConfig::default(), TemplateCatalog::new());
        assert!(sim.spawn("fern").is_err());
        sim.advance(2);
        sim.set_catalog(catalog());
        assert!(sim.spawn("fern").is_ok());
    }

    #[test]
    fn death_event_recorded() {
        let starving = PlantTemplate::new("sprout", 2.0, 1.0)
            .with_input(RateTable::new().with("atmosphere", "n2", 1.0));
        let mut sim = Simulation::new(SimConfig::default(), TemplateCatalog::new());
        sim.spawn_template(&starving);
        sim.advance(5);
        let deaths: Vec<_> = sim
            .events()
            .events()
            .iter()
            .filter(|e| matches!(e.kind, SimEventKind::PlantDied { .. }))
            .collect();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].tick, 2);
    }

    #[test]
    fn snapshot_excludes_internals() {
        let mut sim = sim();
        sim.spawn("moss").unwrap();
        let json = serde_json::to_value(sim.snapshot()).unwrap();
        let plant = &json["plants"][0];
        assert_eq!(plant["type"], "moss");
        assert_eq!(plant["age"], 0);
        assert!(plant.get("max_health").is_none());
        assert!(plant.get("input").is_none());
        assert_eq!(json["resources"]["substrate"]["water"], 500.0);
    }

    #[test]
    fn ledger_seed_is_independent_per_run() {
        let mut sim = sim();
        sim.spawn("fern").unwrap();
        sim.advance(1);
        assert_ne!(
            sim.environment().resources,
            sim.config().environment.resources
        );
        assert_eq!(sim.config().environment, Environment::default());
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        const KEYS: [(&str, &str); 4] = [
            ("substrate", "water"),
            ("substrate", "nutrient"),
            ("atmosphere", "co2"),
            ("atmosphere", "o2"),
        ];

        fn rate_table() -> impl Strategy<Value = RateTable> {
            proptest::collection::vec((0..KEYS.len(), 0.0f64..3.0), 0..4).prop_map(|rates| {
                rates.into_iter().fold(RateTable::new(), |table, (i, rate)| {
                    table.with(KEYS[i].0, KEYS[i].1, rate)
                })
            })
        }

        fn template() -> impl Strategy<Value = PlantTemplate> {
            (1.0f64..50.0, 0.0f64..5.0, rate_table(), rate_table()).prop_map(
                |(max_health, healing_rate, input, output)| {
                    PlantTemplate::new("prop", max_health, healing_rate)
                        .with_input(input)
                        .with_output(output)
                },
            )
        }

        fn environment() -> impl Strategy<Value = Environment> {
            proptest::collection::vec(0.0f64..200.0, KEYS.len()).prop_map(|qty| {
                Environment::new(
                    KEYS.iter()
                        .zip(qty)
                        .map(|(&(c, k), q)| (c, k, q))
                        .collect(),
                )
            })
        }

        proptest! {
            #[test]
            fn health_stays_in_bounds_and_death_is_final(
                templates in proptest::collection::vec(template(), 1..6),
                env in environment(),
                ticks in 1u64..60,
            ) {
                let mut sim = Simulation::new(
                    SimConfig::default().with_environment(env),
                    TemplateCatalog::new(),
                );
                for t in &templates {
                    sim.spawn_template(t);
                }

                let mut dead = vec![false; templates.len()];
                for _ in 0..ticks {
                    sim.advance(1);
                    for (i, plant) in sim.plants().iter().enumerate() {
                        prop_assert!(plant.health >= 0.0);
                        prop_assert!(plant.health <= plant.max_health);
                        prop_assert!(!(dead[i] && plant.alive));
                        dead[i] = !plant.alive;
                    }
                }
            }

            #[test]
            fn empty_input_converges_to_max(
                max_health in 1.0f64..100.0,
                start_fraction in 0.01f64..1.0,
                healing_rate in 0.1f64..10.0,
            ) {
                let template = PlantTemplate::new("moss", max_health, healing_rate);
                let mut sim = Simulation::new(SimConfig::default(), TemplateCatalog::new());
                let id = sim.spawn_template(&template);
                let initial = max_health * start_fraction;
                sim.plants[id.0].health = initial;

                let bound = ((max_health - initial) / healing_rate).ceil() as u64;
                sim.advance(bound);

                let plant = sim.plant(id).unwrap();
                prop_assert!(plant.healthy);
                prop_assert!((plant.health - max_health).abs() < 1e-9);
                prop_assert!(sim.environment().resources == Environment::default().resources);
            }

            #[test]
            fn unreferenced_keys_unaffected(
                plant_template in template(),
                seed in environment(),
                ticks in 1u64..20,
            ) {
                let mut env = seed;
                env.resources.set("substrate", "salt", 7.0);
                let start = env.resources.clone();
                let mut sim = Simulation::new(
                    SimConfig::default().with_environment(env),
                    TemplateCatalog::new(),
                );
                let id = sim.spawn_template(&plant_template);
                sim.advance(ticks);

                let plant = sim.plant(id).unwrap();
                for (category, key, qty) in start.iter() {
                    if !plant.references(category, key) {
                        prop_assert_eq!(sim.environment().resources.get(category, key), qty);
                    }
                }
                prop_assert_eq!(sim.environment().resources.get("substrate", "salt"), 7.0);
            }
        }
    }
}
