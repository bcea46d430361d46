use bt_core::Environment;

/// Configuration for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// The environment every run (and every reset) starts from.
    pub environment: Environment,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl SimConfig {
    /// Set the starting environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_core::ResourceLedger;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.max_events, 0);
        assert_eq!(config.environment, Environment::default());
    }

    #[test]
    fn config_builder_chain() {
        let env = Environment::new(ResourceLedger::new());
        let config = SimConfig::default()
            .with_environment(env.clone())
            .with_max_events(500);
        assert_eq!(config.max_events, 500);
        assert_eq!(config.environment, env);
    }
}
