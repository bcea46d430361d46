use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::plant::{Conditions, Plant, PlantId, RateTable};

/// The static description of a plant species, as read from a template file.
///
/// Numeric fields must be JSON numbers; strings in numeric slots are
/// rejected by the parser rather than coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantTemplate {
    /// Species identifier used to spawn this template.
    #[serde(rename = "type")]
    pub kind: String,
    /// Health cap and starting health.
    #[serde(alias = "maxHealth", alias = "_maxhealth")]
    pub max_health: f64,
    /// Health gained per healthy tick.
    #[serde(alias = "healingRate", alias = "_healingrate")]
    pub healing_rate: f64,
    /// Consumption per unit of health.
    #[serde(default)]
    pub input: RateTable,
    /// Production per unit of health.
    #[serde(default)]
    pub output: RateTable,
    /// Advisory environmental preferences.
    #[serde(default)]
    pub conditions: Conditions,
}

impl PlantTemplate {
    /// A template with no inputs or outputs.
    pub fn new(kind: impl Into<String>, max_health: f64, healing_rate: f64) -> Self {
        Self {
            kind: kind.into(),
            max_health,
            healing_rate,
            input: RateTable::new(),
            output: RateTable::new(),
            conditions: Conditions::default(),
        }
    }

    /// Set the input table.
    pub fn with_input(mut self, input: RateTable) -> Self {
        self.input = input;
        self
    }

    /// Set the output table.
    pub fn with_output(mut self, output: RateTable) -> Self {
        self.output = output;
        self
    }

    /// Check the numeric invariants a plant relies on.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: String| CoreError::InvalidTemplate {
            kind: self.kind.clone(),
            reason,
        };

        if self.kind.trim().is_empty() {
            return Err(invalid("type must not be empty".into()));
        }
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(invalid(format!(
                "max_health must be a positive number, got {}",
                self.max_health
            )));
        }
        if !self.healing_rate.is_finite() || self.healing_rate < 0.0 {
            return Err(invalid(format!(
                "healing_rate must be a non-negative number, got {}",
                self.healing_rate
            )));
        }
        for (side, table) in [("input", &self.input), ("output", &self.output)] {
            if let Some((category, key, rate)) = table
                .iter()
                .find(|(_, _, r)| !r.is_finite() || *r < 0.0)
            {
                return Err(invalid(format!(
                    "{side} rate for {category}.{key} must be a non-negative number, got {rate}"
                )));
            }
        }
        if let Some((band, pref)) = self.conditions.light.first_out_of_range() {
            return Err(invalid(format!(
                "light preference {band} must be within [0, 1], got {pref}"
            )));
        }
        Ok(())
    }

    /// Instantiate a fresh plant: full health, age 0, alive.
    ///
    /// The plant owns clones of the template's tables, so later changes to
    /// one plant never reach another spawned from the same template.
    pub fn spawn(&self, id: PlantId) -> Plant {
        Plant {
            id,
            kind: self.kind.clone(),
            alive: true,
            age: 0,
            health: self.max_health,
            healthy: true,
            max_health: self.max_health,
            healing_rate: self.healing_rate,
            input: self.input.clone(),
            output: self.output.clone(),
            conditions: self.conditions.clone(),
        }
    }
}

/// Validated templates in file order, looked up by `type`.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<PlantTemplate>,
}

impl TemplateCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, validating every template and rejecting duplicate types.
    pub fn from_templates(templates: Vec<PlantTemplate>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for template in &templates {
            template.validate()?;
            if !seen.insert(template.kind.as_str()) {
                return Err(CoreError::DuplicateTemplate(template.kind.clone()));
            }
        }
        Ok(Self { templates })
    }

    /// Parse a JSON array of templates.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let templates: Vec<PlantTemplate> = serde_json::from_str(json)?;
        Self::from_templates(templates)
    }

    /// Read and parse a template file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Find a template by its `type`.
    pub fn get(&self, kind: &str) -> Option<&PlantTemplate> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    /// All templates in load order.
    pub fn templates(&self) -> &[PlantTemplate] {
        &self.templates
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FERN: &str = r#"[{
        "type": "fern",
        "_maxhealth": 100,
        "_healingrate": 2,
        "input": {"substrate": {"water": 1, "nutrient": 1}, "atmosphere": {"co2": 1}},
        "output": {"substrate": {"waste": 1}, "atmosphere": {"o2": 1, "water": 1}},
        "conditions": {"light": {"red": 0.8, "blue": 0.6}}
    }]"#;

    #[test]
    fn parses_underscore_field_names() {
        let catalog = TemplateCatalog::from_json_str(FERN).unwrap();
        let fern = catalog.get("fern").unwrap();
        assert_eq!(fern.max_health, 100.0);
        assert_eq!(fern.healing_rate, 2.0);
        assert_eq!(fern.input.get("atmosphere", "co2"), Some(1.0));
        assert_eq!(fern.output.get("atmosphere", "water"), Some(1.0));
        assert_eq!(fern.conditions.light.get("red"), Some(0.8));
    }

    #[test]
    fn parses_camel_case_and_defaults() {
        let catalog =
            TemplateCatalog::from_json_str(r#"[{"type": "moss", "maxHealth": 5, "healingRate": 0.5}]"#)
                .unwrap();
        let moss = catalog.get("moss").unwrap();
        assert!(moss.input.is_empty());
        assert!(moss.output.is_empty());
        assert!(moss.conditions.light.is_empty());
    }

    #[test]
    fn rejects_numeric_strings() {
        let err = TemplateCatalog::from_json_str(
            r#"[{"type": "moss", "max_health": "100", "healing_rate": 1}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn rejects_missing_max_health() {
        let err = TemplateCatalog::from_json_str(r#"[{"type": "moss", "healing_rate": 1}]"#)
            .unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn rejects_non_positive_max_health() {
        let err = TemplateCatalog::from_templates(vec![PlantTemplate::new("moss", 0.0, 1.0)])
            .unwrap_err();
        assert!(err.to_string().contains("max_health"));
    }

    #[test]
    fn rejects_negative_rate() {
        let template = PlantTemplate::new("moss", 10.0, 1.0)
            .with_input(RateTable::new().with("substrate", "water", -1.0));
        let err = TemplateCatalog::from_templates(vec![template]).unwrap_err();
        assert!(err.to_string().contains("substrate.water"));
    }

    #[test]
    fn rejects_duplicate_types() {
        let err = TemplateCatalog::from_templates(vec![
            PlantTemplate::new("moss", 10.0, 1.0),
            PlantTemplate::new("moss", 20.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateTemplate(ref k) if k == "moss"));
    }

    #[test]
    fn spawn_starts_at_full_health() {
        let template = PlantTemplate::new("moss", 7.0, 1.0);
        let plant = template.spawn(PlantId(2));
        assert_eq!(plant.id, PlantId(2));
        assert_eq!(plant.kind, "moss");
        assert_eq!(plant.health, 7.0);
        assert_eq!(plant.age, 0);
        assert!(plant.alive);
    }

    #[test]
    fn spawned_plants_do_not_share_tables() {
        let template = PlantTemplate::new("moss", 7.0, 1.0)
            .with_input(RateTable::new().with("substrate", "water", 1.0));
        let mut a = template.spawn(PlantId(0));
        let b = template.spawn(PlantId(1));
        a.input = a.input.with("substrate", "water", 9.0);
        assert_eq!(b.input.get("substrate", "water"), Some(1.0));
        assert_eq!(template.input.get("substrate", "water"), Some(1.0));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plants.json");
        std::fs::write(&path, FERN).unwrap();
        let catalog = TemplateCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
