//! Terminal rendering of the environment and plant panels.

use bt_simulation::SimSnapshot;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

/// Format a quantity without trailing noise: whole numbers print bare.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the resource ledger, one row per resource, grouped by category.
/// The category name appears only on the first row of its group.
pub fn environment_table(snapshot: &SimSnapshot) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Resource", "Quantity"]);
    for category in snapshot.resources.categories() {
        let Some(slots) = snapshot.resources.category(category) else {
            continue;
        };
        let mut label = capitalize(category);
        for (key, qty) in slots {
            table.add_row(vec![
                std::mem::take(&mut label),
                key.clone(),
                format_quantity(*qty),
            ]);
        }
    }
    table
}

/// Render one row per plant, dead plants included.
pub fn plant_table(snapshot: &SimSnapshot) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Plant", "Alive", "Age", "Health", "Healthy"]);
    for plant in &snapshot.plants {
        let name = format!("{} {}", capitalize(&plant.kind), plant.id.0 + 1);
        let alive = if plant.alive {
            "yes".green().to_string()
        } else {
            "dead".red().to_string()
        };
        let healthy = if !plant.alive {
            "—".dimmed().to_string()
        } else if plant.healthy {
            "yes".to_string()
        } else {
            "no".yellow().to_string()
        };
        table.add_row(vec![
            name,
            alive,
            plant.age.to_string(),
            format_quantity(plant.health),
            healthy,
        ]);
    }
    table
}

/// Print both panels with headings.
pub fn print_panels(snapshot: &SimSnapshot) {
    println!("  {}", format!("Tick {}", snapshot.tick).bold());
    println!();
    println!("  {}", "Environment".bold().underline());
    println!("{}", environment_table(snapshot));
    println!();
    println!("  {}", "Plants".bold().underline());
    if snapshot.plants.is_empty() {
        println!("  {}", "(no plants)".dimmed());
    } else {
        println!("{}", plant_table(snapshot));
    }
    println!();
    println!(
        "  {} of {} plants alive",
        snapshot.living(),
        snapshot.plants.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities() {
        assert_eq!(format_quantity(500.0), "500");
        assert_eq!(format_quantity(-3.0), "-3");
        assert_eq!(format_quantity(2.5), "2.50");
    }

    #[test]
    fn environment_rows_grouped_by_category() {
        let snapshot = SimSnapshot {
            tick: 0,
            resources: [
                ("substrate", "water", 500.0),
                ("substrate", "nutrient", 490.0),
                ("atmosphere", "co2", 12.5),
            ]
            .into_iter()
            .collect(),
            light: Default::default(),
            plants: Vec::new(),
        };
        let rendered = environment_table(&snapshot).to_string();
        assert_eq!(rendered.matches("Substrate").count(), 1);
        assert_eq!(rendered.matches("Atmosphere").count(), 1);
        assert!(rendered.contains("nutrient"));
        assert!(rendered.contains("12.50"));
    }

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("substrate"), "Substrate");
        assert_eq!(capitalize(""), "");
    }
}
