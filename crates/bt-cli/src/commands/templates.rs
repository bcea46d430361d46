use std::path::Path;

use bt_core::RateTable;
use comfy_table::{ContentArrangement, Table};

use crate::panel::{capitalize, format_quantity};

pub fn run(templates: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(templates)?;

    if catalog.is_empty() {
        println!("  No templates found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Type", "Max health", "Healing", "Consumes", "Produces"]);

    for template in catalog.templates() {
        table.add_row(vec![
            capitalize(&template.kind),
            format_quantity(template.max_health),
            format_quantity(template.healing_rate),
            describe_rates(&template.input),
            describe_rates(&template.output),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} templates", catalog.len());

    Ok(())
}

/// `category.key x rate` per line, or a dash when empty.
fn describe_rates(rates: &RateTable) -> String {
    if rates.is_empty() {
        return "—".to_string();
    }
    rates
        .iter()
        .map(|(category, key, rate)| format!("{category}.{key} x{}", format_quantity(rate)))
        .collect::<Vec<_>>()
        .join("\n")
}
