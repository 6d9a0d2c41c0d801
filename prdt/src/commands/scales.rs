// prdt/src/commands/scales.rs
//
// USE CASE: Show the scales a project can score.

use std::path::{Path, PathBuf};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use prdt_core::application::registry_for;
use prdt_core::domain::scales::{ScaleDefinition, ScaleRegistry};

use super::load_config;

pub fn execute(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config.as_deref(), Path::new("."))?;
    let registry = registry_for(&config)?;

    println!("📏 {} registered scale(s)", registry.len());
    println!("{}", render(&registry));
    Ok(())
}

fn render(registry: &ScaleRegistry) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Scale", "Method", "Items", "Reverse", "Output", "Cutoffs"]);

    for def in registry.iter() {
        table.add_row(vec![
            def.name.clone(),
            def.method.as_str().to_string(),
            def.items.len().to_string(),
            def.reverse.as_ref().map_or(0, Vec::len).to_string(),
            def.output_column(),
            cutoffs_cell(def),
        ]);
    }
    table
}

fn cutoffs_cell(def: &ScaleDefinition) -> String {
    match &def.cutoffs {
        Some(cutoffs) => cutoffs
            .iter()
            .map(|(label, range)| format!("{label} {range}"))
            .collect::<Vec<_>>()
            .join(", "),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_builtin_scales_are_listed() -> Result<()> {
        let rendered = render(&ScaleRegistry::builtin()).to_string();
        assert!(rendered.contains("phq9"));
        assert!(rendered.contains("gad7_score"));
        assert!(rendered.contains("minimal 0-4"));
        Ok(())
    }
}
