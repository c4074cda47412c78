use anyhow::{Context, Result};
use dq_core::gold_defaults;
use tracing::info;

use crate::output;

pub fn execute(output_path: Option<&str>) -> Result<()> {
    let registry = gold_defaults();
    let yaml = serde_yaml_ng::to_string(&registry).context("Failed to serialize rules")?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &yaml)
                .with_context(|| format!("Failed to write rules file: {path}"))?;
            info!("Starter rules written to {}", path);
            output::print_success(&format!(
                "Starter rules for {} table(s) written to {path}",
                registry.len()
            ));
        }
        None => {
            print!("{yaml}");
        }
    }

    Ok(())
}
