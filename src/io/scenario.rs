use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::Scenario;

/// Reads scenario overrides from a JSON file.
pub fn read_scenario(path: &Path) -> Result<Scenario> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let scenario: Scenario = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse scenario file: {}", path.display()))?;

    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scenario() -> Result<()> {
        let path = std::env::temp_dir().join("building_evac_scenario_test.json");
        std::fs::write(&path, r#"{"modeling": {"step": 0.05}, "blocked": ["d1"]}"#)?;
        let scenario = read_scenario(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(scenario.modeling.step, 0.05);
        assert_eq!(scenario.blocked, vec!["d1".to_string()]);
        Ok(())
    }
}
