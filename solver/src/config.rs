use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{frontier::FrontierKind, parse::ParseOptions, render::ImageOptions};

/// Settings for one run of the solver, usually read from a JSON file. Missing fields take
/// their default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub frontier: FrontierKind,
    pub missing_as_open: bool,
    /// Give up after this many nodes were expanded
    pub max_steps: Option<usize>,
    pub image: ImageOptions,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            frontier: FrontierKind::default(),
            missing_as_open: ParseOptions::default().missing_as_open,
            max_steps: None,
            image: ImageOptions::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;

        Self::from_json(&json).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            missing_as_open: self.missing_as_open,
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(SolverConfig::from_json("{}").unwrap(), SolverConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = SolverConfig::from_json(
            r#"{
                "frontier": "queue",
                "missing_as_open": false,
                "max_steps": 500,
                "image": { "output": null, "cell_size": 20 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.frontier, FrontierKind::Queue);
        assert_eq!(config.max_steps, Some(500));
        assert!(!config.parse_options().missing_as_open);
        assert_eq!(config.image.output, None);
        assert_eq!(config.image.cell_size, 20);
        assert_eq!(config.image.cell_border, 2);
        assert!(config.image.show_explored);
    }

    #[test]
    fn test_invalid_frontier() {
        assert!(SolverConfig::from_json(r#"{ "frontier": "astar" }"#).is_err());
    }
}
