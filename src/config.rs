//! Board settings, read from a JSON file.
//!
//! The file is looked up at `$CREWBOARD_CONFIG`, falling back to
//! `crewboard.json` in the working directory. Missing files mean defaults;
//! unreadable or invalid ones are reported.

use crate::drawing::{Color, LineCap, Tool};
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "CREWBOARD_CONFIG";
pub const CONFIG_FILE_NAME: &str = "crewboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub stroke_width: f32,
    pub line_cap: LineCap,
    pub palette: Vec<Color>,
    pub initial_color: Color,
    pub initial_tool: Tool,
    /// Replay committed strokes after a resize instead of losing them.
    pub preserve_on_resize: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            line_cap: LineCap::Round,
            palette: Color::PALETTE.to_vec(),
            initial_color: Color::BLACK,
            initial_tool: Tool::Pencil,
            preserve_on_resize: true,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: BoardConfig =
            serde_json::from_str(json).context("malformed board config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// Resolves the config location and loads it, or returns defaults when
    /// no file exists there.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config = Self::load_from(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            bail!("stroke_width must be a positive number, got {}", self.stroke_width);
        }
        if self.palette.is_empty() {
            bail!("palette must contain at least one color");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn defaults_match_the_whiteboard_palette() {
        let config = BoardConfig::default();
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.palette[0], Color::BLACK);
        assert_eq!(config.stroke_width, 2.0);
        assert_eq!(config.line_cap, LineCap::Round);
        assert!(config.preserve_on_resize);
    }

    #[test]
    fn partial_override() {
        let config = BoardConfig::from_json(
            r##"{ "stroke_width": 4.5, "initial_color": "#0000FF", "line_cap": "square",
                 "initial_tool": "eraser", "preserve_on_resize": false }"##,
        )
        .unwrap();
        assert_eq!(config.stroke_width, 4.5);
        assert_eq!(config.initial_color, Color::BLUE);
        assert_eq!(config.line_cap, LineCap::Square);
        assert_eq!(config.initial_tool, Tool::Eraser);
        assert!(!config.preserve_on_resize);
        assert_eq!(config.palette, Color::PALETTE.to_vec());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(BoardConfig::from_json(r#"{ "stroke_width": 0 }"#).is_err());
        assert!(BoardConfig::from_json(r#"{ "stroke_width": -1.0 }"#).is_err());
        assert!(BoardConfig::from_json(r#"{ "palette": [] }"#).is_err());
        assert!(BoardConfig::from_json(r##"{ "palette": ["#12345"] }"##).is_err());
        assert!(BoardConfig::from_json(r#"{ "line_cap": "pointy" }"#).is_err());
        assert!(BoardConfig::from_json(r#"{ "brush": 3 }"#).is_err());
        assert!(BoardConfig::from_json("not json").is_err());
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("crewboard-config-does-not-exist.json");
        let err = BoardConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "crewboard-config-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, r##"{ "palette": ["#FF0000", "#00FF00"] }"##).unwrap();
        let config = BoardConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.palette, vec![Color::RED, Color::GREEN]);
    }
}
