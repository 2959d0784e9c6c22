use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ComposeError, ComposeResult};

/// Font file tried first when nothing else is configured.
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Recognized composition options.
///
/// Precedence, lowest to highest: built-in defaults, JSON config file, environment variables,
/// explicit CLI flags (applied by the binary).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Primary font file. `None` skips straight to the platform fallbacks.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Target canvas width.
    pub canvas_width: u32,
    /// Target canvas height.
    pub canvas_height: u32,
    /// Directory scanned for background images.
    pub background_dir: PathBuf,
    /// Directory receiving `composed_<n>.png`.
    pub output_dir: PathBuf,
    /// Overlay images pasted onto every composition.
    pub overlays: Vec<PathBuf>,
    /// `tracing` max level for the CLI subscriber.
    pub log_level: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            font_path: Some(PathBuf::from(DEFAULT_FONT_PATH)),
            font_size: 48.0,
            canvas_width: 1200,
            canvas_height: 1200,
            background_dir: PathBuf::from("data").join("backgrounds"),
            output_dir: PathBuf::from("data").join("composed"),
            overlays: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl ComposeConfig {
    /// Defaults, overlaid with `path` when given, then the process environment; validated.
    pub fn load(path: Option<&Path>) -> ComposeResult<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_json_file(p)?,
            None => Self::default(),
        };
        cfg.apply_env_from(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON config file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> ComposeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply environment overrides through `lookup` (`FONT_PATH`, `FONT_SIZE`, `COMPOSED_WIDTH`,
    /// `COMPOSED_HEIGHT`, `BACKGROUND_DIR`, `COMPOSED_DIR`).
    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ComposeResult<()> {
        if let Some(v) = lookup("FONT_PATH") {
            self.font_path = if v.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(v))
            };
        }
        if let Some(v) = lookup("FONT_SIZE") {
            self.font_size = parse_env("FONT_SIZE", &v)?;
        }
        if let Some(v) = lookup("COMPOSED_WIDTH") {
            self.canvas_width = parse_env("COMPOSED_WIDTH", &v)?;
        }
        if let Some(v) = lookup("COMPOSED_HEIGHT") {
            self.canvas_height = parse_env("COMPOSED_HEIGHT", &v)?;
        }
        if let Some(v) = lookup("BACKGROUND_DIR") {
            self.background_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("COMPOSED_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn validate(&self) -> ComposeResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ComposeError::config("canvas width/height must be > 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ComposeError::config("font_size must be finite and > 0"));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> ComposeResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ComposeError::config(format!("invalid value for {key}: '{raw}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
