use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "flapcade.toml";
pub const CONFIG_ENV: &str = "FLAPCADE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config {path:?} is not valid TOML")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Size of the drawable screen in terminal cells. Every screen lays itself
/// out relative to this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u16,
    pub height: u16,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: 60,
            height: 24,
        }
    }
}

impl ScreenGeometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> u16 {
        self.width / 2
    }

    pub fn center_y(&self) -> u16 {
        self.height / 2
    }

    /// A `width` x `height` rect horizontally centered on the screen with its
    /// middle row at `center_y`, clamped to the screen.
    pub fn centered(&self, width: u16, height: u16, center_y: i32) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        let x = self.center_x().saturating_sub(width / 2);
        let top = (center_y - i32::from(height / 2)).max(0) as u16;
        let y = top.min(self.height.saturating_sub(height));
        Rect::new(x, y, width, height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
    /// Add the finished run to the score file when leaving the game-over screen
    pub record_runs: bool,
    pub tick_rate_ms: u64,
    /// Fallback when the terminal size cannot be queried
    pub geometry: ScreenGeometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scores_path: PathBuf::from("scores.json"),
            log_path: PathBuf::from("flapcade.log"),
            record_runs: true,
            tick_rate_ms: 16, // ~60 FPS
            geometry: ScreenGeometry::default(),
        }
    }
}

impl Config {
    /// `$FLAPCADE_CONFIG`, or `flapcade.toml` in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scores_path, PathBuf::from("scores.json"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "scores_path = \"/tmp/high.json\"\nrecord_runs = false\n\n[geometry]\nwidth = 80\nheight = 30\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.scores_path, PathBuf::from("/tmp/high.json"));
        assert!(!config.record_runs);
        assert_eq!(config.geometry, ScreenGeometry::new(80, 30));
        assert_eq!(config.tick_rate_ms, 16);
    }

    #[test]
    fn bad_toml_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "record_runs = maybe").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn centered_rect_stays_on_screen() {
        let g = ScreenGeometry::new(60, 24);
        assert_eq!(g.centered(12, 3, 14), Rect::new(24, 13, 12, 3));
        assert_eq!(g.centered(12, 3, -5), Rect::new(24, 0, 12, 3));
        assert_eq!(g.centered(12, 3, 40), Rect::new(24, 21, 12, 3));
        assert_eq!(g.centered(100, 3, 12), Rect::new(0, 11, 60, 3));
    }
}
