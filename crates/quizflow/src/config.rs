//! `quizflow.toml` settings. Every section is optional; command-line flags
//! override whatever the file sets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quizflow_editor::{EdgeStyles, SessionOptions};
use quizflow_layout::{Direction, LayoutOptions};
use quizflow_model::{ImportOptions, IntegrityPolicy};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "quizflow.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub layout: LayoutConfig,
    pub import: ImportConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory or `http(s)://` URL holding the three documents.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub rank_sep: f32,
    pub node_sep: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let defaults = LayoutOptions::default();
        Self {
            direction: defaults.direction,
            rank_sep: defaults.rank_sep,
            node_sep: defaults.node_sep,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub dangling_next: IntegrityPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub auto_layout_on_connect: bool,
    /// Stroke colour per source handle, on top of the built-in ones.
    pub edge_strokes: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Loads `explicit` if given, otherwise `quizflow.toml` in `dir` when present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if candidate.exists() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn layout_options(&self, direction: Option<Direction>) -> LayoutOptions {
        LayoutOptions {
            direction: direction.unwrap_or(self.layout.direction),
            rank_sep: self.layout.rank_sep,
            node_sep: self.layout.node_sep,
            ..LayoutOptions::default()
        }
    }

    pub fn session_options(&self, direction: Option<Direction>) -> SessionOptions {
        let mut styles = EdgeStyles::default();
        for (handle, stroke) in &self.editor.edge_strokes {
            styles.insert(handle.as_str(), stroke.as_str());
        }
        SessionOptions {
            layout: self.layout_options(direction),
            import: ImportOptions {
                dangling_next: self.import.dangling_next,
            },
            styles,
            auto_layout_on_connect: self.editor.auto_layout_on_connect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout.rank_sep, 100.0);
        assert_eq!(config.layout.node_sep, 200.0);
        assert_eq!(config.import.dangling_next, IntegrityPolicy::Reject);
    }

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r##"
            [source]
            base_url = "https://example.com/quiz/"

            [layout]
            direction = "LR"
            rank_sep = 80.0

            [import]
            dangling_next = "warn"

            [editor]
            auto_layout_on_connect = true

            [editor.edge_strokes]
            grey = "#333333"
            "##,
        )
        .unwrap();
        assert_eq!(config.source.base_url.as_deref(), Some("https://example.com/quiz/"));
        assert_eq!(config.layout.direction, Direction::LR);
        assert_eq!(config.layout.rank_sep, 80.0);
        assert_eq!(config.layout.node_sep, 200.0);

        let options = config.session_options(Some(Direction::BT));
        assert_eq!(options.layout.direction, Direction::BT);
        assert_eq!(options.import.dangling_next, IntegrityPolicy::Warn);
        assert!(options.auto_layout_on_connect);
        assert_eq!(options.styles.style_for("grey").stroke, "#333333");
        assert_eq!(options.styles.style_for("newOption").stroke, "#2680eb");
    }

    #[test]
    fn discovers_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        fs::write(dir.path().join(CONFIG_FILE), "[layout]\ndirection = \"TD\"\n").unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.layout.direction, Direction::TB);

        let missing = dir.path().join("nope.toml");
        assert!(Config::discover(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(toml::from_str::<Config>("[import]\ndangling_next = \"ignore\"\n").is_err());
    }
}
