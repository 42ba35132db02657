use crate::citations::markers::MARKER_TABLE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "scanner.json";

/// Vocabulary the citation scanner recognizes. Every field has a default, so a
/// config file only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Words introducing a bare marker run, e.g. "paragraph (b)".
    pub paragraph_keywords: Vec<String>,
    /// Words introducing an interpretation reference, e.g. "comment 32(b)".
    pub comment_keywords: Vec<String>,
    /// Optional prefixes before a section number, e.g. "§ 1005.6".
    pub section_keywords: Vec<String>,
    /// Separators between enumerated citations, e.g. "(a), (b) and (c)".
    pub separators: Vec<String>,
    pub max_marker_depth: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            paragraph_keywords: strings(&["paragraph", "paragraphs"]),
            comment_keywords: strings(&["comment", "comments"]),
            section_keywords: strings(&["§§", "§", "section", "sections"]),
            separators: strings(&[", and/or ", ", and ", ", or ", ", ", " and/or ", " and ", " or "]),
            max_marker_depth: MARKER_TABLE.len(),
        }
    }
}

impl ScannerConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: ScannerConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse scanner config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::from_json(&content)
    }

    /// Load `scanner.json` from the directory named by `CONFIGS_PATH`, falling
    /// back to the built-in vocabulary when the variable or file is missing.
    pub fn load_default() -> Result<Self, String> {
        let dir = match std::env::var("CONFIGS_PATH") {
            Ok(dir) => dir,
            Err(_) => return Ok(Self::default()),
        };
        let path = Path::new(&dir).join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("No {} in {dir}, using defaults", CONFIG_FILE_NAME);
            return Ok(Self::default());
        }
        tracing::info!("Loading scanner config from {}", path.display());
        Self::load_from_file(path)
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_marker_depth == 0 || self.max_marker_depth > MARKER_TABLE.len() {
            return Err(format!(
                "max_marker_depth must be between 1 and {}, got {}",
                MARKER_TABLE.len(),
                self.max_marker_depth
            ));
        }
        for (name, words) in [
            ("paragraph_keywords", &self.paragraph_keywords),
            ("comment_keywords", &self.comment_keywords),
            ("section_keywords", &self.section_keywords),
            ("separators", &self.separators),
        ] {
            if words.iter().any(|w| w.is_empty()) {
                return Err(format!("{name} must not contain empty entries"));
            }
        }
        Ok(())
    }
}
