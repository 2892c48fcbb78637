//! # Application Configuration
//!
//! Settings are read from a TOML file. Every section and key is optional
//! and falls back to its default, so an empty file is a valid config.
//!
//! Resolution order, last wins:
//! 1. Built-in defaults
//! 2. `--config <file>`, or `./citegraph.toml` when present
//! 3. `CITEGRAPH_DATA` and `CITEGRAPH_LOG_FORMAT`
//! 4. Command-line flags (applied by the CLI)

use citegraph_core::CiteError;
use citegraph_core::primitives::{DEFAULT_GRAPH_DEPTH, DEFAULT_PAGE_SIZE, MAX_GRAPH_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "citegraph.toml";

/// Environment variable overriding `[data] path`.
pub const ENV_DATA: &str = "CITEGRAPH_DATA";

/// Environment variable overriding `[log] format`.
pub const ENV_LOG_FORMAT: &str = "CITEGRAPH_LOG_FORMAT";

/// Maximum corpus size (100 MB).
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub view: ViewConfig,
    pub graph: GraphConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
}

/// Where the corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    /// Files larger than this are refused before reading.
    pub max_file_size: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("bobert_openalex_enhanced.json"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub depth: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_GRAPH_DEPTH,
        }
    }
}

/// Default export file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub search_file: PathBuf,
    pub graph_file: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            search_file: PathBuf::from("crp_search.csv"),
            graph_file: PathBuf::from("crp_graph.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `text` or `json`.
    pub format: String,
    /// Used when `RUST_LOG` is unset.
    pub filter: String,
}

/// Filter used under `--quiet`: warnings and errors only.
const QUIET_FILTER: &str = "warn";

/// Filter used under `--verbose`.
const VERBOSE_FILTER: &str = "citegraph=debug,citegraph_core=debug";

impl LogConfig {
    /// The filter to install when `RUST_LOG` is unset. `--quiet` wins
    /// over `--verbose`.
    pub fn effective_filter(&self, verbose: bool, quiet: bool) -> String {
        if quiet {
            QUIET_FILTER.to_string()
        } else if verbose {
            VERBOSE_FILTER.to_string()
        } else {
            self.filter.clone()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            filter: "citegraph=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, CiteError> {
        let config: Self = toml::from_str(text).map_err(|e| CiteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CiteError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CiteError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolve the configuration from an explicit file, the default file,
    /// or defaults, then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CiteError> {
        Self::resolve(explicit, |key| std::env::var(key).ok())
    }

    /// `load` with an injectable environment. Overrides are validated
    /// like file values.
    pub fn resolve(
        explicit: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CiteError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DATA).filter(|p| !p.is_empty()) {
            self.data.path = PathBuf::from(path);
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT).filter(|f| !f.is_empty()) {
            self.log.format = format;
        }
    }

    pub fn validate(&self) -> Result<(), CiteError> {
        if self.view.page_size == 0 {
            return Err(CiteError::Config("view.page_size must be at least 1".into()));
        }
        if !(1..=MAX_GRAPH_DEPTH).contains(&self.graph.depth) {
            return Err(CiteError::Config(format!(
                "graph.depth must be between 1 and {}, got {}",
                MAX_GRAPH_DEPTH, self.graph.depth
            )));
        }
        if self.data.max_file_size == 0 {
            return Err(CiteError::Config(
                "data.max_file_size must be positive".into(),
            ));
        }
        match self.log.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(CiteError::Config(format!(
                "log.format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_defaults() {
        let config = AppConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.view.page_size, 10);
        assert_eq!(config.graph.depth, 1);
        assert_eq!(config.export.graph_file, PathBuf::from("crp_graph.csv"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [view]
            page_size = 25

            [data]
            path = "corpus.json"
            "#,
        )
        .expect("parse");
        assert_eq!(config.view.page_size, 25);
        assert_eq!(config.data.path, PathBuf::from("corpus.json"));
        assert_eq!(config.data.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.log.format, "text");
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(AppConfig::from_toml_str("[view]\npage_size = 0").is_err());
        assert!(AppConfig::from_toml_str("[log]\nformat = \"xml\"").is_err());
        assert!(AppConfig::from_toml_str("[view\n").is_err());
    }

    #[test]
    fn graph_depth_out_of_range_rejected() {
        assert!(AppConfig::from_toml_str("[graph]\ndepth = 0").is_err());
        assert!(AppConfig::from_toml_str("[graph]\ndepth = 101").is_err());
        let config = AppConfig::from_toml_str("[graph]\ndepth = 100").expect("parse");
        assert_eq!(config.graph.depth, MAX_GRAPH_DEPTH);
    }

    #[test]
    fn environment_log_format_is_validated() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        std::fs::write(file.path(), "[log]\nformat = \"text\"").expect("write");

        let bad = AppConfig::resolve(Some(file.path()), |key| match key {
            ENV_LOG_FORMAT => Some("xml".to_string()),
            _ => None,
        });
        assert!(bad.is_err());

        let good = AppConfig::resolve(Some(file.path()), |key| match key {
            ENV_LOG_FORMAT => Some("json".to_string()),
            _ => None,
        })
        .expect("resolve");
        assert_eq!(good.log.format, "json");
    }

    #[test]
    fn quiet_lowers_the_log_filter() {
        let log = LogConfig::default();
        assert_eq!(log.effective_filter(false, false), "citegraph=info");
        assert_eq!(log.effective_filter(false, true), "warn");
        assert_eq!(log.effective_filter(true, true), "warn");
        assert!(log.effective_filter(true, false).contains("citegraph=debug"));
    }

    #[test]
    fn environment_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            ENV_DATA => Some("/data/other.json".to_string()),
            ENV_LOG_FORMAT => Some("json".to_string()),
            _ => None,
        });
        assert_eq!(config.data.path, PathBuf::from("/data/other.json"));
        assert_eq!(config.log.format, "json");
    }
}
