//! Configuration types for honeyplot.
//!
//! [`Config::load`] layers, in order: the embedded defaults, an optional
//! TOML file, and `HONEYPLOT_`-prefixed environment variables. CLI flags are
//! applied on top by the binary. [`Config::defaults`] returns the embedded
//! defaults without touching the filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[paths]
raw_log    = "cowrie_master.json"
clean_log  = "clean_cowrie_logs.json"
output_dir = "plots"
"#;

/// File picked up from the working directory when no `--config` is given.
pub const LOCAL_CONFIG_STEM: &str = "honeyplot";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Newline-delimited Cowrie JSON log, the normalizer's input.
    #[serde(default = "default_raw_log")]
    pub raw_log: PathBuf,
    /// Persisted record document written by the normalizer and read by the
    /// aggregation engine.
    #[serde(default = "default_clean_log")]
    pub clean_log: PathBuf,
    /// Directory chart artifacts are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_raw_log() -> PathBuf { PathBuf::from("cowrie_master.json") }
fn default_clean_log() -> PathBuf { PathBuf::from("clean_cowrie_logs.json") }
fn default_output_dir() -> PathBuf { PathBuf::from("plots") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_log: default_raw_log(),
            clean_log: default_clean_log(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// An explicit `path` must exist. Without one, `honeyplot.toml` in the
    /// working directory is used when present. Environment variables use a
    /// double underscore between section and key, e.g.
    /// `HONEYPLOT_PATHS__OUTPUT_DIR=/tmp/plots`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(LOCAL_CONFIG_STEM).required(false)),
        };

        builder
            .add_source(
                config::Environment::with_prefix("HONEYPLOT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
