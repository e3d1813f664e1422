use crate::error::Error;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "data/canonical/outputs";
pub const DEFAULT_DEMO_SNAPSHOT_PATH: &str = "data/demo_snapshot.json";
pub const DEFAULT_ASSEMBLY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Flat directory the optimizer writes summary/recommendation pairs into.
    pub output_dir: PathBuf,
    /// Bundled snapshot served when no live outputs can be assembled.
    pub demo_snapshot_path: PathBuf,
    /// Upper bound a caller should allow one assembly to run for.
    pub assembly_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            demo_snapshot_path: PathBuf::from(DEFAULT_DEMO_SNAPSHOT_PATH),
            assembly_timeout_secs: DEFAULT_ASSEMBLY_TIMEOUT_SECS,
        }
    }
}

/// Defaults, then an optional `Config.{toml,json,...}`, then `ROI_SNAPSHOT_*` env vars.
pub fn load_configuration() -> Result<AppConfig, Error> {
    let builder = with_defaults()?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("ROI_SNAPSHOT").try_parsing(true));
    finish(builder)
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
        .set_default("demo_snapshot_path", DEFAULT_DEMO_SNAPSHOT_PATH)?
        .set_default("assembly_timeout_secs", DEFAULT_ASSEMBLY_TIMEOUT_SECS)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, Error> {
    Ok(builder.build()?.try_deserialize::<AppConfig>()?)
}
