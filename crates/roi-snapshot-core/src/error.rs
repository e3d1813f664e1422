use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load {file_name}: {source}")]
    ScenarioFile {
        file_name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Demo snapshot unavailable at {}: {source}", .path.display())]
    DemoPayload {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}
