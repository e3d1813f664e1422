pub mod calibrate;
pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod model;
pub mod pairing;
pub mod profile;
pub mod progress;
pub mod scalar;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{ScanReport, SnapshotEngine};
pub use error::Error;
pub use model::{ClientData, Objective, Scenario, Snapshot, SnapshotSource};
pub use progress::{FallbackReason, ProgressReporter, SilentReporter};
