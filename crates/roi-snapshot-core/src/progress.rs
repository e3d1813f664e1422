use crate::model::SnapshotSource;
use std::fmt;
use std::path::Path;

/// Why an assembly served the demo snapshot instead of live outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    DirectoryUnreadable(String),
    NoMatchingFiles,
    NoCompletePairs,
    LoadFailed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::DirectoryUnreadable(err) => {
                write!(f, "output directory unreadable: {}", err)
            }
            FallbackReason::NoMatchingFiles => f.write_str("no optimizer output files found"),
            FallbackReason::NoCompletePairs => {
                f.write_str("no scenario has both a summary and a recommendation")
            }
            FallbackReason::LoadFailed(err) => write!(f, "failed to load scenario: {}", err),
        }
    }
}

/// Trait for reporting assembly progress.
///
/// CLI implements with indicatif/colored output. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self, _output_dir: &Path) {}
    fn on_scan_complete(&self, _classified: usize, _skipped: usize) {}
    fn on_pairing_complete(&self, _complete: usize, _incomplete: usize) {}
    fn on_fallback(&self, _reason: &FallbackReason) {}
    fn on_snapshot_ready(&self, _source: SnapshotSource, _clients: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
