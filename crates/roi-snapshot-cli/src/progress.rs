use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use roi_snapshot_core::{FallbackReason, ProgressReporter, SnapshotSource};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner while the output directory is listed and scenarios load;
/// each finished phase leaves one line on stderr.
pub struct CliReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    /// Clear the running spinner, if any, and install `next` in its place.
    fn replace_spinner(&self, next: Option<ProgressBar>) {
        let mut slot = self.spinner.lock().unwrap();
        if let Some(running) = slot.take() {
            running.finish_and_clear();
        }
        *slot = next;
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        self.replace_spinner(Some(pb));
    }

    fn done(&self, line: String) {
        self.replace_spinner(None);
        eprintln!("  {} {}", "✓".green(), line);
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, output_dir: &Path) {
        self.start_spinner(format!("Listing {}...", output_dir.display()));
    }

    fn on_scan_complete(&self, classified: usize, skipped: usize) {
        self.done(format!(
            "{} optimizer output files ({} other entries)",
            classified, skipped
        ));
    }

    fn on_pairing_complete(&self, complete: usize, incomplete: usize) {
        self.done(format!(
            "{} complete scenarios, {} missing a summary or recommendation",
            complete, incomplete
        ));
        if complete > 0 {
            self.start_spinner(format!("Reading {} scenario pairs...", complete));
        }
    }

    fn on_fallback(&self, reason: &FallbackReason) {
        self.replace_spinner(None);
        eprintln!("  {} Serving demo snapshot: {}", "!".yellow(), reason);
    }

    fn on_snapshot_ready(&self, source: SnapshotSource, clients: usize, duration_secs: f64) {
        self.done(format!(
            "{} clients from {} in {:.2}s",
            clients,
            source.to_string().bold(),
            duration_secs
        ));
    }
}
