use super::classify::classify;
use crate::model::OutputFile;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

/// Result of listing one output directory.
#[derive(Debug, Default)]
pub struct ScanListing {
    /// Classified files in directory-listing order.
    pub files: Vec<OutputFile>,
    /// Entries that were not regular files or did not match the naming grammar.
    pub skipped: usize,
}

/// List the (flat) output directory and classify every regular file in it.
///
/// Errors only when the directory itself cannot be opened or iterated;
/// unrecognized names are counted and skipped.
pub async fn list_output_files(dir: &Path) -> io::Result<ScanListing> {
    let mut listing = ScanListing::default();

    let mut entries = tokio::fs::read_dir(dir).await.map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading directory {}: {}", dir.display(), err),
        )
    })?;

    while let Some(entry) = entries.next_entry().await? {
        // Follows symlinks, so a linked output file is listed like the target.
        let metadata = match tokio::fs::metadata(entry.path()).await {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Error reading metadata for {}: {}", entry.path().display(), err);
                listing.skipped += 1;
                continue;
            }
        };
        if !metadata.is_file() {
            listing.skipped += 1;
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            listing.skipped += 1;
            continue;
        };

        match classify(name) {
            Some(file) => {
                trace!("Classified {} as {:?} for {}", name, file.kind, file.key());
                listing.files.push(file);
            }
            None => {
                trace!("Ignoring {}", name);
                listing.skipped += 1;
            }
        }
    }

    Ok(listing)
}
