use crate::model::ClientProfile;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn profile_path(output_dir: &Path, client_id: &str) -> PathBuf {
    output_dir.join(format!("{}_profile.json", client_id))
}

/// Read `<client_id>_profile.json` from the output directory.
///
/// Profiles are cosmetic: a missing, unreadable or malformed file yields `None`.
pub async fn read_profile(output_dir: &Path, client_id: &str) -> Option<ClientProfile> {
    let path = profile_path(output_dir, client_id);

    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(err) => {
            debug!("No profile for {} at {}: {}", client_id, path.display(), err);
            return None;
        }
    };

    match serde_json::from_str::<ClientProfile>(&text) {
        Ok(profile) => Some(profile),
        Err(err) => {
            debug!("Ignoring malformed profile {}: {}", path.display(), err);
            None
        }
    }
}
