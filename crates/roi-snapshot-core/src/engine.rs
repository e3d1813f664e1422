use crate::calibrate::calibrate;
use crate::config::AppConfig;
use crate::decode::{decode_csv, decode_json};
use crate::error::Error;
use crate::model::{
    prettify_client_id, scenario_order, ClientData, ClientProfile, Scenario, Snapshot,
    SnapshotSource,
};
use crate::pairing::{self, Pairing, ScenarioPair};
use crate::profile::read_profile;
use crate::progress::{FallbackReason, ProgressReporter};
use crate::scanner::{self, ScanListing};
use futures::future::{join_all, try_join_all};
use serde_json::Map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct SnapshotEngine {
    output_dir: PathBuf,
    demo_snapshot_path: PathBuf,
}

/// Directory contents as the assembler sees them, before any file is read.
#[derive(Debug)]
pub struct ScanReport {
    pub listing: ScanListing,
    pub pairing: Pairing,
}

impl SnapshotEngine {
    pub fn new(config: AppConfig) -> Self {
        Self {
            output_dir: config.output_dir,
            demo_snapshot_path: config.demo_snapshot_path,
        }
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_demo_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.demo_snapshot_path = path.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn demo_snapshot_path(&self) -> &Path {
        &self.demo_snapshot_path
    }

    /// Produce the current snapshot:
    /// 1. List and classify the output directory
    /// 2. Pair summary/recommendation files per scenario key
    /// 3. Read and decode every complete pair concurrently
    /// 4. Group by client, merge profiles, sort
    /// 5. Calibrate ROAS fields
    ///
    /// Any failure in steps 1-4 serves the demo snapshot instead. Only a
    /// missing or malformed demo snapshot is returned as an error.
    pub async fn snapshot(&self, reporter: &dyn ProgressReporter) -> Result<Snapshot, Error> {
        let start = Instant::now();

        let snapshot = match self.assemble_live(reporter).await {
            Ok(snapshot) => snapshot,
            Err(reason) => {
                warn!("Serving demo snapshot: {}", reason);
                reporter.on_fallback(&reason);
                self.load_demo().await?
            }
        };
        let snapshot = calibrate(snapshot);

        let duration = start.elapsed();
        info!(
            "Snapshot ready from {} with {} clients",
            snapshot.source,
            snapshot.clients.len()
        );
        debug!("Assembly completed in {:.3}s", duration.as_secs_f64());
        reporter.on_snapshot_ready(
            snapshot.source,
            snapshot.clients.len(),
            duration.as_secs_f64(),
        );

        Ok(snapshot)
    }

    /// List and pair the output directory without reading any file contents.
    pub async fn scan(&self) -> Result<ScanReport, Error> {
        let listing = scanner::list_output_files(&self.output_dir).await?;
        let pairing = pairing::pair(&listing.files);
        Ok(ScanReport { listing, pairing })
    }

    async fn assemble_live(
        &self,
        reporter: &dyn ProgressReporter,
    ) -> Result<Snapshot, FallbackReason> {
        // Phase 1: Scan
        info!("Scanning {}...", self.output_dir.display());
        reporter.on_scan_start(&self.output_dir);
        let scan_start = Instant::now();
        let listing = scanner::list_output_files(&self.output_dir)
            .await
            .map_err(|err| FallbackReason::DirectoryUnreadable(err.to_string()))?;
        debug!(
            "Scan completed in {:.3}s: {} output files, {} skipped",
            scan_start.elapsed().as_secs_f64(),
            listing.files.len(),
            listing.skipped,
        );
        reporter.on_scan_complete(listing.files.len(), listing.skipped);
        if listing.files.is_empty() {
            return Err(FallbackReason::NoMatchingFiles);
        }

        // Phase 2: Pair
        let pairing = pairing::pair(&listing.files);
        debug!(
            "{} complete scenarios, {} incomplete",
            pairing.complete.len(),
            pairing.incomplete.len(),
        );
        reporter.on_pairing_complete(pairing.complete.len(), pairing.incomplete.len());
        if pairing.complete.is_empty() {
            return Err(FallbackReason::NoCompletePairs);
        }

        // Phase 3: Load
        info!("Loading {} scenarios...", pairing.complete.len());
        let load_start = Instant::now();
        let loaded = try_join_all(
            pairing
                .complete
                .into_iter()
                .map(|pair| load_scenario(&self.output_dir, pair)),
        )
        .await
        .map_err(|err| FallbackReason::LoadFailed(err.to_string()))?;
        debug!("Load completed in {:.3}s", load_start.elapsed().as_secs_f64());

        let mut by_client: BTreeMap<String, Vec<Scenario>> = BTreeMap::new();
        for (client_id, scenario) in loaded {
            by_client.entry(client_id).or_default().push(scenario);
        }
        if by_client.is_empty() {
            return Err(FallbackReason::NoCompletePairs);
        }

        // Phase 4: Assemble
        let profiles =
            join_all(by_client.keys().map(|id| read_profile(&self.output_dir, id))).await;
        let mut clients: Vec<ClientData> = by_client
            .into_iter()
            .zip(profiles)
            .map(|((client_id, scenarios), profile)| build_client(client_id, scenarios, profile))
            .collect();
        clients.sort_by(|a, b| a.client_id.cmp(&b.client_id));

        Ok(Snapshot {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: SnapshotSource::OptimizerOutputs,
            clients,
            extra: Map::new(),
        })
    }

    /// Read the bundled demo snapshot. It is served as-is apart from the
    /// `source` marker and defaulted display names.
    pub async fn load_demo(&self) -> Result<Snapshot, Error> {
        let path = &self.demo_snapshot_path;
        let demo_error = |source: Error| Error::DemoPayload {
            path: path.clone(),
            source: Box::new(source),
        };

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| demo_error(err.into()))?;
        let mut snapshot: Snapshot =
            serde_json::from_str(&text).map_err(|err| demo_error(err.into()))?;

        snapshot.source = SnapshotSource::Demo;
        for client in &mut snapshot.clients {
            if client.display_name.trim().is_empty() {
                client.display_name = prettify_client_id(&client.client_id);
            }
        }
        Ok(snapshot)
    }
}

async fn load_scenario(output_dir: &Path, pair: ScenarioPair) -> Result<(String, Scenario), Error> {
    let (summary_text, recommendation_text) = tokio::try_join!(
        read_output_file(output_dir, &pair.summary.file_name),
        read_output_file(output_dir, &pair.recommendation.file_name),
    )?;

    let summary = decode_json(&summary_text).map_err(|err| Error::ScenarioFile {
        file_name: pair.summary.file_name.clone(),
        source: Box::new(err.into()),
    })?;
    let rows = decode_csv(&recommendation_text);

    let scenario = Scenario {
        id: pair.key.scenario_id(),
        objective: pair.key.objective,
        timestamp: pair.key.timestamp.clone(),
        summary_file: pair.summary.file_name,
        recommendation_file: pair.recommendation.file_name,
        summary,
        recommendations: rows.into_iter().map(Into::into).collect(),
        extra: Map::new(),
    };
    Ok((pair.key.client_id, scenario))
}

async fn read_output_file(output_dir: &Path, file_name: &str) -> Result<String, Error> {
    tokio::fs::read_to_string(output_dir.join(file_name))
        .await
        .map_err(|err| Error::ScenarioFile {
            file_name: file_name.to_string(),
            source: Box::new(err.into()),
        })
}

fn build_client(
    client_id: String,
    mut scenarios: Vec<Scenario>,
    profile: Option<ClientProfile>,
) -> ClientData {
    scenarios.sort_by(scenario_order);

    let profile = profile.unwrap_or_default();
    let display_name = profile
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| prettify_client_id(&client_id));

    ClientData {
        client_id,
        display_name,
        monthly_trend: profile.monthly_trend.unwrap_or_default(),
        scenarios,
        extra: Map::new(),
    }
}
