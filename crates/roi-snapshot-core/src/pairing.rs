use crate::model::{FileKind, OutputFile, ScenarioKey};
use std::collections::BTreeMap;
use tracing::debug;

/// Files collected for one scenario key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSlots {
    pub summary: Option<OutputFile>,
    pub recommendation: Option<OutputFile>,
}

/// A scenario key that has both of its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPair {
    pub key: ScenarioKey,
    pub summary: OutputFile,
    pub recommendation: OutputFile,
}

#[derive(Debug, Default)]
pub struct Pairing {
    /// Complete pairs in key order.
    pub complete: Vec<ScenarioPair>,
    /// Keys that were seen with only one kind of file.
    pub incomplete: Vec<ScenarioKey>,
}

/// Group files by scenario key. The first file seen for each kind wins.
pub fn group_by_key(files: &[OutputFile]) -> BTreeMap<ScenarioKey, PairSlots> {
    let mut groups: BTreeMap<ScenarioKey, PairSlots> = BTreeMap::new();

    for file in files {
        let slots = groups.entry(file.key()).or_default();
        let slot = match file.kind {
            FileKind::Summary => &mut slots.summary,
            FileKind::Recommendation => &mut slots.recommendation,
        };
        if let Some(existing) = slot.as_ref() {
            debug!(
                "Ignoring {}; {} already holds this slot",
                file.file_name, existing.file_name
            );
        } else {
            *slot = Some(file.clone());
        }
    }

    groups
}

/// Pair summary and recommendation files, dropping keys missing either one.
pub fn pair(files: &[OutputFile]) -> Pairing {
    let mut pairing = Pairing::default();

    for (key, slots) in group_by_key(files) {
        match (slots.summary, slots.recommendation) {
            (Some(summary), Some(recommendation)) => pairing.complete.push(ScenarioPair {
                key,
                summary,
                recommendation,
            }),
            _ => {
                debug!("Dropping incomplete scenario {}", key);
                pairing.incomplete.push(key);
            }
        }
    }

    pairing
}
