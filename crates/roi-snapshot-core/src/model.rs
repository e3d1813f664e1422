use crate::scalar::{Record, Scalar};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Optimization goal encoded in an output file name.
///
/// Variants are declared in name order, so the derived `Ord` is the
/// lexicographic order of [`Objective::as_str`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Cac,
    #[default]
    Pipeline,
    Revenue,
    Roas,
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Cac => "cac",
            Objective::Pipeline => "pipeline",
            Objective::Revenue => "revenue",
            Objective::Roas => "roas",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cac" => Ok(Objective::Cac),
            "pipeline" => Ok(Objective::Pipeline),
            "revenue" => Ok(Objective::Revenue),
            "roas" => Ok(Objective::Roas),
            other => Err(format!("unknown objective '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Summary,
    Recommendation,
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(FileKind::Summary),
            "recommendation" => Ok(FileKind::Recommendation),
            other => Err(format!("unknown output kind '{}'", other)),
        }
    }
}

/// An optimizer output file recognized during one directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Verbatim directory entry name, used for the later read.
    pub file_name: String,
    pub client_id: String,
    pub objective: Objective,
    pub kind: FileKind,
    /// `YYYYMMDD_HHMMSS`, compared as text only.
    pub timestamp: String,
}

impl OutputFile {
    pub fn key(&self) -> ScenarioKey {
        ScenarioKey {
            client_id: self.client_id.clone(),
            objective: self.objective,
            timestamp: self.timestamp.clone(),
        }
    }
}

/// Identifies one optimizer run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenarioKey {
    pub client_id: String,
    pub objective: Objective,
    pub timestamp: String,
}

impl ScenarioKey {
    pub fn scenario_id(&self) -> String {
        format!("{}__{}", self.objective, self.timestamp)
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.client_id, self.objective, self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardrailStatus {
    Pass,
    Fail,
    Unknown,
}

/// Decoded summary JSON. Keys are passed through untouched, including
/// nested values such as the optimizer's objective weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(pub Map<String, Value>);

impl Summary {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Numeric field, reading absent or non-numeric values as zero.
    pub fn number(&self, key: &str) -> f64 {
        self.0.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn total_budget(&self) -> f64 {
        self.number("total_budget")
    }

    pub fn total_pipeline(&self) -> f64 {
        self.number("total_pipeline")
    }

    pub fn total_revenue(&self) -> f64 {
        self.number("total_revenue")
    }

    pub fn total_hqls(&self) -> f64 {
        self.number("total_hqls")
    }

    pub fn overall_roas(&self) -> f64 {
        self.number("overall_roas")
    }

    pub fn overall_cac(&self) -> f64 {
        self.number("overall_cac")
    }

    pub fn unallocated_budget(&self) -> f64 {
        self.number("unallocated_budget")
    }

    pub fn guardrail_status(&self) -> GuardrailStatus {
        match self.0.get("guardrail_status").and_then(Value::as_str) {
            Some(s) if s.eq_ignore_ascii_case("pass") => GuardrailStatus::Pass,
            Some(s) if s.eq_ignore_ascii_case("fail") => GuardrailStatus::Fail,
            _ => GuardrailStatus::Unknown,
        }
    }
}

/// One decoded recommendation row, in header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelRecommendation(pub Record);

impl ChannelRecommendation {
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.0.get(column)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut Scalar> {
        self.0.get_mut(column)
    }

    pub fn channel(&self) -> Option<&str> {
        self.0.get("channel").and_then(Scalar::as_str)
    }

    pub fn number(&self, column: &str) -> f64 {
        self.0.get(column).and_then(Scalar::as_f64).unwrap_or(0.0)
    }

    pub fn recommended_spend(&self) -> f64 {
        self.number("recommended_spend")
    }

    pub fn recommended_share(&self) -> f64 {
        self.number("recommended_share")
    }

    pub fn pred_pipeline(&self) -> f64 {
        self.number("pred_pipeline")
    }

    pub fn pred_revenue(&self) -> f64 {
        self.number("pred_revenue")
    }

    pub fn pred_roas(&self) -> f64 {
        self.number("pred_roas")
    }

    pub fn pred_cac(&self) -> f64 {
        self.number("pred_cac")
    }
}

impl From<Record> for ChannelRecommendation {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub objective: Objective,
    pub timestamp: String,
    #[serde(default)]
    pub summary_file: String,
    #[serde(default)]
    pub recommendation_file: String,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub recommendations: Vec<ChannelRecommendation>,
    /// Keys beyond the fields above, kept so a hand-written payload round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Newest run first; runs sharing a timestamp are ordered by objective name.
pub fn scenario_order(a: &Scenario, b: &Scenario) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| a.objective.as_str().cmp(b.objective.as_str()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: String,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub total_pipeline: f64,
    #[serde(default)]
    pub total_revenue: f64,
}

/// Optional `<client_id>_profile.json` side file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClientProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub monthly_trend: Option<Vec<MonthlyPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientData {
    pub client_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub monthly_trend: Vec<MonthlyPoint>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientData {
    /// Most recent scenario for `objective`; scenarios are kept newest first.
    pub fn latest_scenario(&self, objective: Objective) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.objective == objective)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    OptimizerOutputs,
    Live,
    Demo,
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnapshotSource::OptimizerOutputs => "optimizer_outputs",
            SnapshotSource::Live => "live",
            SnapshotSource::Demo => "demo",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: String,
    pub source: SnapshotSource,
    #[serde(default)]
    pub clients: Vec<ClientData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    pub fn client(&self, client_id: &str) -> Option<&ClientData> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }
}

/// `acme_north_america` -> `Acme North America`
pub fn prettify_client_id(client_id: &str) -> String {
    client_id
        .split(|c: char| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
