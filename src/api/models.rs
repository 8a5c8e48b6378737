use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer: the console returns version codes as strings,
/// but older payloads carried plain numbers
fn deserialize_version_codes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        _ => Ok(Vec::new()),
    }
}

/// An edit transaction opened against an application
#[derive(Debug, Deserialize, Clone)]
pub struct AppEdit {
    pub id: String,
    #[serde(rename = "expiryTimeSeconds")]
    pub expiry_time_seconds: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStatus {
    #[serde(rename = "statusUnspecified")]
    Unspecified,
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "inProgress")]
    InProgress,
    #[serde(rename = "halted")]
    Halted,
    #[serde(rename = "completed")]
    Completed,
    /// Fallback for status values newer than this client
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReleaseStatus::Unspecified => "unspecified",
            ReleaseStatus::Draft => "draft",
            ReleaseStatus::InProgress => "inProgress",
            ReleaseStatus::Halted => "halted",
            ReleaseStatus::Completed => "completed",
            ReleaseStatus::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Release {
    pub name: Option<String>,
    pub status: ReleaseStatus,
    /// Fraction of users receiving the release (0.0 to 1.0); absent for
    /// drafts and full releases
    #[serde(rename = "userFraction")]
    pub user_fraction: Option<f64>,
    #[serde(
        rename = "versionCodes",
        deserialize_with = "deserialize_version_codes",
        default
    )]
    pub version_codes: Vec<String>,
    #[serde(rename = "releaseNotes", default)]
    pub release_notes: Vec<LocalizedText>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocalizedText {
    pub language: Option<String>,
    pub text: Option<String>,
}

/// Release metadata for one track, as returned by `edits.tracks.get`
#[derive(Debug, Deserialize, Clone)]
pub struct TrackInfo {
    pub track: Option<String>,
    #[serde(default)]
    pub releases: Vec<Release>,
}
