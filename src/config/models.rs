use serde::Deserialize;

/// On-disk shape of the setting file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingFile {
    pub files: Vec<CaseFiles>,
    pub solver: Vec<String>,
    pub scoring: Vec<String>,
    pub concurrency: usize,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub score_policy: ScorePolicySetting,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CaseFiles {
    #[serde(rename = "in")]
    pub input: String,
    #[serde(rename = "out")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicySetting {
    #[default]
    Strict,
    Lenient,
}
