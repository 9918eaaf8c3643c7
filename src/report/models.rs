use serde::Serialize;

/// On-disk shape of the report.
#[derive(Clone, Debug, Serialize)]
pub struct ReportDocument {
    pub state: String,
    pub date: String,
    pub score: ScoreDocument,
    pub detailed: Vec<CaseDocument>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScoreDocument {
    pub ave: f64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDocument {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub in_filepath: String,
    pub out_filepath: String,
    pub error_code: String,
    pub score: f64,
    pub exec_ms_time: u64,
    pub memory_used: u64,
}
