use crate::constants::REPORT_DATE_FORMAT;
use crate::core::domain::{CaseResult, FailureKind, RunReport, ScoreSummary};
use crate::report::models::{CaseDocument, ReportDocument, ScoreDocument};

impl From<&RunReport> for ReportDocument {
    fn from(report: &RunReport) -> Self {
        Self {
            state: report.verdict.code().to_string(),
            date: report.timestamp.format(REPORT_DATE_FORMAT).to_string(),
            score: report.score_summary.into(),
            detailed: report.details.iter().map(Into::into).collect(),
        }
    }
}

impl From<ScoreSummary> for ScoreDocument {
    fn from(summary: ScoreSummary) -> Self {
        Self {
            ave: summary.average,
            sum: summary.sum,
            min: summary.min,
            max: summary.max,
        }
    }
}

impl From<&CaseResult> for CaseDocument {
    fn from(result: &CaseResult) -> Self {
        Self {
            state: result.state.label().to_string(),
            failure: result.state.failure().map(|kind| failure_label(kind).to_string()),
            in_filepath: result.in_path.display().to_string(),
            out_filepath: result.out_path.display().to_string(),
            error_code: result.error_detail.clone(),
            score: result.score,
            exec_ms_time: result.exec_ms_time,
            memory_used: result.memory_used,
        }
    }
}

fn failure_label(kind: &FailureKind) -> &'static str {
    match kind {
        FailureKind::NonZeroExit { .. } => "exit",
        FailureKind::TimedOut { .. } => "timeout",
        FailureKind::Launch => "launch",
    }
}
