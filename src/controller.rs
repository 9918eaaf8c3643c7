use std::path::Path;
use std::sync::Arc;

use tokio::fs;
use uuid::Uuid;

use crate::config::models::SettingFile;
use crate::core::{
    domain::{RunConfig, RunReport},
    pipeline::{aggregating::aggregate, executing::CaseExecutor, scheduling::run_cases},
    traits::runner::ProcessRunner,
};
use crate::errors::HarnessError;
use crate::report::models::ReportDocument;

/// Reads and validates a setting file.
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, HarnessError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .await
        .map_err(|source| HarnessError::ReadSetting {
            path: path.into(),
            source,
        })?;
    let setting: SettingFile =
        serde_json::from_str(&raw).map_err(|source| HarnessError::ParseSetting {
            path: path.into(),
            source,
        })?;

    RunConfig::try_from(setting).map_err(|source| HarnessError::InvalidSetting {
        path: path.into(),
        source,
    })
}

/// Writes the report as indented JSON, creating parent directories as needed.
pub async fn write_report<P: AsRef<Path>>(report: &RunReport, path: P) -> Result<(), HarnessError> {
    let path = path.as_ref();
    let mut document = serde_json::to_string_pretty(&ReportDocument::from(report))?;
    document.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| HarnessError::WriteReport {
                path: path.into(),
                source,
            })?;
    }
    fs::write(path, document)
        .await
        .map_err(|source| HarnessError::WriteReport {
            path: path.into(),
            source,
        })
}

#[derive(Debug)]
pub struct RunController {
    config: RunConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl RunController {
    pub fn new(config: RunConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }

    pub async fn from_config_file<P: AsRef<Path>>(
        path: P,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, HarnessError> {
        Ok(Self::new(load_config(path).await?, runner))
    }

    /// Runs the whole batch. Returns once every case has a result.
    #[tracing::instrument(skip(self), fields(run_id = %Uuid::new_v4()))]
    pub async fn run(&self) -> RunReport {
        tracing::info!(
            "Start run: {} cases, concurrency {}",
            self.config.cases.len(),
            self.config.concurrency
        );
        tracing::debug!("Solver command: {}", self.config.solver_command);
        tracing::debug!("Scorer command: {}", self.config.scorer_command);

        let executor = Arc::new(CaseExecutor::new(self.runner.clone(), &self.config));
        let details = run_cases(&self.config.cases, executor, self.config.concurrency).await;
        let report = aggregate(details);

        tracing::info!(
            "Run completed: {} (sum {}, ave {})",
            report.verdict.code(),
            report.score_summary.sum,
            report.score_summary.average
        );
        report
    }

    pub async fn run_to_file<P: AsRef<Path>>(&self, out_path: P) -> Result<RunReport, HarnessError> {
        let report = self.run().await;
        write_report(&report, out_path.as_ref()).await?;
        tracing::info!("Report written to {}", out_path.as_ref().display());
        Ok(report)
    }
}
