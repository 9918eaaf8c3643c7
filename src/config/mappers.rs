use std::time::Duration;

use itertools::Itertools;

use crate::config::models::{self, SettingFile};
use crate::constants::COMMAND_SEPARATOR;
use crate::core::domain::{self, Case, RunConfig};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("`concurrency` must be at least 1")]
    ZeroConcurrency,
    #[error("`{field}` must list at least one command")]
    NoCommands { field: String },
    #[error("`timeoutMs` must be greater than 0")]
    ZeroTimeout,
}

impl TryFrom<SettingFile> for RunConfig {
    type Error = ConversionError;

    fn try_from(setting: SettingFile) -> Result<Self, ConversionError> {
        if setting.concurrency == 0 {
            return Err(ConversionError::ZeroConcurrency);
        }
        let stage_timeout = match setting.timeout_ms {
            Some(0) => return Err(ConversionError::ZeroTimeout),
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        };

        Ok(Self {
            cases: setting
                .files
                .into_iter()
                .map(|files| Case::new(files.input, files.output))
                .collect(),
            solver_command: concat_commands(&setting.solver, "solver")?,
            scorer_command: concat_commands(&setting.scoring, "scoring")?,
            concurrency: setting.concurrency,
            stage_timeout,
            score_policy: setting.score_policy.into(),
        })
    }
}

impl From<models::ScorePolicySetting> for domain::ScorePolicy {
    fn from(policy: models::ScorePolicySetting) -> Self {
        match policy {
            models::ScorePolicySetting::Strict => domain::ScorePolicy::Strict,
            models::ScorePolicySetting::Lenient => domain::ScorePolicy::Lenient,
        }
    }
}

/// Joins the configured commands so each one runs only if the previous
/// one succeeded.
fn concat_commands(commands: &[String], field: &str) -> Result<String, ConversionError> {
    let commands = commands
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect_vec();

    if commands.is_empty() {
        return Err(ConversionError::NoCommands {
            field: field.to_string(),
        });
    }

    Ok(commands.join(COMMAND_SEPARATOR))
}
