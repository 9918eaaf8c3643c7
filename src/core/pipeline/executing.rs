use std::sync::Arc;
use std::time::Duration;

use crate::core::{
    domain::{Case, CaseResult, CaseState, FailureKind, RunConfig, ScorePolicy},
    scoring::{extract_score, parse_score},
    traits::runner::{ProcessRunner, RunError, RunResult},
};

/// Runs the solver and then the scorer for a single case.
#[derive(Debug)]
pub struct CaseExecutor {
    runner: Arc<dyn ProcessRunner>,
    solver_command: String,
    scorer_command: String,
    stage_timeout: Option<Duration>,
    score_policy: ScorePolicy,
}

impl CaseExecutor {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: &RunConfig) -> Self {
        Self {
            runner,
            solver_command: config.solver_command.clone(),
            scorer_command: config.scorer_command.clone(),
            stage_timeout: config.stage_timeout,
            score_policy: config.score_policy,
        }
    }

    /// Every failure ends up in the returned state; this never errors.
    #[tracing::instrument(skip_all, fields(in_path = %case.in_path.display()))]
    pub async fn execute(&self, case: &Case) -> CaseResult {
        tracing::debug!("Start solving");
        let solved = self.run_stage(&self.solver_command, case).await;
        let exec_ms_time = match &solved {
            Ok(result) => result.execution_time_ms,
            Err(_) => 0,
        };

        if let Err((kind, detail)) = solved {
            tracing::debug!("Solver failed: {:?}", kind);
            return CaseResult::failed(case, CaseState::SolverFailed(kind), detail, exec_ms_time);
        }

        tracing::debug!("Start scoring");
        let scored = match self.run_stage(&self.scorer_command, case).await {
            Ok(scored) => scored,
            Err((kind, detail)) => {
                tracing::debug!("Scorer failed: {:?}", kind);
                return CaseResult::failed(
                    case,
                    CaseState::ScoringFailed(kind),
                    detail,
                    exec_ms_time,
                );
            }
        };

        match self.score_policy {
            ScorePolicy::Strict => match parse_score(&scored.stdout) {
                Ok(score) => CaseResult::succeeded(case, score, exec_ms_time),
                Err(e) => {
                    tracing::warn!("Malformed scorer output: {}", e);
                    CaseResult::failed(
                        case,
                        CaseState::ScoreMalformed,
                        e.to_string(),
                        exec_ms_time,
                    )
                }
            },
            ScorePolicy::Lenient => {
                CaseResult::succeeded(case, extract_score(&scored.stdout), exec_ms_time)
            }
        }
    }

    async fn run_stage(
        &self,
        command: &str,
        case: &Case,
    ) -> Result<RunResult, (FailureKind, String)> {
        let result = self
            .runner
            .run(command, &case.in_path, &case.out_path, self.stage_timeout)
            .await
            .map_err(|e| match e {
                RunError::TimedOut { limit_ms } => {
                    (FailureKind::TimedOut { limit_ms }, e.to_string())
                }
                RunError::Launch { .. } => {
                    tracing::error!("Internal error while running stage: {}", e);
                    (FailureKind::Launch, e.to_string())
                }
            })?;

        if result.success() {
            Ok(result)
        } else {
            Err((
                FailureKind::NonZeroExit {
                    code: result.status,
                },
                result.stderr,
            ))
        }
    }
}
