use std::path::Path;
use std::time::Duration;

/// Captured outcome of a child process that ran to completion.
#[derive(Clone, Debug, Default)]
pub struct RunResult {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub execution_time_ms: u64,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum RunError {
    #[error("process exceeded the {limit_ms} ms deadline")]
    TimedOut { limit_ms: u64 },
    #[error("failed to launch process: {msg}")]
    Launch { msg: String },
}

/// Runs one shell command with `IN_PATH` and `OUT_PATH` exported to the child.
#[mockall::automock]
#[async_trait::async_trait]
pub trait ProcessRunner: std::fmt::Debug + Send + Sync {
    async fn run(
        &self,
        command: &str,
        in_path: &Path,
        out_path: &Path,
        deadline: Option<Duration>,
    ) -> Result<RunResult, RunError>;
}
