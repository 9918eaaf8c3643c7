use std::path::{Path, PathBuf};
use std::process::Stdio;

use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::{Duration, Instant, timeout};

use crate::constants::{IN_PATH_VAR, OUT_PATH_VAR};
use crate::core::traits::runner::{ProcessRunner, RunError, RunResult};

/// Runs commands through a POSIX shell so that `&&` chains and redirections
/// in the configured templates behave as written.
#[derive(Clone, Debug)]
pub struct ShellRunner {
    shell_path: PathBuf,
}

impl ShellRunner {
    pub fn new<T: AsRef<Path>>(shell_path: T) -> Self {
        ShellRunner {
            shell_path: shell_path.as_ref().into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        ShellRunner::new("/bin/sh")
    }
}

#[async_trait::async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(
        &self,
        command: &str,
        in_path: &Path,
        out_path: &Path,
        deadline: Option<Duration>,
    ) -> Result<RunResult, RunError> {
        let mut child = Command::new(&self.shell_path)
            .arg("-c")
            .arg(command)
            .env(IN_PATH_VAR, in_path)
            .env(OUT_PATH_VAR, out_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunError::Launch {
                msg: format!("Failed to spawn {:?}: {}", self.shell_path, e),
            })?;

        let start_time = Instant::now();
        let pgid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let finished = {
            let running = async {
                tokio::try_join!(child.wait(), read_pipe(stdout), read_pipe(stderr))
            };
            match deadline {
                Some(limit) => timeout(limit, running).await.ok(),
                None => Some(running.await),
            }
        };

        let Some(finished) = finished else {
            // The shell leads its own group, so this also takes down
            // everything it forked.
            kill_process_group(pgid);
            if let Err(e) = child.wait().await {
                tracing::warn!("Failed to reap timed out process: {}", e);
            }
            return Err(RunError::TimedOut {
                limit_ms: deadline.map_or(0, |limit| limit.as_millis() as u64),
            });
        };

        let (status, stdout, stderr) = finished.map_err(|e| RunError::Launch {
            msg: format!("Failed to wait for process: {}", e),
        })?;

        Ok(RunResult {
            status: status.code(),
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
            execution_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

fn kill_process_group(pgid: Option<u32>) {
    let Some(pgid) = pgid else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        tracing::warn!("Failed to kill process group {}: {}", pgid, e);
    }
}
