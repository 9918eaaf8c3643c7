use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::core::traits::runner::{ProcessRunner, RunError, RunResult};

/// Returns a fixed result after a fixed delay, keeping track of how many
/// calls were running at the same time.
#[derive(Debug)]
pub struct RunnerStub {
    result: Result<RunResult, RunError>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl RunnerStub {
    pub fn new(result: Result<RunResult, RunError>, delay: Duration) -> Self {
        Self {
            result,
            delay,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProcessRunner for RunnerStub {
    #[tracing::instrument(skip(self))]
    async fn run(
        &self,
        command: &str,
        in_path: &Path,
        out_path: &Path,
        deadline: Option<Duration>,
    ) -> Result<RunResult, RunError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        tracing::debug!(
            "Start execution: command={:?}, in_path={:?}, out_path={:?}, deadline={:?}",
            command,
            in_path,
            out_path,
            deadline
        );
        tokio::time::sleep(self.delay).await;
        tracing::debug!("Execution result: {:?}", self.result);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.result.clone()
    }
}
