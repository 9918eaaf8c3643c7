use std::sync::Arc;

use futures::stream::FuturesUnordered;
use tokio::sync::Semaphore;
use tokio_stream::StreamExt;

use crate::core::{
    domain::{Case, CaseResult, CaseState, FailureKind},
    pipeline::executing::CaseExecutor,
};

/// Runs every case with at most `concurrency` of them in flight and returns
/// the results in case order, whatever order they finished in.
#[tracing::instrument(skip_all, fields(cases = cases.len(), concurrency = concurrency))]
pub async fn run_cases(
    cases: &[Case],
    executor: Arc<CaseExecutor>,
    concurrency: usize,
) -> Vec<CaseResult> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut futures = create_case_futures(cases, &executor, &permits);
    let mut results: Vec<Option<CaseResult>> = vec![None; cases.len()];

    while let Some((case_idx, joined)) = futures.next().await {
        let result = joined.unwrap_or_else(|e| {
            tracing::error!("Worker for case {} crashed: {}", case_idx, e);
            CaseResult::failed(
                &cases[case_idx],
                CaseState::SolverFailed(FailureKind::Launch),
                format!("worker crashed: {}", e),
                0,
            )
        });
        tracing::info!("{} {}", result.in_path.display(), result.state);
        results[case_idx] = Some(result);
    }

    results.into_iter().flatten().collect()
}

/// Each case runs on its own task so that a panic stays with its case.
fn create_case_futures(
    cases: &[Case],
    executor: &Arc<CaseExecutor>,
    permits: &Arc<Semaphore>,
) -> FuturesUnordered<
    impl std::future::Future<Output = (usize, Result<CaseResult, tokio::task::JoinError>)>,
> {
    let futures = FuturesUnordered::new();

    for (case_idx, case) in cases.iter().enumerate() {
        let executor = executor.clone();
        let permits = permits.clone();
        let case = case.clone();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let _permit = permits.acquire_owned().await.ok();
            executor.execute(&case).await
        });

        futures.push(async move { (case_idx, handle.await) });
    }

    futures
}
