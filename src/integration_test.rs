use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio::fs;
use uuid::Uuid;

use crate::controller::RunController;
use crate::core::domain::{Case, CaseState, FailureKind, RunConfig, ScorePolicy, Verdict};
use crate::native::runner::ShellRunner;

async fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("judge_harness_{}", Uuid::new_v4()));
    fs::create_dir_all(dir.join("in")).await.unwrap();
    fs::create_dir_all(dir.join("out")).await.unwrap();
    dir
}

/// Writes one input file per entry and returns the matching cases.
async fn write_inputs(dir: &Path, inputs: &[&str]) -> Vec<Case> {
    let mut cases = Vec::new();
    for (i, input) in inputs.iter().enumerate() {
        let in_path = dir.join("in").join(format!("{:04}.txt", i));
        let out_path = dir.join("out").join(format!("{:04}.txt", i));
        fs::write(&in_path, input).await.unwrap();
        cases.push(Case::new(in_path, out_path));
    }
    cases
}

fn create_config(cases: Vec<Case>, solver: &[&str], scorer: &[&str]) -> RunConfig {
    RunConfig {
        cases,
        solver_command: solver.join(" && "),
        scorer_command: scorer.join(" && "),
        concurrency: 2,
        stage_timeout: Some(Duration::from_secs(10)),
        score_policy: ScorePolicy::Strict,
    }
}

async fn run(config: RunConfig) -> crate::core::domain::RunReport {
    RunController::new(config, Arc::new(ShellRunner::default()))
        .run()
        .await
}

#[tokio::test]
async fn test_three_cases_accepted() {
    let dir = scratch_dir().await;
    let cases = write_inputs(&dir, &["10", "20", "30"]).await;
    let config = create_config(
        cases.clone(),
        &["cp \"$IN_PATH\" \"$OUT_PATH\""],
        &["echo checking \"$OUT_PATH\"", "echo \"points=$(cat \"$OUT_PATH\")\""],
    );

    let report = run(config).await;

    assert_eq!(report.verdict, Verdict::Accepted);
    assert_eq!(report.score_summary.average, 20.0);
    assert_eq!(report.score_summary.sum, 60.0);
    assert_eq!(report.score_summary.min, 10.0);
    assert_eq!(report.score_summary.max, 30.0);
    assert_eq!(report.details.len(), 3);
    for ((result, case), score) in report.details.iter().zip(&cases).zip([10.0, 20.0, 30.0]) {
        assert_eq!(result.state, CaseState::Succeeded);
        assert_eq!(result.in_path, case.in_path);
        assert_eq!(result.out_path, case.out_path);
        assert_eq!(result.score, score);
    }
}

#[tokio::test]
async fn test_solver_failure_never_runs_scorer() {
    let dir = scratch_dir().await;
    let cases = write_inputs(&dir, &["ok", "fail", "ok"]).await;
    let config = create_config(
        cases.clone(),
        &[
            "grep -q ok \"$IN_PATH\" || { echo \"cannot solve\" >&2; exit 4; }",
            "cp \"$IN_PATH\" \"$OUT_PATH\"",
        ],
        &["touch \"$OUT_PATH.scored\"", "echo score=1"],
    );

    let report = run(config).await;

    assert_eq!(report.verdict, Verdict::WrongAnswer);
    assert_eq!(
        report.details[1].state,
        CaseState::SolverFailed(FailureKind::NonZeroExit { code: Some(4) })
    );
    assert_eq!(report.details[1].error_detail, "cannot solve\n");
    assert!(!Path::new(&format!("{}.scored", cases[1].out_path.display())).exists());
    assert!(Path::new(&format!("{}.scored", cases[0].out_path.display())).exists());
    assert!(Path::new(&format!("{}.scored", cases[2].out_path.display())).exists());
    assert_eq!(report.score_summary.sum, 2.0);
}

#[tokio::test]
async fn test_scorer_failure_reports_stderr() {
    let dir = scratch_dir().await;
    let cases = write_inputs(&dir, &["1"]).await;
    let config = create_config(
        cases,
        &["cp \"$IN_PATH\" \"$OUT_PATH\""],
        &["echo \"bad format\" >&2", "exit 1"],
    );

    let report = run(config).await;

    assert_eq!(report.verdict, Verdict::WrongAnswer);
    assert_eq!(
        report.details[0].state,
        CaseState::ScoringFailed(FailureKind::NonZeroExit { code: Some(1) })
    );
    assert_eq!(report.details[0].error_detail, "bad format\n");
    assert_eq!(report.score_summary.sum, 0.0);
}

#[tokio::test]
async fn test_hung_solver_times_out() {
    let dir = scratch_dir().await;
    let cases = write_inputs(&dir, &["fast", "hang", "fast"]).await;
    let mut config = create_config(
        cases,
        &["grep -q fast \"$IN_PATH\" || sleep 30", "cp \"$IN_PATH\" \"$OUT_PATH\""],
        &["echo points=3"],
    );
    config.stage_timeout = Some(Duration::from_millis(500));

    let started = Instant::now();
    let report = run(config).await;

    assert!(started.elapsed() < Duration::from_secs(20));
    assert_eq!(report.verdict, Verdict::WrongAnswer);
    assert_eq!(
        report.details[1].state,
        CaseState::SolverFailed(FailureKind::TimedOut { limit_ms: 500 })
    );
    assert!(report.details[0].state.is_success());
    assert!(report.details[2].state.is_success());
}

#[tokio::test]
async fn test_malformed_score_output() {
    let dir = scratch_dir().await;
    let cases = write_inputs(&dir, &["1"]).await;
    let config = create_config(cases.clone(), &["true"], &["echo \"all good\""]);

    let report = run(config).await;
    assert_eq!(report.details[0].state, CaseState::ScoreMalformed);
    assert_eq!(report.verdict, Verdict::WrongAnswer);

    let mut config = create_config(cases, &["true"], &["echo \"all good\""]);
    config.score_policy = ScorePolicy::Lenient;

    let report = run(config).await;
    assert_eq!(report.details[0].state, CaseState::Succeeded);
    assert_eq!(report.details[0].score, 0.0);
    assert_eq!(report.verdict, Verdict::Accepted);
}

#[tokio::test]
async fn test_setting_file_to_report_file() {
    let dir = scratch_dir().await;
    let cases = write_inputs(&dir, &["4", "6"]).await;
    let setting_path = dir.join("setting.json");
    let output_path = dir.join("output.json");

    let setting = json!({
        "files": cases
            .iter()
            .map(|c| json!({"in": c.in_path, "out": c.out_path}))
            .collect::<Vec<_>>(),
        "solver": ["cp \"$IN_PATH\" \"$OUT_PATH\""],
        "scoring": ["echo \"score = $(cat \"$OUT_PATH\")\""],
        "concurrency": 2
    });
    fs::write(&setting_path, setting.to_string()).await.unwrap();

    let controller = RunController::from_config_file(&setting_path, Arc::new(ShellRunner::default()))
        .await
        .unwrap();
    controller.run_to_file(&output_path).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).await.unwrap()).unwrap();
    assert_eq!(written["state"], "AC");
    assert_eq!(written["score"]["ave"], 5.0);
    assert_eq!(written["score"]["min"], 4.0);
    assert_eq!(written["score"]["max"], 6.0);
    assert_eq!(written["detailed"].as_array().unwrap().len(), 2);
    assert_eq!(
        written["detailed"][0]["inFilepath"],
        cases[0].in_path.display().to_string()
    );
    assert_eq!(written["detailed"][1]["state"], "succeeded");
    assert_eq!(written["detailed"][1]["memoryUsed"], 0);
    assert!(written["date"].as_str().unwrap().len() == "YYYY:MM:DD HH:MM:SS".len());
}
