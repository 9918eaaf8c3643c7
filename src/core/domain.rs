use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub in_path: PathBuf,
    pub out_path: PathBuf,
}

impl Case {
    pub fn new<T, U>(in_path: T, out_path: U) -> Self
    where
        T: Into<PathBuf>,
        U: Into<PathBuf>,
    {
        Case {
            in_path: in_path.into(),
            out_path: out_path.into(),
        }
    }
}

/// What to do with a scorer output that carries no `=<number>` trailer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScorePolicy {
    /// The case ends up as [`CaseState::ScoreMalformed`].
    #[default]
    Strict,
    /// The case succeeds with a score of zero.
    Lenient,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub cases: Vec<Case>,
    pub solver_command: String,
    pub scorer_command: String,
    pub concurrency: usize,
    pub stage_timeout: Option<Duration>,
    pub score_policy: ScorePolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    NonZeroExit { code: Option<i32> },
    TimedOut { limit_ms: u64 },
    Launch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseState {
    Succeeded,
    SolverFailed(FailureKind),
    ScoringFailed(FailureKind),
    ScoreMalformed,
}

impl CaseState {
    pub fn is_success(&self) -> bool {
        matches!(self, CaseState::Succeeded)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaseState::Succeeded => "succeeded",
            CaseState::SolverFailed(_) => "solver failed",
            CaseState::ScoringFailed(_) => "scoring failed",
            CaseState::ScoreMalformed => "score malformed",
        }
    }

    pub fn failure(&self) -> Option<&FailureKind> {
        match self {
            CaseState::SolverFailed(kind) | CaseState::ScoringFailed(kind) => Some(kind),
            CaseState::Succeeded | CaseState::ScoreMalformed => None,
        }
    }
}

impl std::fmt::Display for CaseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseResult {
    pub state: CaseState,
    pub in_path: PathBuf,
    pub out_path: PathBuf,
    pub error_detail: String,
    pub score: f64,
    pub exec_ms_time: u64,
    pub memory_used: u64,
}

impl CaseResult {
    pub fn succeeded(case: &Case, score: f64, exec_ms_time: u64) -> Self {
        Self {
            state: CaseState::Succeeded,
            in_path: case.in_path.clone(),
            out_path: case.out_path.clone(),
            error_detail: String::new(),
            score,
            exec_ms_time,
            memory_used: 0,
        }
    }

    pub fn failed(case: &Case, state: CaseState, error_detail: String, exec_ms_time: u64) -> Self {
        Self {
            state,
            in_path: case.in_path.clone(),
            out_path: case.out_path.clone(),
            error_detail,
            score: 0.0,
            exec_ms_time,
            memory_used: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
}

impl Verdict {
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Accepted => "AC",
            Verdict::WrongAnswer => "WA",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreSummary {
    pub average: f64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub verdict: Verdict,
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub score_summary: ScoreSummary,
    pub details: Vec<CaseResult>,
}
