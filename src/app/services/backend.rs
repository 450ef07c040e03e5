use crate::app::domain::{
    ComplexityAnalysis, ExecutionRequest, ExecutionResult, Hint, HintLevel, PatternDetectionResult,
    TestCase,
};
use crate::app::infrastructure::error::Result;

/// Problem used when a request names none, or one the backend does not know.
pub const DEFAULT_PROBLEM_ID: &str = "two-sum";

/// The analysis API the editor talks to. Calls block, so run them off the UI
/// thread (see `BackendClient`).
pub trait AnalysisBackend: Send + Sync {
    fn detect_patterns(&self, code: &str) -> Result<PatternDetectionResult>;

    /// Hint at `level` for `problem_id` (default problem when `None`).
    fn hint(&self, level: HintLevel, problem_id: Option<&str>) -> Result<Hint>;

    fn all_hints(&self, problem_id: Option<&str>) -> Result<Vec<Hint>>;

    /// Public test cases for a problem.
    fn test_cases(&self, problem_id: Option<&str>) -> Result<Vec<TestCase>>;

    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult>;

    fn analyze_complexity(&self, code: &str) -> Result<ComplexityAnalysis>;
}
