//! Stand-in backend that answers from fixtures after a fixed delay.
//!
//! Nothing is analysed or executed. Execution alternates between the
//! all-passing and the mixed fixture, and complexity between the linear and
//! the quadratic one, so repeated calls show both outcomes.

pub mod fixtures;

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::app::domain::{
    ComplexityAnalysis, ExecutionRequest, ExecutionResult, Hint, HintLevel, PatternDetectionResult,
    TestCase,
};
use crate::app::infrastructure::error::{AppError, Result};

use super::backend::{AnalysisBackend, DEFAULT_PROBLEM_ID};

/// Artificial delay per call kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub patterns: Duration,
    pub hints: Duration,
    pub execution: Duration,
    pub complexity: Duration,
}

impl Latency {
    pub const fn standard() -> Self {
        Self {
            patterns: Duration::from_millis(500),
            hints: Duration::from_millis(300),
            execution: Duration::from_millis(1000),
            complexity: Duration::from_millis(400),
        }
    }

    pub const fn none() -> Self {
        Self {
            patterns: Duration::ZERO,
            hints: Duration::ZERO,
            execution: Duration::ZERO,
            complexity: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::standard()
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[derive(Debug, Default)]
pub struct MockAnalysisService {
    latency: Latency,
    executions: AtomicU64,
    analyses: AtomicU64,
}

impl MockAnalysisService {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            executions: AtomicU64::new(0),
            analyses: AtomicU64::new(0),
        }
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    fn hints_for(problem_id: Option<&str>) -> Result<Vec<Hint>> {
        let id = problem_id.unwrap_or(DEFAULT_PROBLEM_ID);
        fixtures::hints(id)
            .or_else(|| {
                tracing::debug!(problem = id, "unknown problem, serving default hints");
                fixtures::hints(DEFAULT_PROBLEM_ID)
            })
            .ok_or_else(|| AppError::Backend(format!("no hints for {}", id)))
    }
}

impl AnalysisBackend for MockAnalysisService {
    fn detect_patterns(&self, code: &str) -> Result<PatternDetectionResult> {
        pause(self.latency.patterns);
        let patterns = fixtures::patterns();
        tracing::debug!(count = patterns.len(), chars = code.len(), "detected patterns");
        Ok(PatternDetectionResult {
            patterns,
            detected_at: unix_now(),
            code_snapshot: Some(code.to_string()),
        })
    }

    fn hint(&self, level: HintLevel, problem_id: Option<&str>) -> Result<Hint> {
        pause(self.latency.hints);
        let hints = Self::hints_for(problem_id)?;
        let index = usize::from(level.number()) - 1;
        hints
            .get(index)
            .or_else(|| hints.first())
            .cloned()
            .ok_or_else(|| AppError::Backend("empty hint set".to_string()))
    }

    fn all_hints(&self, problem_id: Option<&str>) -> Result<Vec<Hint>> {
        pause(self.latency.hints);
        Self::hints_for(problem_id)
    }

    fn test_cases(&self, problem_id: Option<&str>) -> Result<Vec<TestCase>> {
        let id = problem_id.unwrap_or(DEFAULT_PROBLEM_ID);
        fixtures::test_cases(id)
            .or_else(|| fixtures::test_cases(DEFAULT_PROBLEM_ID))
            .ok_or_else(|| AppError::Backend(format!("no test cases for {}", id)))
    }

    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        pause(self.latency.execution);
        let run = self.executions.fetch_add(1, Ordering::Relaxed);
        let results = if run % 2 == 0 {
            fixtures::passing_results()
        } else {
            fixtures::mixed_results()
        };

        let result = ExecutionResult::from_results(results, unix_now());
        tracing::debug!(
            language = request.language.id(),
            passed = result.passed_count,
            failed = result.failed_count,
            "executed code"
        );
        Ok(result)
    }

    fn analyze_complexity(&self, code: &str) -> Result<ComplexityAnalysis> {
        pause(self.latency.complexity);
        let run = self.analyses.fetch_add(1, Ordering::Relaxed);
        let complexity = if run % 2 == 0 {
            fixtures::linear_complexity()
        } else {
            fixtures::quadratic_complexity()
        };

        tracing::debug!(time = %complexity.time, chars = code.len(), "analyzed complexity");
        Ok(ComplexityAnalysis {
            overall: complexity.clone(),
            best_case: None,
            average_case: None,
            worst_case: Some(complexity),
            analyzed_at: unix_now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::SupportedLanguage;
    use std::time::Instant;

    fn service() -> MockAnalysisService {
        MockAnalysisService::new(Latency::none())
    }

    fn request() -> ExecutionRequest {
        ExecutionRequest {
            code: "function twoSum() {}".to_string(),
            language: SupportedLanguage::Javascript,
            test_cases: None,
        }
    }

    #[test]
    fn test_detect_patterns_keeps_snapshot() {
        let result = service().detect_patterns("let x = 1;").unwrap();
        assert_eq!(result.patterns.len(), 3);
        assert_eq!(result.code_snapshot.as_deref(), Some("let x = 1;"));
        assert!(result.detected_at > 0);
    }

    #[test]
    fn test_unknown_problem_falls_back_to_default_hints() {
        let service = service();
        let unknown = service.all_hints(Some("does-not-exist")).unwrap();
        let default = service.all_hints(None).unwrap();
        assert_eq!(unknown, default);
        assert_eq!(unknown, fixtures::hints("two-sum").unwrap());
    }

    #[test]
    fn test_hint_by_level() {
        let service = service();
        let hint = service.hint(HintLevel::Structure, Some("reverse-string")).unwrap();
        assert_eq!(hint.level, HintLevel::Structure);
        assert!(hint.content.starts_with("Initialize left = 0"));
    }

    #[test]
    fn test_test_cases() {
        let service = service();
        assert_eq!(service.test_cases(Some("reverse-string")).unwrap().len(), 2);
        assert_eq!(service.test_cases(Some("unknown")).unwrap().len(), 3);
    }

    #[test]
    fn test_execution_alternates_and_aggregates() {
        let service = service();
        let first = service.execute(&request()).unwrap();
        let second = service.execute(&request()).unwrap();

        assert!(first.success);
        assert_eq!((first.passed_count, first.failed_count), (3, 0));
        assert_eq!(first.total_execution_time_ms, 26);

        assert!(!second.success);
        assert_eq!((second.passed_count, second.failed_count), (2, 1));
        assert_eq!(second.console_output, vec!["Running tests...", "Passed: 2/3"]);
    }

    #[test]
    fn test_complexity_alternates() {
        let service = service();
        let first = service.analyze_complexity("").unwrap();
        let second = service.analyze_complexity("").unwrap();
        assert_eq!(first.overall.time, "O(n)");
        assert_eq!(second.overall.time, "O(n²)");
        assert_eq!(second.worst_case.as_ref(), Some(&second.overall));
    }

    #[test]
    fn test_latency_is_applied() {
        let service = MockAnalysisService::new(Latency {
            hints: Duration::from_millis(30),
            ..Latency::none()
        });
        let start = Instant::now();
        service.all_hints(None).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_standard_latency() {
        let latency = Latency::standard();
        assert_eq!(latency.patterns, Duration::from_millis(500));
        assert_eq!(latency.hints, Duration::from_millis(300));
        assert_eq!(latency.execution, Duration::from_millis(1000));
        assert_eq!(latency.complexity, Duration::from_millis(400));
    }
}
