//! Host-view state: the code being edited and what the backend said about it.
//!
//! Requests are started with a `begin_*` call, which snapshots what the
//! backend needs and raises the matching busy flag, and completed with the
//! `finish_*` call once the response arrives on the UI thread.

use crate::app::domain::{
    Complexity, ComplexityAnalysis, ExecutionRequest, ExecutionResult, Hint, HintSystem, Pattern,
    PatternDetectionResult, SupportedLanguage,
};

pub const SAMPLE_PROBLEM_ID: &str = "two-sum";

pub const SAMPLE_CODE: &str = "// Two Sum - Classic Interview Problem
function twoSum(nums, target) {
  const seen = new Map();

  for (let i = 0; i < nums.length; i++) {
    const complement = target - nums[i];

    if (seen.has(complement)) {
      return [seen.get(complement), i];
    }

    seen.set(nums[i], i);
  }

  return [];
}

// Test
console.log(twoSum([2, 7, 11, 15], 9)); // [0, 1]";

/// Edit counter at the time a request was made.
pub type Revision = u64;

/// Response payload as it crosses the message channel.
pub type Response<T> = std::result::Result<T, String>;

#[derive(Debug, Clone)]
pub struct Workbench {
    code: String,
    revision: Revision,
    language: SupportedLanguage,
    problem_id: String,
    patterns: Vec<Pattern>,
    selected_pattern: Option<usize>,
    complexity: Option<Complexity>,
    test_results: Option<ExecutionResult>,
    hints: Option<HintSystem>,
    hint_overlay_open: bool,
    detecting: bool,
    executing: bool,
    analyzing: bool,
    last_error: Option<String>,
}

impl Workbench {
    pub fn new(code: &str, language: SupportedLanguage, problem_id: &str) -> Self {
        Self {
            code: code.to_string(),
            revision: 0,
            language,
            problem_id: problem_id.to_string(),
            patterns: Vec::new(),
            selected_pattern: None,
            complexity: None,
            test_results: None,
            hints: None,
            hint_overlay_open: false,
            detecting: false,
            executing: false,
            analyzing: false,
            last_error: None,
        }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_CODE, SupportedLanguage::Javascript, SAMPLE_PROBLEM_ID)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn complexity(&self) -> Option<&Complexity> {
        self.complexity.as_ref()
    }

    pub fn test_results(&self) -> Option<&ExecutionResult> {
        self.test_results.as_ref()
    }

    pub fn hints(&self) -> Option<&HintSystem> {
        self.hints.as_ref()
    }

    pub fn is_hint_overlay_open(&self) -> bool {
        self.hint_overlay_open
    }

    pub fn is_detecting(&self) -> bool {
        self.detecting
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Content notification from the editor.
    pub fn on_code_changed(&mut self, code: &str) {
        self.code = code.to_string();
        self.revision += 1;
    }

    pub fn set_language(&mut self, language: SupportedLanguage) {
        self.language = language;
    }

    /// True when the code has been edited since `revision`.
    pub fn is_stale(&self, revision: Revision) -> bool {
        revision != self.revision
    }

    pub fn begin_detection(&mut self) -> (String, Revision) {
        self.detecting = true;
        (self.code.clone(), self.revision)
    }

    /// Store the detected patterns. Returns them so the caller can decorate
    /// the editor; a failure keeps the previous patterns.
    pub fn finish_detection(&mut self, revision: Revision, result: Response<PatternDetectionResult>) -> &[Pattern] {
        self.detecting = false;
        match result {
            Ok(detection) => {
                if self.is_stale(revision) {
                    tracing::debug!(revision, current = self.revision, "patterns describe an older edit");
                }
                self.patterns = detection.patterns;
                self.selected_pattern = None;
                self.last_error = None;
            }
            Err(e) => self.fail("pattern detection", e),
        }
        &self.patterns
    }

    pub fn clear_patterns(&mut self) {
        self.patterns.clear();
        self.selected_pattern = None;
    }

    /// Pick one detected pattern to highlight on its own.
    pub fn select_pattern(&mut self, index: usize) -> Option<&Pattern> {
        if index < self.patterns.len() {
            self.selected_pattern = Some(index);
        }
        self.selected_pattern.and_then(|i| self.patterns.get(i))
    }

    pub fn selected_pattern(&self) -> Option<&Pattern> {
        self.selected_pattern.and_then(|i| self.patterns.get(i))
    }

    pub fn begin_execution(&mut self) -> ExecutionRequest {
        self.executing = true;
        ExecutionRequest {
            code: self.code.clone(),
            language: self.language,
            test_cases: None,
        }
    }

    pub fn finish_execution(&mut self, result: Response<ExecutionResult>) {
        self.executing = false;
        match result {
            Ok(execution) => {
                self.test_results = Some(execution);
                self.last_error = None;
            }
            Err(e) => self.fail("execution", e),
        }
    }

    pub fn begin_analysis(&mut self) -> String {
        self.analyzing = true;
        self.code.clone()
    }

    pub fn finish_analysis(&mut self, result: Response<ComplexityAnalysis>) {
        self.analyzing = false;
        match result {
            Ok(analysis) => {
                self.complexity = Some(analysis.overall);
                self.last_error = None;
            }
            Err(e) => self.fail("complexity analysis", e),
        }
    }

    /// Hints arrived: reset to level 1 and open the overlay.
    pub fn open_hints(&mut self, result: Response<Vec<Hint>>) {
        match result {
            Ok(hints) => {
                self.hints = Some(HintSystem::new(hints, Some(self.problem_id.clone())));
                self.hint_overlay_open = true;
                self.last_error = None;
            }
            Err(e) => self.fail("hints", e),
        }
    }

    pub fn close_hints(&mut self) {
        self.hint_overlay_open = false;
    }

    pub fn next_hint(&mut self) -> bool {
        self.hints.as_mut().is_some_and(HintSystem::next)
    }

    pub fn previous_hint(&mut self) -> bool {
        self.hints.as_mut().is_some_and(HintSystem::previous)
    }

    fn fail(&mut self, what: &str, error: String) {
        tracing::warn!(request = what, error = %error, "backend request failed");
        self.last_error = Some(format!("{} failed: {}", what, error));
    }

    /// One-line summary for the status bar.
    pub fn status_line(&self) -> String {
        let mut parts = Vec::new();
        if self.detecting {
            parts.push("Detecting patterns...".to_string());
        }
        if self.executing {
            parts.push("Running tests...".to_string());
        }
        if self.analyzing {
            parts.push("Analyzing complexity...".to_string());
        }
        if parts.is_empty() {
            if let Some(error) = &self.last_error {
                return error.clone();
            }
            parts.push(format!(
                "{} \u{2022} {} line(s)",
                self.language.display_name(),
                self.code.lines().count()
            ));
            if !self.patterns.is_empty() {
                parts.push(format!("{} pattern(s)", self.patterns.len()));
            }
            if let Some(complexity) = &self.complexity {
                parts.push(complexity.summary());
            }
            if let Some(results) = &self.test_results {
                parts.push(format!(
                    "Tests {}/{}",
                    results.passed_count,
                    results.results.len()
                ));
            }
        }
        parts.join("  |  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::mock::{Latency, MockAnalysisService};
    use crate::app::services::AnalysisBackend;

    fn backend() -> MockAnalysisService {
        MockAnalysisService::new(Latency::none())
    }

    #[test]
    fn test_sample_defaults() {
        let bench = Workbench::sample();
        assert!(bench.code().starts_with("// Two Sum"));
        assert_eq!(bench.problem_id(), "two-sum");
        assert_eq!(bench.revision(), 0);
        assert!(!bench.is_hint_overlay_open());
    }

    #[test]
    fn test_detection_round_trip() {
        let mut bench = Workbench::sample();
        let (code, revision) = bench.begin_detection();
        assert!(bench.is_detecting());
        assert!(bench.status_line().contains("Detecting"));

        let result = backend().detect_patterns(&code).map_err(|e| e.to_string());
        let patterns = bench.finish_detection(revision, result);
        assert_eq!(patterns.len(), 3);
        assert!(!bench.is_detecting());
        assert!(bench.status_line().contains("3 pattern(s)"));
    }

    #[test]
    fn test_edits_make_requests_stale() {
        let mut bench = Workbench::sample();
        let (_, revision) = bench.begin_detection();
        bench.on_code_changed("const y = 2;");

        assert!(bench.is_stale(revision));
        assert_eq!(bench.code(), "const y = 2;");
        assert!(!bench.is_stale(bench.revision()));
    }

    #[test]
    fn test_failure_keeps_previous_state_and_clears_busy() {
        let mut bench = Workbench::sample();
        let (code, revision) = bench.begin_detection();
        let ok = backend().detect_patterns(&code).map_err(|e| e.to_string());
        bench.finish_detection(revision, ok);

        let (_, revision) = bench.begin_detection();
        bench.finish_detection(revision, Err("offline".to_string()));

        assert!(!bench.is_detecting());
        assert_eq!(bench.patterns().len(), 3);
        assert_eq!(bench.last_error(), Some("pattern detection failed: offline"));
        assert_eq!(bench.status_line(), "pattern detection failed: offline");
    }

    #[test]
    fn test_execution_and_analysis() {
        let backend = backend();
        let mut bench = Workbench::sample();

        let request = bench.begin_execution();
        assert_eq!(request.language, SupportedLanguage::Javascript);
        assert!(request.test_cases.is_none());
        bench.finish_execution(backend.execute(&request).map_err(|e| e.to_string()));
        assert!(!bench.is_executing());
        assert!(bench.test_results().unwrap().success);

        let code = bench.begin_analysis();
        bench.finish_analysis(backend.analyze_complexity(&code).map_err(|e| e.to_string()));
        assert_eq!(bench.complexity().unwrap().time, "O(n)");
        assert!(bench.status_line().contains("Tests 3/3"));
    }

    #[test]
    fn test_hint_overlay_navigation() {
        let mut bench = Workbench::sample();
        assert!(!bench.next_hint());

        let hints = backend().all_hints(Some(bench.problem_id())).map_err(|e| e.to_string());
        bench.open_hints(hints);
        assert!(bench.is_hint_overlay_open());
        assert_eq!(bench.hints().unwrap().current_level(), 1);

        assert!(!bench.previous_hint());
        for _ in 0..3 {
            assert!(bench.next_hint());
        }
        assert!(!bench.next_hint());
        assert_eq!(bench.hints().unwrap().current_level(), 4);

        bench.close_hints();
        assert!(!bench.is_hint_overlay_open());
    }

    #[test]
    fn test_select_pattern() {
        let mut bench = Workbench::sample();
        let (code, revision) = bench.begin_detection();
        bench.finish_detection(revision, backend().detect_patterns(&code).map_err(|e| e.to_string()));

        assert_eq!(bench.select_pattern(1).unwrap().line_start, 3);
        // Out of range keeps the current selection.
        assert_eq!(bench.select_pattern(9).unwrap().line_start, 3);
        bench.clear_patterns();
        assert!(bench.selected_pattern().is_none());
    }
}
