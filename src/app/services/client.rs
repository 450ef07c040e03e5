//! Runs backend calls on worker threads.
//!
//! Each request gets its own thread and exactly one answer, delivered by
//! calling `on_done` on that thread. The UI forwards it to the event loop
//! through its message channel. There is no cancellation or timeout: a
//! response for a view that has moved on still arrives and must be ignored by
//! the receiver.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::app::domain::{
    ComplexityAnalysis, ExecutionRequest, ExecutionResult, Hint, HintLevel, PatternDetectionResult,
};
use crate::app::infrastructure::error::Result;

use super::backend::AnalysisBackend;

#[derive(Clone)]
pub struct BackendClient {
    backend: Arc<dyn AnalysisBackend>,
}

impl BackendClient {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn AnalysisBackend> {
        &self.backend
    }

    fn spawn<T, F, D>(&self, name: &'static str, call: F, on_done: D) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: FnOnce(&dyn AnalysisBackend) -> Result<T> + Send + 'static,
        D: FnOnce(Result<T>) + Send + 'static,
    {
        let backend = self.backend.clone();
        thread::spawn(move || {
            let result = call(backend.as_ref());
            if let Err(e) = &result {
                tracing::warn!(request = name, error = %e, "backend request failed");
            }
            on_done(result);
        })
    }

    pub fn detect_patterns<D>(&self, code: String, on_done: D) -> JoinHandle<()>
    where
        D: FnOnce(Result<PatternDetectionResult>) + Send + 'static,
    {
        self.spawn("detect_patterns", move |b| b.detect_patterns(&code), on_done)
    }

    pub fn hint<D>(&self, level: HintLevel, problem_id: Option<String>, on_done: D) -> JoinHandle<()>
    where
        D: FnOnce(Result<Hint>) + Send + 'static,
    {
        self.spawn("hint", move |b| b.hint(level, problem_id.as_deref()), on_done)
    }

    pub fn all_hints<D>(&self, problem_id: Option<String>, on_done: D) -> JoinHandle<()>
    where
        D: FnOnce(Result<Vec<Hint>>) + Send + 'static,
    {
        self.spawn("all_hints", move |b| b.all_hints(problem_id.as_deref()), on_done)
    }

    pub fn execute<D>(&self, request: ExecutionRequest, on_done: D) -> JoinHandle<()>
    where
        D: FnOnce(Result<ExecutionResult>) + Send + 'static,
    {
        self.spawn("execute", move |b| b.execute(&request), on_done)
    }

    pub fn analyze_complexity<D>(&self, code: String, on_done: D) -> JoinHandle<()>
    where
        D: FnOnce(Result<ComplexityAnalysis>) + Send + 'static,
    {
        self.spawn("analyze_complexity", move |b| b.analyze_complexity(&code), on_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{SupportedLanguage, TestCase};
    use crate::app::infrastructure::error::AppError;
    use crate::app::services::mock::{Latency, MockAnalysisService};
    use std::sync::mpsc;

    fn client() -> BackendClient {
        BackendClient::new(Arc::new(MockAnalysisService::new(Latency::none())))
    }

    #[test]
    fn test_detect_patterns_delivers_once() {
        let (tx, rx) = mpsc::channel();
        client()
            .detect_patterns("code".to_string(), move |result| tx.send(result).unwrap())
            .join()
            .unwrap();

        let result = rx.recv().unwrap().unwrap();
        assert_eq!(result.patterns.len(), 3);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_requests_run_concurrently() {
        let client = BackendClient::new(Arc::new(MockAnalysisService::new(Latency {
            hints: std::time::Duration::from_millis(50),
            ..Latency::none()
        })));
        let (tx, rx) = mpsc::channel();

        let handles: Vec<_> = HintLevel::all()
            .iter()
            .map(|level| {
                let tx = tx.clone();
                client.hint(*level, None, move |result| tx.send(result).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(tx);

        let mut levels: Vec<u8> = rx.iter().map(|r| r.unwrap().level.number()).collect();
        levels.sort();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    struct Offline;

    impl AnalysisBackend for Offline {
        fn detect_patterns(&self, _code: &str) -> Result<PatternDetectionResult> {
            Err(AppError::Backend("offline".to_string()))
        }
        fn hint(&self, _level: HintLevel, _problem_id: Option<&str>) -> Result<Hint> {
            Err(AppError::Backend("offline".to_string()))
        }
        fn all_hints(&self, _problem_id: Option<&str>) -> Result<Vec<Hint>> {
            Err(AppError::Backend("offline".to_string()))
        }
        fn test_cases(&self, _problem_id: Option<&str>) -> Result<Vec<TestCase>> {
            Err(AppError::Backend("offline".to_string()))
        }
        fn execute(&self, _request: &ExecutionRequest) -> Result<ExecutionResult> {
            Err(AppError::Backend("offline".to_string()))
        }
        fn analyze_complexity(&self, _code: &str) -> Result<ComplexityAnalysis> {
            Err(AppError::Backend("offline".to_string()))
        }
    }

    #[test]
    fn test_errors_reach_the_callback() {
        let client = BackendClient::new(Arc::new(Offline));
        let (tx, rx) = mpsc::channel();
        let request = ExecutionRequest {
            code: String::new(),
            language: SupportedLanguage::Python,
            test_cases: None,
        };
        client
            .execute(request, move |result| tx.send(result.map_err(|e| e.to_string())).unwrap())
            .join()
            .unwrap();

        assert_eq!(rx.recv().unwrap(), Err("Backend error: offline".to_string()));
    }
}
