use serde::{Deserialize, Serialize};

/// Languages the editor and the execution backend accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    #[default]
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    Csharp,
    Go,
    Rust,
}

impl SupportedLanguage {
    /// Identifier understood by the editor widget.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Csharp => "csharp",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Javascript => "JavaScript",
            Self::Typescript => "TypeScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::Csharp => "C#",
            Self::Go => "Go",
            Self::Rust => "Rust",
        }
    }

    pub fn all() -> &'static [SupportedLanguage] {
        &[
            Self::Javascript,
            Self::Typescript,
            Self::Python,
            Self::Java,
            Self::Cpp,
            Self::Csharp,
            Self::Go,
            Self::Rust,
        ]
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|lang| lang.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub input: String,
    pub expected: String,
    /// Hidden cases are run but not shown to the user.
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: SupportedLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<TestCase>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_used_mb: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub results: Vec<TestResult>,
    pub success: bool,
    pub passed_count: usize,
    pub failed_count: usize,
    pub total_execution_time_ms: u32,
    /// Unix seconds
    pub executed_at: i64,
    #[serde(default)]
    pub console_output: Vec<String>,
}

impl ExecutionResult {
    /// Build the aggregate view from per-case results.
    pub fn from_results(results: Vec<TestResult>, executed_at: i64) -> Self {
        let passed_count = results.iter().filter(|r| r.passed).count();
        let failed_count = results.len() - passed_count;
        let total_execution_time_ms = results
            .iter()
            .map(|r| r.execution_time_ms.unwrap_or(0))
            .sum();
        let console_output = vec![
            "Running tests...".to_string(),
            format!("Passed: {}/{}", passed_count, results.len()),
        ];

        Self {
            results,
            success: failed_count == 0,
            passed_count,
            failed_count,
            total_execution_time_ms,
            executed_at,
            console_output,
        }
    }
}
