use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityBreakdown {
    pub line_start: u32,
    pub line_end: u32,
    pub time: String,
    pub space: String,
    pub explanation: String,
}

/// Time/space cost in Big-O notation, e.g. `O(n log n)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complexity {
    pub time: String,
    pub space: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub breakdown: Vec<ComplexityBreakdown>,
}

impl Complexity {
    /// One-line summary for badges and status bars.
    pub fn summary(&self) -> String {
        format!("Time {} \u{2022} Space {}", self.time, self.space)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    pub overall: Complexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_case: Option<Complexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_case: Option<Complexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_case: Option<Complexity>,
    /// Unix seconds
    pub analyzed_at: i64,
}
