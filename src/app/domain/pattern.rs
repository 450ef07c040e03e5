use serde::{Deserialize, Serialize};

/// Algorithmic pattern names the detector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternType {
    #[serde(rename = "Two Pointers")]
    TwoPointers,
    #[serde(rename = "Sliding Window")]
    SlidingWindow,
    #[serde(rename = "Binary Search")]
    BinarySearch,
    #[serde(rename = "DFS")]
    Dfs,
    #[serde(rename = "BFS")]
    Bfs,
    #[serde(rename = "Dynamic Programming")]
    DynamicProgramming,
    Backtracking,
    Greedy,
    #[serde(rename = "Divide and Conquer")]
    DivideAndConquer,
    #[serde(rename = "Fast & Slow Pointers")]
    FastSlowPointers,
    #[serde(rename = "Merge Intervals")]
    MergeIntervals,
    #[serde(rename = "Cyclic Sort")]
    CyclicSort,
    #[serde(rename = "Top K Elements")]
    TopKElements,
    #[serde(rename = "Modified Binary Search")]
    ModifiedBinarySearch,
    Subsets,
    #[serde(rename = "Tree Traversal")]
    TreeTraversal,
    #[serde(rename = "Graph Traversal")]
    GraphTraversal,
    Heap,
    Trie,
    #[serde(rename = "Union Find")]
    UnionFind,
}

impl PatternType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TwoPointers => "Two Pointers",
            Self::SlidingWindow => "Sliding Window",
            Self::BinarySearch => "Binary Search",
            Self::Dfs => "DFS",
            Self::Bfs => "BFS",
            Self::DynamicProgramming => "Dynamic Programming",
            Self::Backtracking => "Backtracking",
            Self::Greedy => "Greedy",
            Self::DivideAndConquer => "Divide and Conquer",
            Self::FastSlowPointers => "Fast & Slow Pointers",
            Self::MergeIntervals => "Merge Intervals",
            Self::CyclicSort => "Cyclic Sort",
            Self::TopKElements => "Top K Elements",
            Self::ModifiedBinarySearch => "Modified Binary Search",
            Self::Subsets => "Subsets",
            Self::TreeTraversal => "Tree Traversal",
            Self::GraphTraversal => "Graph Traversal",
            Self::Heap => "Heap",
            Self::Trie => "Trie",
            Self::UnionFind => "Union Find",
        }
    }

    pub fn all() -> &'static [PatternType] {
        &[
            Self::TwoPointers,
            Self::SlidingWindow,
            Self::BinarySearch,
            Self::Dfs,
            Self::Bfs,
            Self::DynamicProgramming,
            Self::Backtracking,
            Self::Greedy,
            Self::DivideAndConquer,
            Self::FastSlowPointers,
            Self::MergeIntervals,
            Self::CyclicSort,
            Self::TopKElements,
            Self::ModifiedBinarySearch,
            Self::Subsets,
            Self::TreeTraversal,
            Self::GraphTraversal,
            Self::Heap,
            Self::Trie,
            Self::UnionFind,
        ]
    }
}

/// A detected code region. Purely advisory; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    /// 0-100
    pub confidence: u8,
    /// 1-based, inclusive
    pub line_start: u32,
    /// 1-based, inclusive
    pub line_end: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Pattern {
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.pattern_type.display_name(), self.confidence)
    }

    pub fn line_count(&self) -> u32 {
        self.line_end.saturating_sub(self.line_start) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDetectionResult {
    pub patterns: Vec<Pattern>,
    /// Unix seconds
    pub detected_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snapshot: Option<String>,
}
