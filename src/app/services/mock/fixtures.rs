//! Canned responses served by the mock backend.

use crate::app::domain::{
    Complexity, ComplexityBreakdown, Hint, HintLevel, Pattern, PatternType, TestCase, TestResult,
};

pub fn patterns() -> Vec<Pattern> {
    let pattern = |pattern_type, confidence, line_start, line_end, description: &str, color: &str| Pattern {
        pattern_type,
        confidence,
        line_start,
        line_end,
        description: description.to_string(),
        color: Some(color.to_string()),
    };

    vec![
        pattern(
            PatternType::TwoPointers,
            95,
            8,
            15,
            "Detected opposing directional iteration pattern",
            "#D4A574",
        ),
        pattern(
            PatternType::SlidingWindow,
            87,
            3,
            7,
            "Fixed-size window iteration detected",
            "#7FB069",
        ),
        pattern(
            PatternType::BinarySearch,
            92,
            10,
            20,
            "Divide and conquer search pattern",
            "#6B9AC4",
        ),
    ]
}

fn hint(level: HintLevel, content: &str, code_snippet: Option<&str>) -> Hint {
    Hint {
        level,
        content: content.to_string(),
        code_snippet: code_snippet.map(str::to_string),
        diagram: None,
        revealed: false,
    }
}

const TWO_SUM_SOLUTION: &str = "function twoSum(nums, target) {
  const seen = new Map();

  for (let i = 0; i < nums.length; i++) {
    const complement = target - nums[i];

    if (seen.has(complement)) {
      return [seen.get(complement), i];
    }

    seen.set(nums[i], i);
  }

  return [];
}";

const REVERSE_STRING_SOLUTION: &str = "function reverseString(s) {
  let left = 0;
  let right = s.length - 1;

  while (left < right) {
    [s[left], s[right]] = [s[right], s[left]];
    left++;
    right--;
  }
}";

/// Four progressive hints per known problem, or `None` for an unknown id.
pub fn hints(problem_id: &str) -> Option<Vec<Hint>> {
    match problem_id {
        "two-sum" => Some(vec![
            hint(
                HintLevel::Concept,
                "Think about how you can avoid checking every pair of numbers. What data structure allows O(1) lookups?",
                None,
            ),
            hint(
                HintLevel::Approach,
                "Use a hash map to store numbers you've seen. For each number, check if its complement exists in the map.",
                None,
            ),
            hint(
                HintLevel::Structure,
                "Iterate through the array once. For each number, calculate target - number and check if it exists in your hash map.",
                Some("const seen = new Map();\nfor (let i = 0; i < nums.length; i++) {\n  const complement = target - nums[i];\n  // ...\n}"),
            ),
            hint(HintLevel::Solution, "Complete solution approach:", Some(TWO_SUM_SOLUTION)),
        ]),
        "reverse-string" => Some(vec![
            hint(
                HintLevel::Concept,
                "This is a classic two pointers problem. How can you swap elements from both ends moving inward?",
                None,
            ),
            hint(
                HintLevel::Approach,
                "Use two pointers: one at the start (left) and one at the end (right). Swap and move them toward each other.",
                None,
            ),
            hint(
                HintLevel::Structure,
                "Initialize left = 0, right = length - 1. While left < right, swap s[left] with s[right], then increment left and decrement right.",
                Some("let left = 0, right = s.length - 1;\nwhile (left < right) {\n  // swap s[left] and s[right]\n}"),
            ),
            hint(HintLevel::Solution, "Complete solution:", Some(REVERSE_STRING_SOLUTION)),
        ]),
        _ => None,
    }
}

pub fn test_cases(problem_id: &str) -> Option<Vec<TestCase>> {
    let case = |id: &str, input: &str, expected: &str| TestCase {
        id: id.to_string(),
        input: input.to_string(),
        expected: expected.to_string(),
        hidden: false,
    };

    match problem_id {
        "two-sum" => Some(vec![
            case("1", "[2,7,11,15], target=9", "[0,1]"),
            case("2", "[3,2,4], target=6", "[1,2]"),
            case("3", "[3,3], target=6", "[0,1]"),
        ]),
        "reverse-string" => Some(vec![
            case("1", r#"["h","e","l","l","o"]"#, r#"["o","l","l","e","h"]"#),
            case("2", r#"["H","a","n","n","a","h"]"#, r#"["h","a","n","n","a","H"]"#),
        ]),
        _ => None,
    }
}

fn result(id: &str, input: &str, expected: &str, actual: &str, time_ms: u32, memory_mb: f32) -> TestResult {
    TestResult {
        id: id.to_string(),
        input: input.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
        passed: expected == actual,
        execution_time_ms: Some(time_ms),
        memory_used_mb: Some(memory_mb),
        error_message: None,
        stack_trace: None,
    }
}

pub fn passing_results() -> Vec<TestResult> {
    vec![
        result("1", "[2,7,11,15], target=9", "[0,1]", "[0,1]", 12, 2.3),
        result("2", "[3,2,4], target=6", "[1,2]", "[1,2]", 8, 2.1),
        result("3", "[3,3], target=6", "[0,1]", "[0,1]", 6, 2.0),
    ]
}

/// Same cases as `passing_results`, with the second one failing.
pub fn mixed_results() -> Vec<TestResult> {
    let mut results = passing_results();
    let failed = &mut results[1];
    failed.actual = "[2,1]".to_string();
    failed.passed = false;
    failed.error_message = Some("Expected [1,2] but got [2,1]".to_string());
    results
}

pub fn linear_complexity() -> Complexity {
    Complexity {
        time: "O(n)".to_string(),
        space: "O(n)".to_string(),
        explanation: Some("Single pass through array with hash map storage".to_string()),
        breakdown: vec![ComplexityBreakdown {
            line_start: 5,
            line_end: 12,
            time: "O(n)".to_string(),
            space: "O(n)".to_string(),
            explanation: "Loop iterates n times, hash map stores up to n elements".to_string(),
        }],
    }
}

pub fn quadratic_complexity() -> Complexity {
    Complexity {
        time: "O(n²)".to_string(),
        space: "O(1)".to_string(),
        explanation: Some("Nested loops with constant space".to_string()),
        breakdown: vec![ComplexityBreakdown {
            line_start: 3,
            line_end: 8,
            time: "O(n²)".to_string(),
            space: "O(1)".to_string(),
            explanation: "Outer loop runs n times, inner loop runs n times for each iteration"
                .to_string(),
        }],
    }
}
