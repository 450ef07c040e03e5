//! Domain layer - plain data shared by the editor, the backend and the UI.
//!
//! - Theme profiles, palettes and typography
//! - Detected patterns and progressive hints
//! - Execution requests/results and complexity analysis

pub mod complexity;
pub mod execution;
pub mod hint;
pub mod pattern;
pub mod theme;

pub use complexity::{Complexity, ComplexityAnalysis, ComplexityBreakdown};
pub use execution::{ExecutionRequest, ExecutionResult, SupportedLanguage, TestCase, TestResult};
pub use hint::{Hint, HintLevel, HintSystem};
pub use pattern::{Pattern, PatternDetectionResult, PatternType};
pub use theme::{
    AnimationConfig, AnimationSpeed, ColorPalette, ProfileColors, TextStyle, ThemeMode,
    ThemeProfile, TypeScale, TypographyConfig,
};
