use crate::app::controllers::workbench::{Response, Revision};
use crate::app::domain::{
    ComplexityAnalysis, ExecutionResult, Hint, PatternDetectionResult, SupportedLanguage,
};
use crate::app::editor::AdapterState;
use crate::app::theme::EditorScheme;

/// All messages that can be sent through the FLTK channel.
/// Menu callbacks and worker threads send these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    ResetCode,
    FileQuit,
    WindowClose,

    // Editor lifecycle
    LibraryLoaded(std::result::Result<Vec<EditorScheme>, String>),
    LibraryDeadline,
    EditorStateChanged(AdapterState),
    CodeChanged(String),
    SetLanguage(SupportedLanguage),

    // Analysis
    DetectPatterns,
    PatternsDetected(Revision, Response<PatternDetectionResult>),
    SelectPattern(usize),
    ClearHighlights,
    AnalyzeComplexity,
    ComplexityAnalyzed(Response<ComplexityAnalysis>),
    RunTests,
    TestsFinished(Response<ExecutionResult>),

    // Hints
    ShowHints,
    HintsLoaded(Response<Vec<Hint>>),

    // View
    ToggleThemeMode,
    SetThemeProfile(String),

    // Help
    ShowAbout,
}
