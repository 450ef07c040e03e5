use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use fltk::{app, prelude::*};
use tracing_subscriber::EnvFilter;

use pattern_pad::app::infrastructure::preferences::JsonPreferenceStore;
use pattern_pad::app::infrastructure::style_surface::StyleSheet;
use pattern_pad::app::messages::Message;
use pattern_pad::app::services::{BackendClient, Latency, MockAnalysisService};
use pattern_pad::app::state::AppState;
use pattern_pad::app::theme::{ProfileRegistry, ThemeStore};
use pattern_pad::ui::main_window::build_main_window;
use pattern_pad::ui::menu::build_menu;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_logging();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let theme = Rc::new(ThemeStore::new(
        ProfileRegistry::load(),
        Box::new(JsonPreferenceStore::load()),
        Rc::new(RefCell::new(StyleSheet::new())),
    ));
    tracing::info!(
        profile = %theme.current_profile().id,
        mode = theme.current_mode().as_str(),
        "theme restored"
    );

    let widgets = build_main_window(&sender);
    let profiles: Vec<(String, String)> = theme
        .registry()
        .profiles()
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect();
    let mode = theme.current_mode();

    let client = BackendClient::new(Arc::new(MockAnalysisService::new(Latency::standard())));
    let mut state = AppState::new(widgets, sender, theme, client);
    let language = state.workbench.language();
    build_menu(&mut state.menu, &sender, mode, language, &profiles);

    state.window.show();
    state.start_editor();

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                // File
                Message::ResetCode => state.reset_code(),
                Message::FileQuit | Message::WindowClose => {
                    state.shutdown();
                    app.quit();
                }

                // Editor lifecycle
                Message::LibraryLoaded(result) => state.library_loaded(result),
                Message::LibraryDeadline => state.library_deadline(),
                Message::EditorStateChanged(editor_state) => state.editor_state_changed(editor_state),
                Message::CodeChanged(code) => state.code_changed(&code),
                Message::SetLanguage(language) => state.set_language(language),

                // Analysis
                Message::DetectPatterns => state.detect_patterns(),
                Message::PatternsDetected(revision, result) => state.patterns_detected(revision, result),
                Message::SelectPattern(index) => state.select_pattern(index),
                Message::ClearHighlights => state.clear_highlights(),
                Message::AnalyzeComplexity => state.analyze_complexity(),
                Message::ComplexityAnalyzed(result) => state.complexity_analyzed(result),
                Message::RunTests => state.run_tests(),
                Message::TestsFinished(result) => state.tests_finished(result),

                // Hints
                Message::ShowHints => state.show_hints(),
                Message::HintsLoaded(result) => state.hints_loaded(result),

                // View
                Message::ToggleThemeMode => state.toggle_theme_mode(),
                Message::SetThemeProfile(id) => state.set_theme_profile(&id),

                // Help
                Message::ShowAbout => state.show_about(),
            }
        }
    }
}
