use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use fltk::{
    app::{self, Sender},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::controllers::workbench::{Response, Revision, SAMPLE_CODE, Workbench};
use super::domain::{
    ColorPalette, ComplexityAnalysis, ExecutionResult, Hint, PatternDetectionResult,
    SupportedLanguage,
};
use super::editor::{AdapterState, EditorAdapter, EditorConfig, SingleFlight};
use super::messages::Message;
use super::reactive::Subscription;
use super::services::BackendClient;
use super::theme::{EditorScheme, ThemeStore};
use crate::ui::code_editor::{FltkEditorLibrary, load_scheme_catalog};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::hints::show_hint_dialog;
use crate::ui::main_window::MainWidgets;
use crate::ui::menu::DARK_MODE_ITEM;
use crate::ui::panels::SidePanel;
use crate::ui::theme::{ThemedWidgets, apply_palette};

/// Longest the editor library may take to load before the adapter gives up.
pub const LIBRARY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AppState {
    pub window: Window,
    pub menu: MenuBar,
    pub status: Frame,
    pub editor_area: Flex,
    pub placeholder: Frame,
    pub panel: SidePanel,
    pub sender: Sender<Message>,
    pub theme: Rc<ThemeStore>,
    pub loader: SingleFlight<FltkEditorLibrary>,
    pub adapter: EditorAdapter<FltkEditorLibrary>,
    pub client: BackendClient,
    pub workbench: Workbench,
    subscriptions: Vec<Subscription>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        theme: Rc<ThemeStore>,
        client: BackendClient,
    ) -> Self {
        let loader = SingleFlight::new(move || {
            let s = sender;
            thread::spawn(move || s.send(Message::LibraryLoaded(load_scheme_catalog())));
            app::add_timeout3(LIBRARY_TIMEOUT.as_secs_f64(), move |_| s.send(Message::LibraryDeadline));
        })
        .with_timeout(LIBRARY_TIMEOUT);
        let adapter = EditorAdapter::new(loader.clone());

        let MainWidgets {
            wind,
            menu,
            editor_area,
            placeholder,
            panel,
            status,
            ..
        } = widgets;

        let mut state = Self {
            window: wind,
            menu,
            status,
            editor_area,
            placeholder,
            panel,
            sender,
            theme,
            loader,
            adapter,
            client,
            workbench: Workbench::sample(),
            subscriptions: Vec::new(),
        };
        state.follow_theme();
        state
    }

    /// Keep the window chrome and the dark mode checkbox in sync with the
    /// theme store.
    fn follow_theme(&mut self) {
        let mut window = self.window.clone();
        let mut menu = self.menu.clone();
        let mut status = self.status.clone();
        let mut patterns = self.panel.patterns.clone();
        let mut summary = self.panel.summary.clone();
        let mut results = self.panel.results.clone();

        let mut repaint = move |palette: &ColorPalette| {
            apply_palette(
                palette,
                ThemedWidgets {
                    window: &mut window,
                    menu: &mut menu,
                    status: &mut status,
                    patterns: &mut patterns,
                    summary: &mut summary,
                    results: &mut results,
                },
            );
        };

        repaint(self.theme.snapshot().colors());
        let subscription = self.theme.subscribe(move |snapshot| repaint(snapshot.colors()));
        self.subscriptions.push(subscription);

        let menu = self.menu.clone();
        set_menu_checkbox(&menu, DARK_MODE_ITEM, self.theme.current_mode().is_dark());
        let subscription = self
            .theme
            .watch_mode(move |mode| set_menu_checkbox(&menu, DARK_MODE_ITEM, mode.is_dark()));
        self.subscriptions.push(subscription);
    }

    /// Request the editor library and create the editor once it arrives.
    pub fn start_editor(&mut self) {
        let sender = self.sender;
        self.subscriptions.push(
            self.adapter
                .on_content_changed(move |text| sender.send(Message::CodeChanged(text.to_string()))),
        );
        self.subscriptions.push(
            self.adapter
                .on_state_changed(move |state| sender.send(Message::EditorStateChanged(*state))),
        );

        let config = EditorConfig {
            language: self.workbench.language(),
            initial_code: self.workbench.code().to_string(),
            mode: self.theme.current_mode(),
            height: self.editor_height(),
            ..EditorConfig::default()
        };
        self.adapter.initialize(Some(self.editor_area.clone()), config);
        self.subscriptions.push(self.adapter.bind_theme(&self.theme));
        self.refresh_status();
    }

    fn editor_height(&self) -> u32 {
        self.editor_area.h().max(200) as u32
    }

    // --- Editor lifecycle ---

    pub fn library_loaded(&mut self, result: Result<Vec<EditorScheme>, String>) {
        let result = result.map(FltkEditorLibrary::new);
        if let Ok(library) = &result {
            tracing::debug!(schemes = library.scheme_count(), "editor schemes registered");
        }
        self.loader.resolve(result);
    }

    pub fn library_deadline(&mut self) {
        if self.loader.poll_timeout(Instant::now()) {
            tracing::error!(
                timeout = ?LIBRARY_TIMEOUT,
                fetches = self.loader.fetch_count(),
                "editor library did not load in time"
            );
        }
    }

    pub fn editor_state_changed(&mut self, state: AdapterState) {
        tracing::debug!(?state, "editor state changed");
        match state {
            AdapterState::Ready => {
                self.placeholder.hide();
                self.editor_area.layout();
                self.adapter.focus();
            }
            AdapterState::Failed => {
                self.placeholder.set_label("The editor could not be loaded.");
                self.placeholder.show();
            }
            AdapterState::Unloaded | AdapterState::Loading | AdapterState::Disposed => {}
        }
        self.editor_area.redraw();
        self.refresh_status();
    }

    pub fn code_changed(&mut self, code: &str) {
        self.workbench.on_code_changed(code);
        self.refresh_status();
    }

    pub fn reset_code(&mut self) {
        self.clear_highlights();
        if let Err(e) = self.adapter.set_value(SAMPLE_CODE) {
            tracing::warn!(error = %e, "cannot reset editor contents");
        }
    }

    pub fn set_language(&mut self, language: SupportedLanguage) {
        self.workbench.set_language(language);
        self.refresh_status();
    }

    // --- Analysis ---

    pub fn detect_patterns(&mut self) {
        if self.workbench.is_detecting() {
            return;
        }
        let (code, revision) = self.workbench.begin_detection();
        let s = self.sender;
        self.client.detect_patterns(code, move |result| {
            s.send(Message::PatternsDetected(revision, result.map_err(|e| e.to_string())));
        });
        self.refresh_status();
    }

    pub fn patterns_detected(&mut self, revision: Revision, result: Response<PatternDetectionResult>) {
        let patterns = self.workbench.finish_detection(revision, result).to_vec();
        self.adapter.highlight_patterns(&patterns);
        tracing::debug!(decorations = self.adapter.decoration_count(), "patterns highlighted");
        self.panel.show_patterns(&patterns);
        self.refresh_status();
    }

    pub fn select_pattern(&mut self, index: usize) {
        if let Some(pattern) = self.workbench.select_pattern(index).cloned() {
            self.adapter.highlight_pattern(&pattern);
        }
    }

    pub fn clear_highlights(&mut self) {
        self.workbench.clear_patterns();
        self.adapter.clear_pattern_highlights();
        self.panel.show_patterns(&[]);
        self.refresh_status();
    }

    pub fn analyze_complexity(&mut self) {
        if self.workbench.is_analyzing() {
            return;
        }
        let code = self.workbench.begin_analysis();
        let s = self.sender;
        self.client.analyze_complexity(code, move |result| {
            s.send(Message::ComplexityAnalyzed(result.map_err(|e| e.to_string())));
        });
        self.panel.show_complexity(None, true);
        self.refresh_status();
    }

    pub fn complexity_analyzed(&mut self, result: Response<ComplexityAnalysis>) {
        self.workbench.finish_analysis(result);
        self.panel.show_complexity(self.workbench.complexity(), false);
        self.refresh_status();
    }

    pub fn run_tests(&mut self) {
        if self.workbench.is_executing() {
            return;
        }
        let request = self.workbench.begin_execution();
        let s = self.sender;
        self.client.execute(request, move |result| {
            s.send(Message::TestsFinished(result.map_err(|e| e.to_string())));
        });
        self.panel.show_results(None, true);
        self.refresh_status();
    }

    pub fn tests_finished(&mut self, result: Response<ExecutionResult>) {
        self.workbench.finish_execution(result);
        self.panel.show_results(self.workbench.test_results(), false);
        self.refresh_status();
    }

    // --- Hints ---

    pub fn show_hints(&mut self) {
        let s = self.sender;
        let problem_id = self.workbench.problem_id().to_string();
        self.client.all_hints(Some(problem_id), move |result| {
            s.send(Message::HintsLoaded(result.map_err(|e| e.to_string())));
        });
    }

    pub fn hints_loaded(&mut self, result: Response<Vec<Hint>>) {
        self.workbench.open_hints(result);
        if self.workbench.is_hint_overlay_open() {
            let palette = self.theme.current_colors();
            show_hint_dialog(&mut self.workbench, &palette);
        }
        self.refresh_status();
    }

    // --- View ---

    pub fn toggle_theme_mode(&mut self) {
        self.theme.toggle_mode();
    }

    pub fn set_theme_profile(&mut self, id: &str) {
        if !self.theme.set_profile_by_id(id) {
            tracing::warn!(id, "unknown theme profile");
        }
    }

    pub fn show_about(&self) {
        show_about_dialog(&self.theme.current_profile(), self.theme.current_mode());
    }

    pub fn refresh_status(&mut self) {
        let line = match self.adapter.state() {
            AdapterState::Loading | AdapterState::Unloaded => "Loading editor...".to_string(),
            AdapterState::Failed => "Editor unavailable".to_string(),
            AdapterState::Ready | AdapterState::Disposed => self.workbench.status_line(),
        };
        self.status.set_label(&line);
        self.status.redraw();
    }

    /// Release the editor and every subscription before the window closes.
    pub fn shutdown(&mut self) {
        self.adapter.dispose();
        self.subscriptions.clear();
    }
}

fn set_menu_checkbox(menu: &MenuBar, path: &str, checked: bool) {
    let idx = menu.find_index(path);
    if idx >= 0 {
        if let Some(mut item) = menu.at(idx) {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }
}
