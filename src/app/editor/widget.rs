//! The boundary to the external text-editing widget.
//!
//! The adapter only talks to these traits; the FLTK binding in `ui::code_editor`
//! implements them for the shipped binary and tests use an in-memory fake.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::app::domain::{Pattern, SupportedLanguage, ThemeMode};
use crate::app::infrastructure::error::Result;
use crate::app::theme::EditorScheme;

/// Class name attached to pattern highlight decorations.
pub const PATTERN_HIGHLIGHT_CLASS: &str = "pattern-highlight";

pub type DecorationId = u64;

/// Receives the full buffer text. Shared so a widget can call it without
/// holding a borrow, which lets a listener edit the same widget.
pub type ChangeListener = Rc<dyn Fn(&str)>;

/// Inclusive, 1-based line range. Not clamped to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

/// Whole-line decoration over `range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub range: LineRange,
    pub class_name: String,
    pub hover_message: Option<String>,
}

impl Decoration {
    pub fn for_pattern(pattern: &Pattern) -> Self {
        Self {
            range: LineRange::new(pattern.line_start, pattern.line_end),
            class_name: PATTERN_HIGHLIGHT_CLASS.to_string(),
            hover_message: Some(pattern.label()),
        }
    }
}

fn default_height() -> u32 {
    600
}

/// Host-facing configuration for one editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub language: SupportedLanguage,
    #[serde(default)]
    pub initial_code: String,
    #[serde(default)]
    pub read_only: bool,
    /// Display height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Mode used when no palette switch was requested before the widget exists.
    #[serde(default)]
    pub mode: ThemeMode,
    #[serde(default)]
    pub patterns: Vec<Pattern>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: SupportedLanguage::default(),
            initial_code: String::new(),
            read_only: false,
            height: default_height(),
            mode: ThemeMode::default(),
            patterns: Vec::new(),
        }
    }
}

/// Everything the widget needs at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    pub value: String,
    pub language: SupportedLanguage,
    pub scheme: String,
    pub read_only: bool,
    pub height: u32,
    /// CSS-style font stack, e.g. `"JetBrains Mono", monospace`.
    pub font_family: String,
    pub font_size: u32,
    pub line_numbers: bool,
}

impl WidgetOptions {
    pub fn new(config: &EditorConfig, scheme: String, font_family: &str) -> Self {
        Self {
            value: config.initial_code.clone(),
            language: config.language,
            scheme,
            read_only: config.read_only,
            height: config.height,
            font_family: font_family.to_string(),
            font_size: 14,
            line_numbers: true,
        }
    }
}

/// One live editor instance.
pub trait EditorWidget {
    fn value(&self) -> String;

    /// Replace the buffer. Fires the change listener like a user edit, except
    /// that a widget may stay silent when nothing was inserted or deleted.
    fn set_value(&mut self, text: &str);

    /// Install the single content listener. It receives the full text once per
    /// edit batch and may be re-entered from inside its own call.
    fn set_change_listener(&mut self, listener: ChangeListener);

    /// Switch to a scheme previously registered with the library.
    fn set_scheme(&mut self, scheme_id: &str);

    /// Remove `old` and add `new` in one step, returning the ids of `new`.
    fn delta_decorations(&mut self, old: &[DecorationId], new: &[Decoration]) -> Vec<DecorationId>;

    fn focus(&mut self);

    fn dispose(&mut self);
}

/// A loaded widget library. Handles are cheap to clone and shared by every
/// adapter once the single load finishes.
pub trait WidgetLibrary: Clone + 'static {
    type Container: Clone;
    type Widget: EditorWidget + 'static;

    /// Register (or replace) a named color scheme.
    fn define_scheme(&self, scheme: &EditorScheme);

    fn create(&self, container: &Self::Container, options: &WidgetOptions) -> Result<Self::Widget>;
}
