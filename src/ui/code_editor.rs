//! FLTK binding for the editor widget boundary.
//!
//! Decorations are rendered through the highlight style buffer: style `A` is
//! plain text, style `B` marks lines covered by a decoration.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use fltk::{
    app,
    enums::{Color, Event, Font, Key},
    group::Flex,
    prelude::*,
    text::{StyleTableEntry, TextBuffer, TextEditor},
};

use crate::app::domain::ThemeMode;
use crate::app::editor::{
    ChangeListener, Decoration, DecorationId, EditorWidget, LineRange, PATTERN_HIGHLIGHT_CLASS,
    WidgetLibrary, WidgetOptions,
};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::theme::{EditorScheme, ProfileRegistry, Rgba};

const PLAIN_STYLE: char = 'A';
const PATTERN_STYLE: char = 'B';

type ListenerSlot = Rc<RefCell<Option<ChangeListener>>>;

pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgb(rgba.r, rgba.g, rgba.b)
}

/// Regular and bold FLTK fonts for a CSS-style font stack. The first family
/// FLTK has a built-in match for wins; anything else falls back to Courier.
pub fn code_fonts(stack: &str) -> (Font, Font) {
    for family in stack.split(',') {
        let family = family.trim().trim_matches(|c: char| c == '"' || c == '\'').to_ascii_lowercase();
        let fonts = match family.as_str() {
            "courier" | "courier new" | "monospace" => (Font::Courier, Font::CourierBold),
            "helvetica" | "arial" | "sans-serif" => (Font::Helvetica, Font::HelveticaBold),
            "times" | "times new roman" | "serif" => (Font::Times, Font::TimesBold),
            name if name.contains("mono") || name == "screen" => (Font::Screen, Font::ScreenBold),
            _ => continue,
        };
        return fonts;
    }
    (Font::Courier, Font::CourierBold)
}

/// Build every scheme the editor may be asked for: both modes of every known
/// profile. Runs on a worker thread at startup.
pub fn load_scheme_catalog() -> std::result::Result<Vec<EditorScheme>, String> {
    let registry = ProfileRegistry::load();
    let schemes: Vec<EditorScheme> = registry
        .profiles()
        .iter()
        .flat_map(|profile| {
            [ThemeMode::Dark, ThemeMode::Light]
                .map(|mode| EditorScheme::from_profile(profile, mode))
        })
        .collect();

    if schemes.is_empty() {
        return Err("no color schemes available".to_string());
    }
    Ok(schemes)
}

/// Shared scheme table; every editor created from it sees later definitions.
#[derive(Clone, Default)]
pub struct FltkEditorLibrary {
    schemes: Rc<RefCell<HashMap<String, EditorScheme>>>,
}

impl FltkEditorLibrary {
    pub fn new(catalog: Vec<EditorScheme>) -> Self {
        let library = Self::default();
        for scheme in catalog {
            library.define_scheme(&scheme);
        }
        library
    }

    pub fn scheme_count(&self) -> usize {
        self.schemes.borrow().len()
    }
}

impl WidgetLibrary for FltkEditorLibrary {
    type Container = Flex;
    type Widget = FltkCodeEditor;

    fn define_scheme(&self, scheme: &EditorScheme) {
        self.schemes
            .borrow_mut()
            .insert(scheme.id.clone(), scheme.clone());
    }

    fn create(&self, container: &Flex, options: &WidgetOptions) -> Result<FltkCodeEditor> {
        let mut container = container.clone();
        if container.was_deleted() {
            return Err(AppError::WidgetLoad("editor container was deleted".to_string()));
        }

        container.begin();
        let mut editor = TextEditor::default();
        container.end();
        container.fixed(&editor, options.height as i32);

        let mut buffer = TextBuffer::default();
        buffer.set_text(&options.value);
        let mut style_buffer = TextBuffer::default();
        style_buffer.set_text(&PLAIN_STYLE.to_string().repeat(options.value.len()));

        editor.set_buffer(buffer.clone());
        let (font, bold_font) = code_fonts(&options.font_family);
        editor.set_text_font(font);
        editor.set_text_size(options.font_size as i32);
        if options.line_numbers {
            editor.set_linenumber_width(40);
        }

        if options.read_only {
            editor.handle(|_, event| match event {
                Event::KeyDown => {
                    let key = app::event_key();
                    let navigation = matches!(
                        key,
                        Key::Left | Key::Right | Key::Up | Key::Down | Key::Home | Key::End | Key::PageUp | Key::PageDown
                    );
                    !(navigation || app::is_event_ctrl())
                }
                Event::Paste | Event::DndRelease => true,
                _ => false,
            });
        }

        let listener: ListenerSlot = Rc::new(RefCell::new(None));
        {
            let listener = listener.clone();
            let text_buf = buffer.clone();
            let mut style_buf = style_buffer.clone();
            buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
                if inserted == 0 && deleted == 0 {
                    return;
                }
                if deleted > 0 {
                    style_buf.remove(pos, pos + deleted);
                }
                if inserted > 0 {
                    style_buf.insert(pos, &PLAIN_STYLE.to_string().repeat(inserted as usize));
                }
                let text = text_buf.text();
                let current = listener.borrow().clone();
                if let Some(listener) = current {
                    listener(&text);
                }
            });
        }

        let mut widget = FltkCodeEditor {
            editor,
            buffer,
            style_buffer,
            schemes: self.schemes.clone(),
            listener,
            decorations: Vec::new(),
            next_id: 0,
            font,
            bold_font,
            font_size: options.font_size as i32,
        };
        widget.set_scheme(&options.scheme);
        container.redraw();
        Ok(widget)
    }
}

pub struct FltkCodeEditor {
    editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
    schemes: Rc<RefCell<HashMap<String, EditorScheme>>>,
    listener: ListenerSlot,
    decorations: Vec<(DecorationId, Decoration)>,
    next_id: DecorationId,
    font: Font,
    bold_font: Font,
    font_size: i32,
}

impl FltkCodeEditor {
    /// Rewrite the style buffer and the hover tooltip from the current
    /// decoration set.
    fn restyle(&mut self) {
        let text = self.buffer.text();
        let decorations = self.decorations.iter().map(|(_, decoration)| decoration);
        let ranges = styled_ranges(decorations.clone());
        self.style_buffer.set_text(&line_styles(&text, ranges.iter()));
        self.editor.set_tooltip(&hover_text(decorations));
        self.editor.redraw();
    }
}

/// Ranges of the decorations this binding has a style for.
fn styled_ranges<'a>(decorations: impl Iterator<Item = &'a Decoration>) -> Vec<LineRange> {
    decorations
        .filter(|decoration| decoration.class_name == PATTERN_HIGHLIGHT_CLASS)
        .map(|decoration| decoration.range)
        .collect()
}

/// FLTK has no per-range hover, so the messages share the editor tooltip.
fn hover_text<'a>(decorations: impl Iterator<Item = &'a Decoration>) -> String {
    decorations
        .filter_map(|decoration| {
            let message = decoration.hover_message.as_deref()?;
            Some(format!("Lines {}-{}: {}", decoration.range.start, decoration.range.end, message))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One style character per byte of `text`. Lines past the end of the text
/// are simply never reached.
fn line_styles<'a>(text: &str, ranges: impl Iterator<Item = &'a LineRange> + Clone) -> String {
    let mut styles = String::with_capacity(text.len());
    let mut line = 1u32;
    let mut current = style_for(line, ranges.clone());
    for byte in text.bytes() {
        styles.push(current);
        if byte == b'\n' {
            line += 1;
            current = style_for(line, ranges.clone());
        }
    }
    styles
}

fn style_for<'a>(line: u32, mut ranges: impl Iterator<Item = &'a LineRange>) -> char {
    if ranges.any(|range| range.contains(line)) {
        PATTERN_STYLE
    } else {
        PLAIN_STYLE
    }
}

impl EditorWidget for FltkCodeEditor {
    fn value(&self) -> String {
        self.buffer.text()
    }

    fn set_value(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.restyle();
    }

    fn set_change_listener(&mut self, listener: ChangeListener) {
        *self.listener.borrow_mut() = Some(listener);
    }

    fn set_scheme(&mut self, scheme_id: &str) {
        let scheme = match self.schemes.borrow().get(scheme_id) {
            Some(scheme) => scheme.clone(),
            None => {
                tracing::warn!(scheme = scheme_id, "unknown editor scheme");
                return;
            }
        };

        let colors = &scheme.colors;
        self.editor.set_color(to_color(scheme.background_rgb()));
        self.editor.set_text_color(to_color(scheme.resolve(&colors.foreground)));
        self.editor.set_cursor_color(to_color(scheme.resolve(&colors.cursor)));
        self.editor.set_selection_color(to_color(scheme.resolve(&colors.selection)));
        self.editor.set_linenumber_bgcolor(to_color(scheme.resolve(&colors.gutter)));
        self.editor.set_linenumber_fgcolor(to_color(scheme.resolve(&colors.line_number)));

        let table = vec![
            StyleTableEntry {
                color: to_color(scheme.resolve(&colors.foreground)),
                font: self.font,
                size: self.font_size,
            },
            StyleTableEntry {
                color: to_color(scheme.resolve(&colors.line_number_active)),
                font: self.bold_font,
                size: self.font_size,
            },
        ];
        self.editor.set_highlight_data(self.style_buffer.clone(), table);
        self.editor.redraw();
    }

    fn delta_decorations(&mut self, old: &[DecorationId], new: &[Decoration]) -> Vec<DecorationId> {
        self.decorations.retain(|(id, _)| !old.contains(id));
        let ids: Vec<DecorationId> = new
            .iter()
            .map(|decoration| {
                self.next_id += 1;
                self.decorations.push((self.next_id, decoration.clone()));
                self.next_id
            })
            .collect();
        self.restyle();
        ids
    }

    fn focus(&mut self) {
        let _ = self.editor.take_focus();
    }

    fn dispose(&mut self) {
        *self.listener.borrow_mut() = None;
        if let Some(mut parent) = self.editor.parent() {
            parent.remove(&self.editor);
            parent.redraw();
        }
        TextEditor::delete(self.editor.clone());
    }
}
