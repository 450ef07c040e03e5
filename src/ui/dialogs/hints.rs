use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    app,
    button::Button,
    enums::{Align, Font},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
    text::{TextBuffer, TextDisplay, WrapMode},
    window::Window,
};

use crate::app::controllers::workbench::Workbench;
use crate::app::domain::{ColorPalette, HintSystem};
use crate::app::theme::Rgba;
use crate::ui::theme::palette_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintAction {
    Previous,
    Next,
}

/// Heading for the current level, e.g. `Hint 2 of 4: Approach`.
pub fn hint_title(hints: &HintSystem) -> String {
    match hints.current_hint() {
        Some(hint) => format!(
            "Hint {} of {}: {}",
            hints.current_level(),
            hints.total_levels(),
            hint.level.title()
        ),
        None => "No hints for this problem".to_string(),
    }
}

pub fn hint_body(hints: &HintSystem) -> String {
    match hints.current_hint() {
        Some(hint) => match &hint.code_snippet {
            Some(snippet) => format!("{}\n\n{}", hint.content, snippet),
            None => hint.content.clone(),
        },
        None => String::new(),
    }
}

/// Step through the workbench's hints one level at a time. Blocks until
/// closed; closing marks the overlay closed on the workbench.
pub fn show_hint_dialog(bench: &mut Workbench, palette: &ColorPalette) {
    let Some(hints) = bench.hints() else {
        return;
    };

    let mut dialog = Window::default()
        .with_size(520, 380)
        .with_label("Hints")
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 500, 360, None);
    flex.set_type(FlexType::Column);
    flex.set_spacing(8);

    let mut title = Frame::default();
    title.set_label_font(Font::HelveticaBold);
    title.set_label_size(16);
    title.set_align(Align::Left | Align::Inside);
    flex.fixed(&title, 30);

    let mut body_buffer = TextBuffer::default();
    let mut body = TextDisplay::default();
    body.set_buffer(body_buffer.clone());
    body.wrap_mode(WrapMode::AtBounds, 0);

    let mut buttons = Flex::default();
    buttons.set_type(FlexType::Row);
    buttons.set_spacing(8);
    Frame::default();
    let mut prev_btn = Button::default().with_label("@< Previous");
    let mut next_btn = Button::default().with_label("Next @>");
    let mut close_btn = Button::default().with_label("Close");
    buttons.fixed(&prev_btn, 110);
    buttons.fixed(&next_btn, 110);
    buttons.fixed(&close_btn, 80);
    buttons.end();
    flex.fixed(&buttons, 32);

    flex.end();
    dialog.end();

    let base = Rgba::parse(&palette.bg_primary).unwrap_or(Rgba::opaque(0, 0, 0));
    dialog.set_color(palette_color(&palette.bg_primary, base));
    title.set_label_color(palette_color(&palette.accent_primary, base));
    body.set_color(palette_color(&palette.bg_secondary, base));
    body.set_text_color(palette_color(&palette.text_primary, base));

    let render = |hints: &HintSystem,
                  title: &mut Frame,
                  body_buffer: &mut TextBuffer,
                  prev_btn: &mut Button,
                  next_btn: &mut Button| {
        title.set_label(&hint_title(hints));
        body_buffer.set_text(&hint_body(hints));
        if hints.can_go_previous() {
            prev_btn.activate();
        } else {
            prev_btn.deactivate();
        }
        if hints.can_go_next() {
            next_btn.activate();
        } else {
            next_btn.deactivate();
        }
    };
    render(hints, &mut title, &mut body_buffer, &mut prev_btn, &mut next_btn);

    let action: Rc<Cell<Option<HintAction>>> = Rc::new(Cell::new(None));
    prev_btn.set_callback({
        let action = action.clone();
        move |_| action.set(Some(HintAction::Previous))
    });
    next_btn.set_callback({
        let action = action.clone();
        move |_| action.set(Some(HintAction::Next))
    });
    close_btn.set_callback({
        let mut dialog = dialog.clone();
        move |_| dialog.hide()
    });

    dialog.show();
    while dialog.shown() {
        app::wait();
        if app::should_program_quit() {
            dialog.hide();
        }
        let moved = match action.take() {
            Some(HintAction::Previous) => bench.previous_hint(),
            Some(HintAction::Next) => bench.next_hint(),
            None => false,
        };
        if moved {
            if let Some(hints) = bench.hints() {
                render(hints, &mut title, &mut body_buffer, &mut prev_btn, &mut next_btn);
            }
        }
    }

    bench.close_hints();
}
