use fltk::{
    browser::HoldBrowser,
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::TextDisplay,
    window::Window,
};

use crate::app::domain::ColorPalette;
use crate::app::theme::Rgba;

/// Widgets outside the editor that follow the active palette.
pub struct ThemedWidgets<'a> {
    pub window: &'a mut Window,
    pub menu: &'a mut MenuBar,
    pub status: &'a mut Frame,
    pub patterns: &'a mut HoldBrowser,
    pub summary: &'a mut Frame,
    pub results: &'a mut TextDisplay,
}

/// Resolve a palette token to an opaque FLTK color over `background`.
pub fn palette_color(token: &str, background: Rgba) -> Color {
    let rgba = Rgba::parse(token)
        .map(|c| c.over(background))
        .unwrap_or_else(|| {
            tracing::warn!(token, "unparsable palette color");
            background
        });
    Color::from_rgb(rgba.r, rgba.g, rgba.b)
}

pub fn apply_palette(palette: &ColorPalette, widgets: ThemedWidgets) {
    let base = Rgba::parse(&palette.bg_primary).unwrap_or(Rgba::opaque(0, 0, 0));
    let color = |token: &str| palette_color(token, base);

    widgets.window.set_color(color(&palette.bg_primary));
    widgets.window.set_label_color(color(&palette.text_primary));

    widgets.menu.set_color(color(&palette.bg_secondary));
    widgets.menu.set_text_color(color(&palette.text_primary));
    widgets.menu.set_selection_color(color(&palette.bg_tertiary)); // Hover color

    widgets.status.set_color(color(&palette.bg_secondary));
    widgets.status.set_label_color(color(&palette.text_secondary));

    widgets.patterns.set_color(color(&palette.bg_secondary));
    widgets.patterns.set_text_color(color(&palette.text_primary));
    widgets.patterns.set_selection_color(color(&palette.accent_primary));

    widgets.summary.set_color(color(&palette.bg_tertiary));
    widgets.summary.set_label_color(color(&palette.accent_primary));

    widgets.results.set_color(color(&palette.bg_secondary));
    widgets.results.set_text_color(color(&palette.text_primary));

    widgets.window.redraw();
}
