use fltk::{
    button::Button,
    enums::{Align, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

use crate::app::domain::{ThemeMode, ThemeProfile};
use crate::app::theme::Rgba;
use crate::ui::theme::palette_color;

use super::run_dialog;

/// Show About dialog, colored with the active theme.
pub fn show_about_dialog(profile: &ThemeProfile, mode: ThemeMode) {
    let version = env!("CARGO_PKG_VERSION");
    let palette = profile.palette(mode);
    let base = Rgba::parse(&palette.bg_primary).unwrap_or(Rgba::opaque(0, 0, 0));
    let color = |token: &str| palette_color(token, base);

    let mut dialog = Window::default()
        .with_size(450, 340)
        .with_label("About PatternPad")
        .center_screen();
    dialog.make_modal(true);
    dialog.set_color(color(&palette.bg_primary));

    let mut flex = Flex::new(10, 10, 430, 320, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(10);

    let mut title = Frame::default();
    title.set_label("PatternPad");
    title.set_label_size(24);
    title.set_label_font(Font::HelveticaBold);
    title.set_label_color(color(&palette.accent_primary));
    flex.fixed(&title, 40);

    let mut version_frame = Frame::default();
    version_frame.set_label(&format!("Version {}", version));
    version_frame.set_label_size(14);
    version_frame.set_label_color(color(&palette.text_primary));
    flex.fixed(&version_frame, 25);

    let mut desc_frame = Frame::default();
    desc_frame.set_label("Practice coding problems with pattern highlighting and progressive hints");
    desc_frame.set_label_size(12);
    desc_frame.set_label_color(color(&palette.text_secondary));
    flex.fixed(&desc_frame, 25);

    let mut _spacer = Frame::default();
    flex.fixed(&_spacer, 10);

    let info_text = format!(
        "Theme: {} ({})\n{}\n\n\
         Licensed under the MIT License\n\
         Built with Rust and FLTK",
        profile.name,
        mode.as_str(),
        profile.description
    );

    let mut info_frame = Frame::default();
    info_frame.set_label(&info_text);
    info_frame.set_label_size(12);
    info_frame.set_label_color(color(&palette.text_primary));
    info_frame.set_align(Align::Center | Align::Inside | Align::Wrap);
    flex.fixed(&info_frame, 120);

    let mut close_btn = Button::default().with_label("Close");
    flex.fixed(&close_btn, 35);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    run_dialog(&dialog);
}
