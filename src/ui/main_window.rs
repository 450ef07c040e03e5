use fltk::{
    app::Sender,
    enums::{Align, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::messages::Message;
use super::panels::{SidePanel, SIDE_PANEL_WIDTH};

pub const STATUS_BAR_HEIGHT: i32 = 24;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    /// Column the code editor is created into once its library has loaded.
    pub editor_area: Flex,
    /// Shown in `editor_area` until the editor is ready.
    pub placeholder: Frame,
    pub panel: SidePanel,
    pub status: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1000, 760, "PatternPad");
    wind.set_xclass("PatternPad");

    let mut flex = Flex::new(0, 0, 1000, 760, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut body = Flex::default();
    body.set_type(FlexType::Row);

    let mut editor_area = Flex::default();
    editor_area.set_type(FlexType::Column);
    let mut placeholder = Frame::default().with_label("Loading editor...");
    placeholder.set_align(Align::Center | Align::Inside);
    editor_area.end();

    let panel = SidePanel::new(sender.clone());
    body.fixed(&panel.flex, SIDE_PANEL_WIDTH);
    body.end();

    let mut status = Frame::default();
    status.set_frame(FrameType::FlatBox);
    status.set_align(Align::Left | Align::Inside);
    status.set_label_size(12);
    flex.fixed(&status, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);

    let sender_close = *sender;
    wind.set_callback(move |_| {
        if fltk::app::event() == fltk::enums::Event::Close {
            sender_close.send(Message::WindowClose);
        }
    });

    MainWidgets {
        wind,
        flex,
        menu,
        editor_area,
        placeholder,
        panel,
        status,
    }
}
