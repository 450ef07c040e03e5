pub mod code_editor;
pub mod dialogs;
pub mod main_window;
pub mod menu;
pub mod panels;
pub mod theme;
