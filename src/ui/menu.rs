use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::{SupportedLanguage, ThemeMode};
use crate::app::messages::Message;

pub const DARK_MODE_ITEM: &str = "View/Dark Mode";

/// Menu path for a language entry, e.g. `Language/C++`.
pub fn language_path(language: SupportedLanguage) -> String {
    format!("Language/{}", language.display_name().replace('/', "\\/"))
}

pub fn profile_path(name: &str) -> String {
    // '/' separates submenus and '&' marks shortcuts in FLTK labels
    format!("View/Theme Profile/{}", name.replace('/', "\\/").replace('&', "&&"))
}

pub fn build_menu(
    menu: &mut MenuBar,
    sender: &Sender<Message>,
    mode: ThemeMode,
    language: SupportedLanguage,
    profiles: &[(String, String)],
) {
    let s = sender;

    // File
    menu.add("File/Reset Code", Shortcut::Ctrl | 'r', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ResetCode) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Analyze
    menu.add("Analyze/Detect Patterns", Shortcut::Ctrl | 'd', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::DetectPatterns) });
    menu.add("Analyze/Clear Highlights", Shortcut::Ctrl | Shortcut::Shift | 'd', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ClearHighlights) });
    menu.add("Analyze/Analyze Complexity", Shortcut::Ctrl | 'k', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::AnalyzeComplexity) });
    menu.add("Analyze/Run Tests", Shortcut::Ctrl | Shortcut::Shift | 'r', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RunTests) });

    // Language
    for lang in SupportedLanguage::all() {
        let lang = *lang;
        let flag = if lang == language { MenuFlag::Radio | MenuFlag::Value } else { MenuFlag::Radio };
        menu.add(&language_path(lang), Shortcut::None, flag, { let s = *s; move |_| s.send(Message::SetLanguage(lang)) });
    }

    // Hints
    menu.add("Hints/Show Hints...", Shortcut::Ctrl | 'h', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowHints) });

    // View
    let dm_flag = if mode.is_dark() { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add(DARK_MODE_ITEM, Shortcut::Ctrl | Shortcut::Shift | 'l', dm_flag, { let s = *s; move |_| s.send(Message::ToggleThemeMode) });
    for (id, name) in profiles {
        let id = id.clone();
        menu.add(&profile_path(name), Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetThemeProfile(id.clone())) });
    }

    // Help
    menu.add("Help/About PatternPad", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_paths_escape_separators() {
        assert_eq!(language_path(SupportedLanguage::Cpp), "Language/C++");
        assert_eq!(language_path(SupportedLanguage::Csharp), "Language/C#");
        assert_eq!(profile_path("Dusk/Dawn"), "View/Theme Profile/Dusk\\/Dawn");
        assert_eq!(profile_path("Salt & Pepper"), "View/Theme Profile/Salt && Pepper");
    }
}
