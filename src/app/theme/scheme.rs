//! Editor color schemes: the widget-side view of a theme profile.
//!
//! A scheme is derived from one palette of a profile so that the editor and
//! the surrounding surface always agree on colors.

use crate::app::domain::{ThemeMode, ThemeProfile};

use super::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeBase {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Italic,
    Bold,
}

/// Foreground for one syntax token class, as `RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub token: &'static str,
    pub foreground: String,
    pub font_style: Option<FontStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeColors {
    pub background: String,
    pub foreground: String,
    pub line_number: String,
    pub line_number_active: String,
    pub cursor: String,
    pub selection: String,
    pub line_highlight: String,
    pub gutter: String,
    pub widget_background: String,
    pub widget_border: String,
    pub pattern_highlight: String,
    pub error: String,
    pub warning: String,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorScheme {
    pub id: String,
    pub base: SchemeBase,
    pub rules: Vec<TokenRule>,
    pub colors: SchemeColors,
}

/// Name under which the widget knows the scheme for `(profile, mode)`.
pub fn scheme_id(profile_id: &str, mode: ThemeMode) -> String {
    format!("{}-{}", profile_id, mode.as_str())
}

fn bare_hex(token: &str) -> String {
    Rgba::parse(token)
        .map(|c| c.to_hex())
        .unwrap_or_else(|| token.trim_start_matches('#').to_string())
}

fn with_alpha(token: &str, alpha: &str) -> String {
    format!("#{}{}", bare_hex(token), alpha)
}

impl EditorScheme {
    pub fn from_profile(profile: &ThemeProfile, mode: ThemeMode) -> Self {
        let p = profile.palette(mode);
        let rule = |token: &'static str, color: &str, font_style: Option<FontStyle>| TokenRule {
            token,
            foreground: bare_hex(color),
            font_style,
        };

        let rules = vec![
            rule("comment", &p.text_tertiary, Some(FontStyle::Italic)),
            rule("keyword", &p.accent_primary, Some(FontStyle::Bold)),
            rule("keyword.control", &p.accent_primary, None),
            rule("string", &p.success, None),
            rule("number", &p.warning, None),
            rule("function", &p.info, None),
            rule("identifier.function", &p.info, None),
            rule("variable", &p.text_primary, None),
            rule("identifier", &p.text_primary, None),
            rule("type", &p.accent_secondary, None),
            rule("operator", &p.accent_primary, None),
            rule("delimiter", &p.text_secondary, None),
        ];

        let colors = SchemeColors {
            background: p.bg_primary.clone(),
            foreground: p.text_primary.clone(),
            line_number: p.text_tertiary.clone(),
            line_number_active: p.accent_primary.clone(),
            cursor: p.accent_primary.clone(),
            selection: with_alpha(&p.accent_primary, "40"),
            line_highlight: with_alpha(&p.bg_secondary, "20"),
            gutter: p.bg_primary.clone(),
            widget_background: p.bg_secondary.clone(),
            widget_border: p.bg_tertiary.clone(),
            pattern_highlight: p.pattern_glow.clone(),
            error: p.error.clone(),
            warning: p.warning.clone(),
            info: p.info.clone(),
        };

        Self {
            id: scheme_id(&profile.id, mode),
            base: match mode {
                ThemeMode::Dark => SchemeBase::Dark,
                ThemeMode::Light => SchemeBase::Light,
            },
            rules,
            colors,
        }
    }

    pub fn rule(&self, token: &str) -> Option<&TokenRule> {
        self.rules.iter().find(|r| r.token == token)
    }

    /// Background color as an opaque value (translucent tokens are composited
    /// over black).
    pub fn background_rgb(&self) -> Rgba {
        opaque(&self.colors.background, Rgba::opaque(0, 0, 0))
    }

    /// Resolve any scheme color to an opaque value over the scheme background.
    pub fn resolve(&self, token: &str) -> Rgba {
        opaque(token, self.background_rgb())
    }
}

fn opaque(token: &str, background: Rgba) -> Rgba {
    match Rgba::parse(token) {
        Some(color) => color.over(background),
        None => {
            tracing::warn!(token, "unparsable color token, using background");
            background
        }
    }
}
