//! Design tokens and the fixed set of style variables a theme writes.

use crate::app::domain::{ThemeMode, ThemeProfile};

/// Prefix shared by every style variable.
pub const VAR_PREFIX: &str = "--pp-";

/// Attribute carrying the active mode, for selectors keyed on it.
pub const MODE_ATTRIBUTE: &str = "data-pp-theme";

/// 8px grid.
pub const SPACING: [(&str, &str); 7] = [
    ("xs", "4px"),
    ("sm", "8px"),
    ("md", "16px"),
    ("lg", "24px"),
    ("xl", "32px"),
    ("2xl", "48px"),
    ("3xl", "64px"),
];

pub const ELEVATION: [(&str, &str); 5] = [
    ("0", "none"),
    ("1", "0 2px 8px rgba(0, 0, 0, 0.08)"),
    ("2", "0 4px 16px rgba(0, 0, 0, 0.12)"),
    ("3", "0 8px 32px rgba(0, 0, 0, 0.16)"),
    ("4", "0 16px 64px rgba(0, 0, 0, 0.20)"),
];

pub const BORDER_RADIUS: [(&str, &str); 4] = [
    ("sm", "6px"),
    ("md", "12px"),
    ("lg", "16px"),
    ("pill", "999px"),
];

pub const EASING: [(&str, &str); 4] = [
    ("smooth", "cubic-bezier(0.4, 0.0, 0.2, 1)"),
    ("apple", "cubic-bezier(0.25, 0.1, 0.25, 1)"),
    ("bounce", "cubic-bezier(0.68, -0.55, 0.265, 1.55)"),
    ("sharp", "cubic-bezier(0.4, 0.0, 0.6, 1)"),
];

pub const DURATION: [(&str, &str); 5] = [
    ("micro", "100ms"),
    ("quick", "200ms"),
    ("standard", "300ms"),
    ("deliberate", "500ms"),
    ("slow", "700ms"),
];

/// Total number of variables produced by [`theme_variables`].
pub const VARIABLE_COUNT: usize =
    14 + 2 + SPACING.len() + ELEVATION.len() + BORDER_RADIUS.len() + EASING.len() + DURATION.len();

fn var(name: &str) -> String {
    format!("{}{}", VAR_PREFIX, name)
}

fn push_group(out: &mut Vec<(String, String)>, group: &str, tokens: &[(&str, &str)]) {
    for (key, value) in tokens {
        out.push((var(&format!("{}-{}", group, key)), value.to_string()));
    }
}

/// Every style variable for `(profile, mode)`, in a stable order.
///
/// Pure function of its inputs; the theme store writes exactly this list.
pub fn theme_variables(profile: &ThemeProfile, mode: ThemeMode) -> Vec<(String, String)> {
    let colors = profile.palette(mode);
    let mut out = Vec::with_capacity(VARIABLE_COUNT);

    let color_tokens = [
        ("bg-primary", &colors.bg_primary),
        ("bg-secondary", &colors.bg_secondary),
        ("bg-tertiary", &colors.bg_tertiary),
        ("text-primary", &colors.text_primary),
        ("text-secondary", &colors.text_secondary),
        ("text-tertiary", &colors.text_tertiary),
        ("accent-primary", &colors.accent_primary),
        ("accent-secondary", &colors.accent_secondary),
        ("success", &colors.success),
        ("warning", &colors.warning),
        ("error", &colors.error),
        ("info", &colors.info),
        ("pattern-glow", &colors.pattern_glow),
        ("shadow", &colors.shadow),
    ];
    for (key, value) in color_tokens {
        out.push((var(&format!("color-{}", key)), value.clone()));
    }

    out.push((var("font-code"), profile.typography.code_font.clone()));
    out.push((var("font-ui"), profile.typography.ui_font.clone()));

    push_group(&mut out, "space", &SPACING);
    push_group(&mut out, "elevation", &ELEVATION);
    push_group(&mut out, "radius", &BORDER_RADIUS);
    push_group(&mut out, "ease", &EASING);
    push_group(&mut out, "duration", &DURATION);

    out
}
