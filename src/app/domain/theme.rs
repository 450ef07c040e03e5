use serde::{Deserialize, Serialize};

/// Dark/light selector applied against the active profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse a persisted value. Anything other than `dark`/`light` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Resolved colors for one mode of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    // Backgrounds
    pub bg_primary: String,
    pub bg_secondary: String,
    pub bg_tertiary: String,

    // Text
    pub text_primary: String,
    pub text_secondary: String,
    pub text_tertiary: String,

    // Accents
    pub accent_primary: String,
    pub accent_secondary: String,

    // Semantic
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,

    // Effects
    pub pattern_glow: String,
    pub shadow: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileColors {
    pub dark: ColorPalette,
    pub light: ColorPalette,
}

impl ProfileColors {
    pub fn for_mode(&self, mode: ThemeMode) -> &ColorPalette {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: String,
    pub line_height: String,
    pub font_weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScale {
    pub display: TextStyle,
    pub h1: TextStyle,
    pub h2: TextStyle,
    pub h3: TextStyle,
    pub body: TextStyle,
    pub small: TextStyle,
    pub tiny: TextStyle,
    pub code: TextStyle,
    pub code_small: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyConfig {
    pub code_font: String,
    pub ui_font: String,
    pub scale: TypeScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Fast,
    #[default]
    Normal,
    Slow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_animations_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub speed: AnimationSpeed,
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_animations_enabled() -> bool {
    true
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: default_animations_enabled(),
            speed: AnimationSpeed::default(),
            reduced_motion: false,
        }
    }
}

/// A named bundle of two palettes plus typography and animation settings.
///
/// Profiles are never edited in place; the theme store swaps them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub colors: ProfileColors,
    pub typography: TypographyConfig,
    #[serde(default)]
    pub animations: AnimationConfig,
}

impl ThemeProfile {
    pub fn palette(&self, mode: ThemeMode) -> &ColorPalette {
        self.colors.for_mode(mode)
    }
}
