use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::app::domain::{
    AnimationConfig, AnimationSpeed, ColorPalette, ProfileColors, TextStyle, ThemeProfile,
    TypeScale, TypographyConfig,
};
use crate::app::infrastructure::error::Result;

pub const DEFAULT_PROFILE_ID: &str = "obsidian-warmth";

fn style(font_size: &str, line_height: &str, font_weight: u16) -> TextStyle {
    TextStyle {
        font_size: font_size.to_string(),
        line_height: line_height.to_string(),
        font_weight,
    }
}

fn palette(values: [&str; 14]) -> ColorPalette {
    let [
        bg_primary,
        bg_secondary,
        bg_tertiary,
        text_primary,
        text_secondary,
        text_tertiary,
        accent_primary,
        accent_secondary,
        success,
        warning,
        error,
        info,
        pattern_glow,
        shadow,
    ] = values.map(str::to_string);

    ColorPalette {
        bg_primary,
        bg_secondary,
        bg_tertiary,
        text_primary,
        text_secondary,
        text_tertiary,
        accent_primary,
        accent_secondary,
        success,
        warning,
        error,
        info,
        pattern_glow,
        shadow,
    }
}

/// Warm brown-black base with gold accents. The default profile.
pub fn obsidian_warmth() -> ThemeProfile {
    ThemeProfile {
        id: DEFAULT_PROFILE_ID.to_string(),
        name: "Obsidian Warmth".to_string(),
        description: "Warm dark theme with a brown-black base and gold accents".to_string(),
        colors: ProfileColors {
            dark: palette([
                "#2E2625",
                "#3D3432",
                "#4A4340",
                "#E8E3E1",
                "#B8AFA9",
                "#8A827D",
                "#D4A574",
                "#B8956A",
                "#7FB069",
                "#E4A853",
                "#D16666",
                "#6B9AC4",
                "rgba(212, 165, 116, 0.15)",
                "rgba(0, 0, 0, 0.4)",
            ]),
            light: palette([
                "#F5F3F2",
                "#E8E3E1",
                "#DDD7D4",
                "#2E2625",
                "#5A504A",
                "#8A827D",
                "#A67844",
                "#8B6839",
                "#5A8F47",
                "#C88E3A",
                "#B84545",
                "#4A7A9E",
                "rgba(166, 120, 68, 0.12)",
                "rgba(46, 38, 37, 0.08)",
            ]),
        },
        typography: TypographyConfig {
            code_font: "\"JetBrains Mono\", \"Fira Code\", \"Cascadia Code\", monospace"
                .to_string(),
            ui_font: "\"Inter\", \"SF Pro Display\", -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif"
                .to_string(),
            scale: TypeScale {
                display: style("32px", "40px", 700),
                h1: style("24px", "32px", 600),
                h2: style("20px", "28px", 600),
                h3: style("16px", "24px", 500),
                body: style("14px", "20px", 400),
                small: style("12px", "16px", 400),
                tiny: style("10px", "14px", 500),
                code: style("14px", "20px", 400),
                code_small: style("12px", "16px", 400),
            },
        },
        animations: AnimationConfig {
            enabled: true,
            speed: AnimationSpeed::Normal,
            reduced_motion: false,
        },
    }
}

/// Known profiles: the built-in ones plus any user profiles loaded from disk.
///
/// Never empty; the default profile is always present.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<Rc<ThemeProfile>>,
}

impl ProfileRegistry {
    pub fn builtin() -> Self {
        Self {
            profiles: vec![Rc::new(obsidian_warmth())],
        }
    }

    /// Built-in profiles plus every `*.toml` file in the user profile directory.
    pub fn load() -> Self {
        let mut registry = Self::builtin();
        let dir = Self::user_profile_dir();
        if dir.is_dir() {
            registry.load_dir(&dir);
        }
        registry
    }

    /// Register every parsable `*.toml` profile in `dir`. Malformed files are
    /// logged and skipped. Returns how many profiles were registered.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot read profile directory");
                return 0;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match Self::read_profile(&path) {
                Ok(profile) => {
                    tracing::debug!(id = %profile.id, path = %path.display(), "loaded theme profile");
                    self.register(profile);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping malformed theme profile");
                }
            }
        }
        loaded
    }

    pub fn read_profile(path: &Path) -> Result<ThemeProfile> {
        let contents = fs::read_to_string(path)?;
        Self::parse_profile(&contents)
    }

    pub fn parse_profile(contents: &str) -> Result<ThemeProfile> {
        Ok(toml::from_str(contents)?)
    }

    /// Add a profile, replacing any existing profile with the same id.
    pub fn register(&mut self, profile: ThemeProfile) -> Rc<ThemeProfile> {
        let profile = Rc::new(profile);
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => *slot = profile.clone(),
            None => self.profiles.push(profile.clone()),
        }
        profile
    }

    pub fn get(&self, id: &str) -> Option<Rc<ThemeProfile>> {
        self.profiles.iter().find(|p| p.id == id).cloned()
    }

    pub fn default_profile(&self) -> Rc<ThemeProfile> {
        self.get(DEFAULT_PROFILE_ID)
            .unwrap_or_else(|| self.profiles[0].clone())
    }

    pub fn profiles(&self) -> &[Rc<ThemeProfile>] {
        &self.profiles
    }

    pub fn ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn user_profile_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("patternpad");
        path.push("profiles");
        path
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A complete profile in the on-disk format, with a distinct id.
    pub(crate) fn sample_profile_toml(id: &str) -> String {
        let mut profile = obsidian_warmth();
        profile.id = id.to_string();
        profile.name = format!("Profile {}", id);
        profile.colors.dark.accent_primary = "#5FA8D3".to_string();
        profile.colors.light.accent_primary = "#1B6A96".to_string();
        toml::to_string(&profile).unwrap()
    }

    #[test]
    fn test_builtin_registry_has_default() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.default_profile().id, DEFAULT_PROFILE_ID);
        assert_eq!(registry.ids(), vec![DEFAULT_PROFILE_ID]);
    }

    #[test]
    fn test_palettes_are_not_degenerate() {
        let profile = obsidian_warmth();
        let dark = &profile.colors.dark;
        let light = &profile.colors.light;
        assert_ne!(dark.bg_primary, light.bg_primary);
        assert_ne!(dark.bg_secondary, light.bg_secondary);
        assert_ne!(dark.bg_tertiary, light.bg_tertiary);
        assert_ne!(dark.success, light.success);
        assert_ne!(dark.warning, light.warning);
        assert_ne!(dark.error, light.error);
        assert_ne!(dark.info, light.info);
    }

    #[test]
    fn test_parse_profile_from_toml() {
        let profile = ProfileRegistry::parse_profile(&sample_profile_toml("harbor")).unwrap();
        assert_eq!(profile.id, "harbor");
        assert_eq!(profile.colors.dark.accent_primary, "#5FA8D3");
        assert_eq!(profile.typography.scale.code.font_size, "14px");
    }

    #[test]
    fn test_parse_profile_missing_fields_fails() {
        let result = ProfileRegistry::parse_profile("id = \"broken\"\nname = \"Broken\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = ProfileRegistry::builtin();
        let mut replacement = obsidian_warmth();
        replacement.name = "Obsidian (custom)".to_string();
        registry.register(replacement);

        assert_eq!(registry.profiles().len(), 1);
        assert_eq!(registry.default_profile().name, "Obsidian (custom)");
    }

    #[test]
    fn test_load_dir_skips_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("harbor.toml"), sample_profile_toml("harbor")).unwrap();
        fs::write(dir.path().join("broken.toml"), "this is = = not toml").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = ProfileRegistry::builtin();
        let loaded = registry.load_dir(dir.path());

        assert_eq!(loaded, 1);
        assert!(registry.get("harbor").is_some());
        assert_eq!(registry.profiles().len(), 2);
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ProfileRegistry::builtin();
        assert_eq!(registry.load_dir(&dir.path().join("absent")), 0);
    }
}
