use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::app::domain::{ColorPalette, ThemeMode, ThemeProfile};
use crate::app::infrastructure::preferences::{PreferenceStore, THEME_MODE_KEY, THEME_PROFILE_KEY};
use crate::app::infrastructure::style_surface::StyleSurface;
use crate::app::reactive::{Observable, Subscribers, Subscription};

use super::profiles::ProfileRegistry;
use super::tokens::{MODE_ATTRIBUTE, theme_variables};

/// The active `(profile, mode)` pair, handed to subscribers after each change.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSnapshot {
    pub profile: Rc<ThemeProfile>,
    pub mode: ThemeMode,
}

impl ThemeSnapshot {
    pub fn colors(&self) -> &ColorPalette {
        self.profile.palette(self.mode)
    }
}

/// Single owner of the active visual theme.
///
/// Every mutation is synchronous and immediately followed by a full
/// reapplication: all style variables are rewritten to the surface, the mode
/// attribute is set, then subscribers are notified. Mutations are not batched.
pub struct ThemeStore {
    registry: RefCell<ProfileRegistry>,
    profile: Observable<Rc<ThemeProfile>>,
    mode: Observable<ThemeMode>,
    preferences: RefCell<Box<dyn PreferenceStore>>,
    surface: Rc<RefCell<dyn StyleSurface>>,
    changes: Subscribers<ThemeSnapshot>,
    applications: Cell<u64>,
}

impl ThemeStore {
    /// Restore the persisted mode and profile (falling back silently to dark
    /// and the default profile) and apply the result once.
    pub fn new(
        registry: ProfileRegistry,
        preferences: Box<dyn PreferenceStore>,
        surface: Rc<RefCell<dyn StyleSurface>>,
    ) -> Self {
        let mode = match preferences.get(THEME_MODE_KEY) {
            Some(saved) => ThemeMode::parse(&saved).unwrap_or_else(|| {
                tracing::debug!(value = %saved, "ignoring unknown saved theme mode");
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        };

        let profile = match preferences.get(THEME_PROFILE_KEY) {
            Some(id) => registry.get(&id).unwrap_or_else(|| {
                tracing::debug!(id = %id, "saved theme profile not found, using default");
                registry.default_profile()
            }),
            None => registry.default_profile(),
        };

        let store = Self {
            registry: RefCell::new(registry),
            profile: Observable::new(profile),
            mode: Observable::new(mode),
            preferences: RefCell::new(preferences),
            surface,
            changes: Subscribers::new(),
            applications: Cell::new(0),
        };
        store.apply_theme();
        store
    }

    pub fn current_profile(&self) -> Rc<ThemeProfile> {
        self.profile.get()
    }

    pub fn current_mode(&self) -> ThemeMode {
        self.mode.get()
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            profile: self.profile.get(),
            mode: self.mode.get(),
        }
    }

    /// `profile.colors[mode]`, computed from the current state on every call.
    pub fn current_colors(&self) -> ColorPalette {
        self.profile.get().palette(self.mode.get()).clone()
    }

    pub fn set_profile(&self, profile: Rc<ThemeProfile>) {
        tracing::info!(id = %profile.id, "switching theme profile");
        let id = profile.id.clone();
        self.profile.set(profile);
        self.persist(THEME_PROFILE_KEY, &id);
        self.apply_theme();
    }

    /// Switch to a registered profile. Returns false for an unknown id.
    pub fn set_profile_by_id(&self, id: &str) -> bool {
        let found = self.registry.borrow().get(id);
        match found {
            Some(profile) => {
                self.set_profile(profile);
                true
            }
            None => {
                tracing::warn!(id, "unknown theme profile");
                false
            }
        }
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        tracing::debug!(mode = mode.as_str(), "switching theme mode");
        self.mode.set(mode);
        self.persist(THEME_MODE_KEY, mode.as_str());
        self.apply_theme();
    }

    pub fn toggle_mode(&self) {
        self.set_mode(self.mode.get().toggled());
    }

    /// Whether motion should be minimized for the active profile.
    pub fn prefers_reduced_motion(&self) -> bool {
        let animations = &self.profile.get().animations;
        animations.reduced_motion || !animations.enabled
    }

    pub fn registry(&self) -> std::cell::Ref<'_, ProfileRegistry> {
        self.registry.borrow()
    }

    /// Called with the new snapshot after every reapplication.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ThemeSnapshot) + 'static,
    {
        self.changes.subscribe(callback)
    }

    /// Called whenever the mode is set, before the surface is rewritten.
    pub fn watch_mode<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ThemeMode) + 'static,
    {
        self.mode.subscribe(callback)
    }

    /// Number of full reapplications so far.
    pub fn application_count(&self) -> u64 {
        self.applications.get()
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.preferences.borrow_mut().set(key, value) {
            tracing::warn!(key, error = %e, "failed to persist theme preference");
        }
    }

    fn apply_theme(&self) {
        let snapshot = self.snapshot();
        let variables = theme_variables(&snapshot.profile, snapshot.mode);

        {
            let mut surface = self.surface.borrow_mut();
            for (name, value) in &variables {
                surface.set_property(name, value);
            }
            surface.set_attribute(MODE_ATTRIBUTE, snapshot.mode.as_str());
        }

        self.applications.set(self.applications.get() + 1);
        tracing::debug!(
            application = self.applications.get(),
            profile = %snapshot.profile.id,
            mode = snapshot.mode.as_str(),
            variables = variables.len(),
            "applied theme"
        );

        self.changes.emit(&snapshot);
    }
}
