//! Lifecycle owner for one external editor widget.
//!
//! `Unloaded -> Loading -> Ready -> Disposed`, with `Failed` when the library
//! bootstrap fails. All calls happen on the UI thread.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::app::domain::{Pattern, ThemeMode, ThemeProfile};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::reactive::{Subscribers, Subscription};
use crate::app::theme::profiles::obsidian_warmth;
use crate::app::theme::{EditorScheme, ThemeSnapshot, ThemeStore, scheme_id};

use super::loader::{LoadResult, SingleFlight};
use super::widget::{
    ChangeListener, Decoration, DecorationId, EditorConfig, EditorWidget, WidgetLibrary,
    WidgetOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Unloaded,
    Loading,
    Ready,
    Failed,
    Disposed,
}

struct Inner<L: WidgetLibrary> {
    state: AdapterState,
    config: EditorConfig,
    container: Option<L::Container>,
    library: Option<L>,
    widget: Option<L::Widget>,
    decoration_ids: Vec<DecorationId>,
    profile: Rc<ThemeProfile>,
    mode: ThemeMode,
    pending_palette: Option<ThemeMode>,
}

/// Content notifications raised while the adapter itself is driving the
/// widget are queued and delivered once it lets go. Changes made by a
/// subscriber are delivered after the current one, never nested inside it.
#[derive(Clone, Default)]
struct ChangeQueue {
    pending: Rc<RefCell<VecDeque<String>>>,
    busy: Rc<Cell<bool>>,
    flushing: Rc<Cell<bool>>,
    pushed: Rc<Cell<u64>>,
    subscribers: Subscribers<str>,
}

impl ChangeQueue {
    fn push(&self, text: &str) {
        self.pending.borrow_mut().push_back(text.to_string());
        self.pushed.set(self.pushed.get() + 1);
        if !self.busy.get() {
            self.flush();
        }
    }

    fn flush(&self) {
        if self.flushing.replace(true) {
            return;
        }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(text) => self.subscribers.emit(&text),
                None => break,
            }
        }
        self.flushing.set(false);
    }

    fn discard(&self) {
        self.pending.borrow_mut().clear();
        self.subscribers.clear();
    }
}

/// Cheap-to-clone handle to one editor instance.
pub struct EditorAdapter<L: WidgetLibrary> {
    inner: Rc<RefCell<Inner<L>>>,
    loader: SingleFlight<L>,
    changes: ChangeQueue,
    state_events: Subscribers<AdapterState>,
}

impl<L: WidgetLibrary> Clone for EditorAdapter<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            loader: self.loader.clone(),
            changes: self.changes.clone(),
            state_events: self.state_events.clone(),
        }
    }
}

impl<L: WidgetLibrary> EditorAdapter<L> {
    pub fn new(loader: SingleFlight<L>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: AdapterState::Unloaded,
                config: EditorConfig::default(),
                container: None,
                library: None,
                widget: None,
                decoration_ids: Vec::new(),
                profile: Rc::new(obsidian_warmth()),
                mode: ThemeMode::default(),
                pending_palette: None,
            })),
            loader,
            changes: ChangeQueue::default(),
            state_events: Subscribers::new(),
        }
    }

    pub fn state(&self) -> AdapterState {
        self.inner.borrow().state
    }

    /// Mode of the scheme currently shown (or about to be shown).
    pub fn mode(&self) -> ThemeMode {
        let inner = self.inner.borrow();
        inner.pending_palette.unwrap_or(inner.mode)
    }

    /// Request the widget library and create the widget inside `container`
    /// once it is available. A container that is gone by then leaves the
    /// adapter in `Loading`; nothing is raised.
    pub fn initialize(&self, container: Option<L::Container>, config: EditorConfig) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state != AdapterState::Unloaded {
                tracing::warn!(state = ?inner.state, "editor adapter already initialized");
                return;
            }
            inner.state = AdapterState::Loading;
            inner.mode = config.mode;
            inner.config = config;
            inner.container = container;
        }
        self.state_events.emit(&AdapterState::Loading);

        let weak = Rc::downgrade(&self.inner);
        let adapter = WeakAdapter {
            inner: weak,
            changes: self.changes.clone(),
            state_events: self.state_events.clone(),
        };
        self.loader.request(move |result| adapter.on_library(result));
    }

    /// Current buffer text, or empty before `Ready` and after disposal.
    pub fn value(&self) -> String {
        self.inner
            .borrow()
            .widget
            .as_ref()
            .map(|w| w.value())
            .unwrap_or_default()
    }

    /// Replace the buffer. Subscribers are notified exactly as for a user edit.
    pub fn set_value(&self, text: &str) -> Result<()> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == AdapterState::Disposed {
                return Err(AppError::AdapterDisposed);
            }
            let Some(widget) = inner.widget.as_mut() else {
                tracing::debug!("set_value before the editor is ready, ignored");
                return Ok(());
            };
            let before = self.changes.pushed.get();
            self.changes.busy.set(true);
            widget.set_value(text);
            self.changes.busy.set(false);
            // a no-op replacement may not reach the widget's listener
            if self.changes.pushed.get() == before {
                self.changes.busy.set(true);
                self.changes.push(text);
                self.changes.busy.set(false);
            }
        }
        self.changes.flush();
        Ok(())
    }

    /// Called with the full text once per edit batch, in edit order.
    pub fn on_content_changed<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&str) + 'static,
    {
        self.changes.subscribers.subscribe(callback)
    }

    pub fn on_state_changed<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&AdapterState) + 'static,
    {
        self.state_events.subscribe(callback)
    }

    pub fn highlight_pattern(&self, pattern: &Pattern) {
        self.replace_decorations(vec![Decoration::for_pattern(pattern)], std::slice::from_ref(pattern));
    }

    pub fn highlight_patterns(&self, patterns: &[Pattern]) {
        let decorations = patterns.iter().map(Decoration::for_pattern).collect();
        self.replace_decorations(decorations, patterns);
    }

    pub fn clear_pattern_highlights(&self) {
        self.replace_decorations(Vec::new(), &[]);
    }

    /// Number of decorations currently held by the widget.
    pub fn decoration_count(&self) -> usize {
        self.inner.borrow().decoration_ids.len()
    }

    /// The whole decoration set is swapped in one widget call. Before the
    /// widget exists the set replaces the initial patterns instead.
    fn replace_decorations(&self, decorations: Vec<Decoration>, patterns: &[Pattern]) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        match inner.state {
            AdapterState::Ready => {
                if let Some(widget) = inner.widget.as_mut() {
                    inner.decoration_ids = widget.delta_decorations(&inner.decoration_ids, &decorations);
                }
            }
            AdapterState::Unloaded | AdapterState::Loading => {
                inner.config.patterns = patterns.to_vec();
            }
            AdapterState::Failed | AdapterState::Disposed => {}
        }
    }

    /// Switch the widget's color scheme. Idempotent; before `Ready` the mode is
    /// kept and applied when the widget is created.
    pub fn apply_palette_for_mode(&self, mode: ThemeMode) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        match inner.state {
            AdapterState::Ready => {
                inner.mode = mode;
                if let Some(widget) = inner.widget.as_mut() {
                    widget.set_scheme(&scheme_id(&inner.profile.id, mode));
                }
            }
            AdapterState::Unloaded | AdapterState::Loading => {
                inner.pending_palette = Some(mode);
            }
            AdapterState::Failed | AdapterState::Disposed => {
                tracing::debug!(state = ?inner.state, "palette switch on inactive editor ignored");
            }
        }
    }

    /// Follow a theme change: re-register the schemes when the profile
    /// changed, then switch to the scheme for the new mode.
    pub fn apply_theme_snapshot(&self, snapshot: &ThemeSnapshot) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == AdapterState::Disposed {
                return;
            }
            if !Rc::ptr_eq(&inner.profile, &snapshot.profile) {
                inner.profile = snapshot.profile.clone();
                if let Some(library) = inner.library.as_ref() {
                    define_schemes(library, &inner.profile);
                }
            }
        }
        self.apply_palette_for_mode(snapshot.mode);
    }

    /// Apply the store's current theme now and follow every later change.
    pub fn bind_theme(&self, store: &ThemeStore) -> Subscription {
        self.apply_theme_snapshot(&store.snapshot());
        let adapter = self.clone();
        store.subscribe(move |snapshot| adapter.apply_theme_snapshot(snapshot))
    }

    pub fn focus(&self) {
        if let Some(widget) = self.inner.borrow_mut().widget.as_mut() {
            widget.focus();
        }
    }

    /// Release the widget, its decorations and every subscriber. Later calls
    /// are no-ops (or `AdapterDisposed`), and a library completion that
    /// arrives afterwards is dropped.
    pub fn dispose(&self) {
        let widget = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == AdapterState::Disposed {
                return;
            }
            inner.state = AdapterState::Disposed;
            inner.decoration_ids.clear();
            inner.container = None;
            inner.library = None;
            inner.pending_palette = None;
            inner.widget.take()
        };

        if let Some(mut widget) = widget {
            widget.dispose();
        }
        tracing::debug!(listeners = self.changes.subscribers.len(), "editor adapter disposed");
        self.changes.discard();

        self.state_events.emit(&AdapterState::Disposed);
        self.state_events.clear();
    }
}

fn define_schemes<L: WidgetLibrary>(library: &L, profile: &ThemeProfile) {
    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        library.define_scheme(&EditorScheme::from_profile(profile, mode));
    }
}

/// What the loader holds on to while the library is in flight. Does not keep
/// the adapter alive.
struct WeakAdapter<L: WidgetLibrary> {
    inner: Weak<RefCell<Inner<L>>>,
    changes: ChangeQueue,
    state_events: Subscribers<AdapterState>,
}

impl<L: WidgetLibrary> WeakAdapter<L> {
    fn on_library(self, result: LoadResult<L>) {
        let Some(inner) = self.inner.upgrade() else {
            tracing::debug!("editor adapter dropped before the library loaded");
            return;
        };

        let state = inner.borrow().state;
        if state != AdapterState::Loading {
            tracing::debug!(state = ?state, "discarding late widget library completion");
            return;
        }

        let next = match result {
            Ok(library) => self.create_widget(&inner, library),
            Err(message) => {
                let error = AppError::WidgetLoad(message);
                tracing::error!(error = %error, "editor unavailable");
                inner.borrow_mut().state = AdapterState::Failed;
                Some(AdapterState::Failed)
            }
        };

        if let Some(state) = next {
            self.state_events.emit(&state);
        }
        self.changes.flush();
    }

    fn create_widget(&self, cell: &Rc<RefCell<Inner<L>>>, library: L) -> Option<AdapterState> {
        let mut guard = cell.borrow_mut();
        let inner = &mut *guard;

        let Some(container) = inner.container.clone() else {
            tracing::warn!("editor container is gone, widget not created");
            return None;
        };

        define_schemes(&library, &inner.profile);
        if let Some(mode) = inner.pending_palette.take() {
            inner.mode = mode;
        }
        let options = WidgetOptions::new(
            &inner.config,
            scheme_id(&inner.profile.id, inner.mode),
            &inner.profile.typography.code_font,
        );

        let mut widget = match library.create(&container, &options) {
            Ok(widget) => widget,
            Err(e) => {
                tracing::error!(error = %e, "failed to create editor widget");
                inner.state = AdapterState::Failed;
                return Some(AdapterState::Failed);
            }
        };

        let changes = self.changes.clone();
        let listener: ChangeListener = Rc::new(move |text| changes.push(text));
        widget.set_change_listener(listener);

        if !inner.config.patterns.is_empty() {
            let decorations: Vec<Decoration> =
                inner.config.patterns.iter().map(Decoration::for_pattern).collect();
            inner.decoration_ids = widget.delta_decorations(&[], &decorations);
        }

        tracing::info!(
            language = options.language.id(),
            scheme = %options.scheme,
            read_only = options.read_only,
            "editor ready"
        );
        inner.widget = Some(widget);
        inner.library = Some(library);
        inner.state = AdapterState::Ready;
        Some(AdapterState::Ready)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::domain::PatternType;
    use crate::app::infrastructure::preferences::MemoryPreferenceStore;
    use crate::app::infrastructure::style_surface::StyleSheet;
    use crate::app::theme::ProfileRegistry;

    type Listener = Rc<RefCell<Option<ChangeListener>>>;

    fn notify(listener: &Listener, text: &str) {
        let current = listener.borrow().clone();
        if let Some(listener) = current {
            listener(text);
        }
    }

    /// Everything the fake widget did, shared with the test.
    #[derive(Default)]
    pub(crate) struct FakeLog {
        pub created: u32,
        pub defined: Vec<String>,
        pub schemes: Vec<String>,
        pub options: Option<WidgetOptions>,
        pub decoration_calls: Vec<(Vec<DecorationId>, Vec<Decoration>)>,
        pub focused: u32,
        pub disposed: bool,
    }

    #[derive(Clone, Default)]
    pub(crate) struct FakeLibrary {
        pub log: Rc<RefCell<FakeLog>>,
        pub listener: Listener,
        pub fail_create: bool,
    }

    impl FakeLibrary {
        /// Simulate the user typing: the widget reports its new content.
        pub fn user_edit(&self, text: &str) {
            notify(&self.listener, text);
        }
    }

    pub(crate) struct FakeWidget {
        log: Rc<RefCell<FakeLog>>,
        listener: Listener,
        value: String,
        next_id: DecorationId,
    }

    impl EditorWidget for FakeWidget {
        fn value(&self) -> String {
            self.value.clone()
        }

        /// Like the FLTK buffer, replacing empty text with empty text is not
        /// an edit.
        fn set_value(&mut self, text: &str) {
            let unchanged = self.value.is_empty() && text.is_empty();
            self.value = text.to_string();
            if !unchanged {
                notify(&self.listener, text);
            }
        }

        fn set_change_listener(&mut self, listener: ChangeListener) {
            *self.listener.borrow_mut() = Some(listener);
        }

        fn set_scheme(&mut self, scheme_id: &str) {
            self.log.borrow_mut().schemes.push(scheme_id.to_string());
        }

        fn delta_decorations(&mut self, old: &[DecorationId], new: &[Decoration]) -> Vec<DecorationId> {
            self.log
                .borrow_mut()
                .decoration_calls
                .push((old.to_vec(), new.to_vec()));
            new.iter()
                .map(|_| {
                    self.next_id += 1;
                    self.next_id
                })
                .collect()
        }

        fn focus(&mut self) {
            self.log.borrow_mut().focused += 1;
        }

        fn dispose(&mut self) {
            self.log.borrow_mut().disposed = true;
            *self.listener.borrow_mut() = None;
        }
    }

    impl WidgetLibrary for FakeLibrary {
        type Container = &'static str;
        type Widget = FakeWidget;

        fn define_scheme(&self, scheme: &EditorScheme) {
            self.log.borrow_mut().defined.push(scheme.id.clone());
        }

        fn create(&self, _container: &Self::Container, options: &WidgetOptions) -> Result<FakeWidget> {
            if self.fail_create {
                return Err(AppError::WidgetLoad("no display".to_string()));
            }
            let mut log = self.log.borrow_mut();
            log.created += 1;
            log.options = Some(options.clone());
            Ok(FakeWidget {
                log: self.log.clone(),
                listener: self.listener.clone(),
                value: options.value.clone(),
                next_id: 0,
            })
        }
    }

    fn pattern(start: u32, end: u32) -> Pattern {
        Pattern {
            pattern_type: PatternType::SlidingWindow,
            confidence: 88,
            line_start: start,
            line_end: end,
            description: "Window over the array".to_string(),
            color: None,
        }
    }

    fn pending_loader() -> SingleFlight<FakeLibrary> {
        SingleFlight::new(|| {})
    }

    fn ready_adapter() -> (EditorAdapter<FakeLibrary>, FakeLibrary) {
        let library = FakeLibrary::default();
        let adapter = EditorAdapter::new(SingleFlight::ready(library.clone()));
        adapter.initialize(
            Some("editor"),
            EditorConfig {
                initial_code: "const a = 1;".to_string(),
                ..EditorConfig::default()
            },
        );
        (adapter, library)
    }

    fn record_changes(adapter: &EditorAdapter<FakeLibrary>) -> (Rc<RefCell<Vec<String>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let sub = adapter.on_content_changed(move |text| s.borrow_mut().push(text.to_string()));
        (seen, sub)
    }

    #[test]
    fn test_ready_after_library_loads() {
        let loader = pending_loader();
        let adapter = EditorAdapter::new(loader.clone());
        assert_eq!(adapter.state(), AdapterState::Unloaded);

        adapter.initialize(Some("editor"), EditorConfig::default());
        assert_eq!(adapter.state(), AdapterState::Loading);

        let library = FakeLibrary::default();
        loader.resolve(Ok(library.clone()));
        assert_eq!(adapter.state(), AdapterState::Ready);

        let log = library.log.borrow();
        assert_eq!(log.created, 1);
        assert_eq!(log.defined, vec!["obsidian-warmth-dark", "obsidian-warmth-light"]);
        assert_eq!(log.options.as_ref().unwrap().scheme, "obsidian-warmth-dark");
    }

    #[test]
    fn test_many_adapters_share_one_fetch() {
        let loader = pending_loader();
        let adapters: Vec<_> = (0..3).map(|_| EditorAdapter::new(loader.clone())).collect();
        for adapter in &adapters {
            adapter.initialize(Some("editor"), EditorConfig::default());
        }
        assert_eq!(loader.fetch_count(), 1);

        let library = FakeLibrary::default();
        loader.resolve(Ok(library.clone()));
        assert!(adapters.iter().all(|a| a.state() == AdapterState::Ready));
        assert_eq!(library.log.borrow().created, 3);

        let late = EditorAdapter::new(loader.clone());
        late.initialize(Some("editor"), EditorConfig::default());
        assert_eq!(late.state(), AdapterState::Ready);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn test_absent_container_stays_loading() {
        let library = FakeLibrary::default();
        let adapter = EditorAdapter::new(SingleFlight::ready(library.clone()));
        adapter.initialize(None, EditorConfig::default());

        assert_eq!(adapter.state(), AdapterState::Loading);
        assert_eq!(adapter.value(), "");
        assert_eq!(library.log.borrow().created, 0);
    }

    #[test]
    fn test_library_failure_is_visible() {
        let loader = pending_loader();
        let adapter = EditorAdapter::new(loader.clone());
        let states = Rc::new(RefCell::new(Vec::new()));
        let s = states.clone();
        let _sub = adapter.on_state_changed(move |state| s.borrow_mut().push(*state));

        adapter.initialize(Some("editor"), EditorConfig::default());
        loader.resolve(Err("network down".to_string()));

        assert_eq!(adapter.state(), AdapterState::Failed);
        assert_eq!(*states.borrow(), vec![AdapterState::Loading, AdapterState::Failed]);
    }

    #[test]
    fn test_widget_creation_failure() {
        let library = FakeLibrary {
            fail_create: true,
            ..FakeLibrary::default()
        };
        let adapter = EditorAdapter::new(SingleFlight::ready(library));
        adapter.initialize(Some("editor"), EditorConfig::default());
        assert_eq!(adapter.state(), AdapterState::Failed);
    }

    #[test]
    fn test_set_value_emits_once() {
        let (adapter, _library) = ready_adapter();
        let (seen, _sub) = record_changes(&adapter);

        adapter.set_value("x").unwrap();

        assert_eq!(*seen.borrow(), vec!["x".to_string()]);
        assert_eq!(adapter.value(), "x");
    }

    #[test]
    fn test_clearing_empty_buffer_still_notifies() {
        let library = FakeLibrary::default();
        let adapter = EditorAdapter::new(SingleFlight::ready(library));
        adapter.initialize(Some("editor"), EditorConfig::default());
        let (seen, _sub) = record_changes(&adapter);

        adapter.set_value("").unwrap();
        adapter.set_value("a").unwrap();

        assert_eq!(*seen.borrow(), vec!["", "a"]);
    }

    #[test]
    fn test_subscriber_can_set_value() {
        let (adapter, library) = ready_adapter();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let handle = adapter.clone();
        let s = seen.clone();
        let _sub = adapter.on_content_changed(move |text| {
            s.borrow_mut().push(text.to_string());
            if text == "abc" {
                handle.set_value("ABC").unwrap();
            }
        });

        library.user_edit("abc");

        assert_eq!(*seen.borrow(), vec!["abc", "ABC"]);
        assert_eq!(adapter.value(), "ABC");
        // breaks the handle cycle held by the subscriber
        adapter.dispose();
    }

    #[test]
    fn test_user_edits_arrive_in_order() {
        let (adapter, library) = ready_adapter();
        let (seen, _sub) = record_changes(&adapter);

        library.user_edit("a");
        library.user_edit("ab");
        library.user_edit("abc");

        assert_eq!(*seen.borrow(), vec!["a", "ab", "abc"]);
    }

    #[test]
    fn test_subscriber_may_read_value_during_notification() {
        let (adapter, _library) = ready_adapter();
        let read = Rc::new(RefCell::new(String::new()));

        let handle = adapter.clone();
        let r = read.clone();
        let _sub = adapter.on_content_changed(move |_| *r.borrow_mut() = handle.value());

        adapter.set_value("fn x() {}").unwrap();
        assert_eq!(*read.borrow(), "fn x() {}");
    }

    #[test]
    fn test_initial_text_is_not_a_change() {
        let library = FakeLibrary::default();
        let loader = pending_loader();
        let adapter = EditorAdapter::new(loader.clone());
        let (seen, _sub) = record_changes(&adapter);

        adapter.initialize(
            Some("editor"),
            EditorConfig {
                initial_code: "start".to_string(),
                ..EditorConfig::default()
            },
        );
        loader.resolve(Ok(library));

        assert_eq!(adapter.value(), "start");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_highlight_replaces_whole_set() {
        let (adapter, library) = ready_adapter();

        adapter.highlight_pattern(&pattern(1, 3));
        adapter.highlight_pattern(&pattern(5, 9));
        assert_eq!(adapter.decoration_count(), 1);

        let log = library.log.borrow();
        assert_eq!(log.decoration_calls.len(), 2);
        let (old, new) = &log.decoration_calls[1];
        assert_eq!(old, &vec![1]);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].range.start, 5);
    }

    #[test]
    fn test_clear_twice_matches_clear_once() {
        let (adapter, library) = ready_adapter();
        adapter.highlight_patterns(&[pattern(1, 2), pattern(4, 4)]);
        assert_eq!(adapter.decoration_count(), 2);

        adapter.clear_pattern_highlights();
        let after_once = adapter.decoration_count();
        adapter.clear_pattern_highlights();

        assert_eq!(after_once, 0);
        assert_eq!(adapter.decoration_count(), 0);
        let log = library.log.borrow();
        let (old, new) = log.decoration_calls.last().unwrap();
        assert!(old.is_empty());
        assert!(new.is_empty());
    }

    #[test]
    fn test_initial_patterns_are_decorated_at_ready() {
        let loader = pending_loader();
        let adapter = EditorAdapter::new(loader.clone());
        adapter.initialize(
            Some("editor"),
            EditorConfig {
                patterns: vec![pattern(2, 4)],
                ..EditorConfig::default()
            },
        );
        // A highlight requested while loading replaces the initial list.
        adapter.highlight_patterns(&[pattern(6, 8), pattern(10, 12)]);

        let library = FakeLibrary::default();
        loader.resolve(Ok(library.clone()));

        assert_eq!(adapter.decoration_count(), 2);
        let log = library.log.borrow();
        assert_eq!(log.decoration_calls[0].1[0].range.start, 6);
    }

    #[test]
    fn test_pending_palette_applied_at_ready() {
        let loader = pending_loader();
        let adapter = EditorAdapter::new(loader.clone());
        adapter.apply_palette_for_mode(ThemeMode::Light);
        adapter.initialize(Some("editor"), EditorConfig::default());
        adapter.apply_palette_for_mode(ThemeMode::Dark);
        adapter.apply_palette_for_mode(ThemeMode::Light);
        assert_eq!(adapter.mode(), ThemeMode::Light);

        let library = FakeLibrary::default();
        loader.resolve(Ok(library.clone()));

        let log = library.log.borrow();
        assert_eq!(log.options.as_ref().unwrap().scheme, "obsidian-warmth-light");
        assert!(log.schemes.is_empty());
    }

    #[test]
    fn test_palette_switch_is_idempotent() {
        let (adapter, library) = ready_adapter();
        adapter.apply_palette_for_mode(ThemeMode::Light);
        adapter.apply_palette_for_mode(ThemeMode::Light);

        assert_eq!(adapter.mode(), ThemeMode::Light);
        assert_eq!(
            library.log.borrow().schemes,
            vec!["obsidian-warmth-light", "obsidian-warmth-light"]
        );
    }

    #[test]
    fn test_bind_theme_follows_store() {
        let sheet = Rc::new(RefCell::new(StyleSheet::new()));
        let store = ThemeStore::new(
            ProfileRegistry::builtin(),
            Box::new(MemoryPreferenceStore::new()),
            sheet,
        );
        let (adapter, library) = ready_adapter();
        let _binding = adapter.bind_theme(&store);

        store.toggle_mode();
        store.toggle_mode();

        assert_eq!(
            library.log.borrow().schemes,
            vec!["obsidian-warmth-dark", "obsidian-warmth-light", "obsidian-warmth-dark"]
        );
    }

    #[test]
    fn test_dispose_releases_everything() {
        let (adapter, library) = ready_adapter();
        let (seen, sub) = record_changes(&adapter);
        adapter.highlight_pattern(&pattern(1, 1));

        adapter.dispose();
        adapter.dispose();

        assert_eq!(adapter.state(), AdapterState::Disposed);
        assert!(library.log.borrow().disposed);
        assert_eq!(adapter.decoration_count(), 0);
        assert_eq!(adapter.value(), "");
        assert!(matches!(adapter.set_value("late"), Err(AppError::AdapterDisposed)));

        adapter.focus();
        adapter.highlight_pattern(&pattern(2, 2));
        adapter.apply_palette_for_mode(ThemeMode::Light);
        assert!(seen.borrow().is_empty());
        sub.unsubscribe();
    }

    #[test]
    fn test_late_library_after_dispose_is_discarded() {
        let loader = pending_loader();
        let adapter = EditorAdapter::new(loader.clone());
        adapter.initialize(Some("editor"), EditorConfig::default());
        adapter.dispose();

        let library = FakeLibrary::default();
        loader.resolve(Ok(library.clone()));

        assert_eq!(adapter.state(), AdapterState::Disposed);
        assert_eq!(library.log.borrow().created, 0);
    }

    #[test]
    fn test_second_initialize_is_ignored() {
        let (adapter, library) = ready_adapter();
        adapter.initialize(Some("other"), EditorConfig::default());
        assert_eq!(library.log.borrow().created, 1);
        assert_eq!(adapter.state(), AdapterState::Ready);
    }

    #[test]
    fn test_focus_reaches_widget() {
        let (adapter, library) = ready_adapter();
        adapter.focus();
        assert_eq!(library.log.borrow().focused, 1);
    }
}
