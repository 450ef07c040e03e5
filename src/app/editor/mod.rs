//! Editor adapter: lifecycle of one external text-editing widget.

pub mod adapter;
pub mod loader;
pub mod widget;

pub use adapter::{AdapterState, EditorAdapter};
pub use loader::{LoadPhase, LoadResult, SingleFlight};
pub use widget::{
    ChangeListener, Decoration, DecorationId, EditorConfig, EditorWidget, LineRange,
    PATTERN_HIGHLIGHT_CLASS, WidgetLibrary, WidgetOptions,
};
