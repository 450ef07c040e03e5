//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (themes, patterns, hints, execution results)
//! - `theme/` - Theme store, profiles and derived editor color schemes
//! - `editor/` - Editor adapter lifecycle and the widget boundary
//! - `controllers/` - Orchestration (Workbench)
//! - `services/` - Analysis backend contract, mock implementation, worker client
//! - `infrastructure/` - Preferences, style surface, error
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod editor;
pub mod infrastructure;
pub mod messages;
pub mod reactive;
pub mod services;
pub mod state;
pub mod theme;

// Re-exports for convenient external access
pub use controllers::workbench::Workbench;
pub use domain::{Pattern, ThemeMode, ThemeProfile};
pub use editor::{AdapterState, EditorAdapter, EditorConfig};
pub use infrastructure::error::{AppError, Result};
pub use messages::Message;
pub use theme::{ThemeSnapshot, ThemeStore};
