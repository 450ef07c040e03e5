//! Controllers layer - orchestration between the editor, the backend and the UI.
//!
//! - `workbench` - host-view state and request bookkeeping

pub mod workbench;
