//! Infrastructure layer - external integrations and utilities.
//!
//! - Error types
//! - Preference persistence
//! - Style surfaces that receive resolved theme variables

pub mod error;
pub mod preferences;
pub mod style_surface;
