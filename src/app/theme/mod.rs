//! Theme store, built-in profiles and the derived editor color schemes.

pub mod color;
pub mod profiles;
pub mod scheme;
pub mod store;
pub mod tokens;

pub use color::Rgba;
pub use profiles::{DEFAULT_PROFILE_ID, ProfileRegistry};
pub use scheme::{EditorScheme, scheme_id};
pub use store::{ThemeSnapshot, ThemeStore};
