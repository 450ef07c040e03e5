//! Services layer - the analysis backend and how the UI calls it.
//!
//! - `backend` - the request/response contract
//! - `mock` - fixture-backed implementation with artificial latency
//! - `client` - runs requests on worker threads

pub mod backend;
pub mod client;
pub mod mock;

pub use backend::{AnalysisBackend, DEFAULT_PROBLEM_ID};
pub use client::BackendClient;
pub use mock::{Latency, MockAnalysisService};
