//! # Pinboard Board Client
//!
//! Client-side engine for the Pinboard board view: local board state, the
//! drag-and-drop gesture machine, the HTTP API client, and the engine that
//! ties them together with optimistic moves and server reconciliation.
//!
//! ## Modules
//!
//! - `store`: versioned local board state with pure reducer-style mutations
//! - `drag`: drag gesture state machine and drop-target resolution
//! - `api`: HTTP client for the Pinboard API
//! - `engine`: optimistic move pipeline with failure reconciliation

pub mod api;
pub mod drag;
pub mod engine;
pub mod store;

pub use engine::{BoardEngine, Notice};
pub use store::BoardStore;
