//! Tidings - Activity digest aggregator
//!
//! Aggregates activity from heterogeneous remote sources into one
//! chronologically organized, human-readable digest. Clients are declared in
//! a `clients.toml` file; each names a provider (`github` | `matrix`) and its
//! credentials, and the aggregator fetches from all of them concurrently.
//!
//! # Architecture
//!
//! - **config**: clients.toml loading, setting resolution, validation
//! - **providers**: GitHub and Matrix clients behind the `ActivitySource` trait
//! - **timeline**: the Matrix conversation reconstruction pipeline
//! - **render**: pseudo-markdown digest output
//! - **digest**: concurrent fetch orchestration

pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod providers;
pub mod render;
pub mod timeline;

// Re-exports
pub use error::{Result, TidingsError};
