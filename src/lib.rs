//! Vitrin - a keyboard-driven product catalog browser
//!
//! This library provides the building blocks of a terminal front end for
//! a remote product catalog API: debounced search, server-side paging
//! with compact page windowing, cross-filtered brand/category facets
//! with draft selections, and a persistent, shareable query state.
//!
//! The `browse` module ties everything together into the interactive
//! session the `vitrin` binary runs; the leaf modules (`debounce`,
//! `paging`, `facets`, `query`, `fetch`) are independently usable and
//! independently tested.

use thiserror::Error;

pub mod api;
pub mod browse;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod facets;
pub mod fetch;
pub mod filters;
pub mod logging;
pub mod output;
pub mod paging;
pub mod query;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum VitrinError {
    /// Catalog API error
    #[error("API error: {0}")]
    Api(#[from] api::ApiError),
    /// View-state persistence error
    #[error("State error: {0}")]
    Store(#[from] query::StoreError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
