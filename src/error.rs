//! # Error Types
//!
//! This module defines error types used throughout the slipmark library.
//!
//! The codec, layout, wrap and render layers are total and never produce
//! these; only the pipeline entry points, the template store, configuration
//! loading and the PNG canvas do.

use thiserror::Error;

/// Main error type for slipmark operations
#[derive(Debug, Error)]
pub enum SlipmarkError {
    /// Nothing left to lay out or print after trimming
    #[error("No content to print. Please enter some text first.")]
    EmptyContent,

    /// Template lookup or naming error
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
