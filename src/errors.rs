/*!
 * Error types for the subdelay application.
 *
 * This module contains custom error types for the fatal failure modes of a
 * shift run, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while handling timestamp text
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Timestamp text does not have the `HH:MM:SS<sep>mmm` shape
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),
}

/// Main application error type; every variant aborts the run
#[derive(Error, Debug)]
pub enum AppError {
    /// Neither a seconds nor a milliseconds delay was supplied
    #[error("No delay given: provide either --seconds or --milliseconds")]
    MissingDelay,

    /// Input path does not exist
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    /// Input extension is neither recognized subtitle variant
    #[error("Invalid file extension for {0:?}: only .srt and .vtt files are supported")]
    UnsupportedExtension(PathBuf),

    /// Read or write failure at the filesystem boundary
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from timestamp handling
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),
}
