/*!
 * # subdelay
 *
 * A Rust library and CLI for shifting subtitle timestamps by a fixed delay.
 *
 * ## Features
 *
 * - Shift SRT and WebVTT timestamps by a signed millisecond delay
 * - Overwrite in place or write to a derived sibling file
 * - Optional clamping of would-be-negative timestamps to zero
 * - Process a single file or every subtitle file under a directory
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Timestamp parsing, formatting and the shift pass
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ShiftRequest};
pub use errors::{AppError, SubtitleError};
pub use subtitle_processor::{ShiftOptions, SubtitleFormat};
