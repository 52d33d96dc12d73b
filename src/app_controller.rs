use anyhow::{Result, Context};
use log::{error, info, debug};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{self, ShiftOptions, SubtitleFormat};

// @module: Application controller for subtitle shifting

/// Parameters of one shift run, resolved from CLI flags and config
#[derive(Debug, Clone, Copy)]
pub struct ShiftRequest {
    /// Signed delay in milliseconds
    pub delay_ms: i64,

    /// Write to a derived sibling file instead of overwriting the input
    pub create_new_file: bool,

    /// Clamp would-be-negative timestamps to zero
    pub prevent_underflow: bool,
}

/// Main application controller for subtitle shifting
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    #[allow(dead_code)]
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Merge CLI flags with configured defaults into a shift request.
    /// A flag set on the command line wins over its config value.
    pub fn resolve_request(
        &self,
        delay_ms: i64,
        create_new_file: bool,
        prevent_underflow: bool,
    ) -> ShiftRequest {
        ShiftRequest {
            delay_ms,
            create_new_file: create_new_file || self.config.create_new_file,
            prevent_underflow: prevent_underflow || self.config.prevent_underflow,
        }
    }

    /// Shift every timestamp in a single subtitle file.
    ///
    /// The format is selected from the file extension and stays fixed for
    /// the whole pass. Returns the path the shifted document was written to.
    pub fn run(&self, input_file: &Path, request: &ShiftRequest) -> Result<PathBuf> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::FileNotFound(input_file.to_path_buf()).into());
        }

        let format = SubtitleFormat::from_path(input_file)?;
        debug!(
            "Detected {:?} input, separator '{}'",
            format,
            format.separator()
        );

        let content = FileManager::read_to_string(input_file)?;

        let options = ShiftOptions {
            delay_ms: request.delay_ms,
            prevent_underflow: request.prevent_underflow,
        };
        let shifted = subtitle_processor::shift_content(&content, format, &options)
            .with_context(|| format!("Failed to shift timestamps in {:?}", input_file))?;

        let output_path = if request.create_new_file {
            FileManager::delayed_output_path(input_file, request.delay_ms)
        } else {
            input_file.to_path_buf()
        };

        FileManager::write_to_file(&output_path, &shifted)?;

        info!(
            "Delay of {}s or {}ms added. Shifted subtitles saved to: {:?}",
            request.delay_ms as f64 / 1000.0,
            request.delay_ms,
            output_path
        );

        Ok(output_path)
    }

    /// Shift every subtitle file found beneath a directory.
    ///
    /// Each file keeps its own format selection. Files that fail are logged
    /// and skipped. Returns the number of files shifted successfully.
    pub fn run_folder(&self, input_dir: &Path, request: &ShiftRequest) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::FileNotFound(input_dir.to_path_buf()).into());
        }

        info!("Shifting subtitle files under: {:?}", input_dir);

        let mut subtitle_files = FileManager::find_files(input_dir, "srt")?;
        subtitle_files.extend(FileManager::find_files(input_dir, "vtt")?);
        subtitle_files.sort();

        let mut processed_count = 0;
        for path in &subtitle_files {
            if let Err(e) = self.run(path, request) {
                error!("Error processing file {:?}: {}", path, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} files", processed_count);

        Ok(processed_count)
    }
}
