/*!
 * End-to-end tests for the shift workflow
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use subdelay::app_config::Config;
use subdelay::app_controller::{Controller, ShiftRequest};
use subdelay::errors::AppError;
use crate::common;

fn request(delay_ms: i64) -> ShiftRequest {
    ShiftRequest {
        delay_ms,
        create_new_file: false,
        prevent_underflow: false,
    }
}

/// Overwrite mode rewrites the input file in place
#[test]
fn test_shift_workflow_withOverwriteMode_shouldRewriteInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let controller = Controller::new_for_test()?;
    let written = controller.run(&input, &request(500))?;

    assert_eq!(written, input);
    let content = fs::read_to_string(&input)?;
    assert!(content.contains("00:00:01,500 --> 00:00:04,500"));
    assert!(content.contains("00:00:05,500 --> 00:00:09,500"));
    assert!(content.contains("This is a test subtitle."));

    Ok(())
}

/// New-file mode leaves the original untouched and writes the derived path
#[test]
fn test_shift_workflow_withNewFileMode_shouldLeaveOriginalUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(&temp_dir.path().to_path_buf(), "movie.srt")?;
    let original_bytes = fs::read(&input)?;

    let controller = Controller::new_for_test()?;
    let shift_request = ShiftRequest {
        delay_ms: 500,
        create_new_file: true,
        prevent_underflow: false,
    };
    let written = controller.run(&input, &shift_request)?;

    assert_eq!(written, temp_dir.path().join("delay_500ms_movie.srt"));
    assert!(written.exists());
    assert_eq!(fs::read(&input)?, original_bytes);

    let shifted = fs::read_to_string(&written)?;
    assert!(shifted.contains("00:00:01,500 --> 00:00:04,500"));

    Ok(())
}

/// Round-trip identity at the file level: zero delay is byte-identical
#[test]
fn test_shift_workflow_withZeroDelay_shouldBeByteIdentical() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(&temp_dir.path().to_path_buf(), "movie.srt")?;
    let original_bytes = fs::read(&input)?;

    let controller = Controller::new_for_test()?;
    controller.run(&input, &request(0))?;

    assert_eq!(fs::read(&input)?, original_bytes);

    Ok(())
}

/// A WebVTT file keeps period separators and its cue settings
#[test]
fn test_shift_workflow_withVttFile_shouldKeepPeriodsAndCueSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_vtt(&temp_dir.path().to_path_buf(), "movie.vtt")?;

    let controller = Controller::new_for_test()?;
    controller.run(&input, &request(-500))?;

    let content = fs::read_to_string(&input)?;
    assert!(content.starts_with("WEBVTT\n"));
    assert!(content.contains("00:00:00.500 --> 00:00:03.500"));
    assert!(content.contains("00:00:04.500 --> 00:00:08.500 position:50% line:85%"));
    assert!(!content.contains(','));

    Ok(())
}

/// Clamping applies through the whole workflow
#[test]
fn test_shift_workflow_withClampEnabled_shouldFloorAtZero() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let controller = Controller::new_for_test()?;
    let shift_request = ShiftRequest {
        delay_ms: -2_000,
        create_new_file: false,
        prevent_underflow: true,
    };
    controller.run(&input, &shift_request)?;

    let content = fs::read_to_string(&input)?;
    assert!(content.contains("00:00:00,000 --> 00:00:02,000"));

    Ok(())
}

/// A missing input path is rejected before any processing
#[test]
fn test_shift_workflow_withMissingFile_shouldFailWithFileNotFound() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let err = controller
        .run(Path::new("/definitely/missing/movie.srt"), &request(500))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::FileNotFound(_))
    ));

    Ok(())
}

/// An unsupported extension is rejected before any processing
#[test]
fn test_shift_workflow_withUnsupportedExtension_shouldFailWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "notes.txt", "1\n00:00:01,000 --> 00:00:02,000\nHi\n")?;
    let original_bytes = fs::read(&input)?;

    let controller = Controller::new_for_test()?;
    let err = controller.run(&input, &request(500)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::UnsupportedExtension(_))
    ));
    assert_eq!(fs::read(&input)?, original_bytes);

    Ok(())
}

/// Folder mode shifts every subtitle file beneath the directory
#[test]
fn test_shift_workflow_withFolderInput_shouldProcessAllSubtitleFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let nested = root.join("extras");
    fs::create_dir_all(&nested)?;

    common::create_test_srt(&root, "a.srt")?;
    common::create_test_vtt(&root, "b.vtt")?;
    common::create_test_srt(&nested, "c.srt")?;
    common::create_test_file(&root, "ignore.txt", "not a subtitle")?;

    let controller = Controller::new_for_test()?;
    let processed = controller.run_folder(temp_dir.path(), &request(1_000))?;

    assert_eq!(processed, 3);
    let shifted = fs::read_to_string(root.join("a.srt"))?;
    assert!(shifted.contains("00:00:02,000 --> 00:00:05,000"));
    let shifted_vtt = fs::read_to_string(root.join("b.vtt"))?;
    assert!(shifted_vtt.contains("00:00:02.000 --> 00:00:05.000"));
    let shifted_nested = fs::read_to_string(nested.join("c.srt"))?;
    assert!(shifted_nested.contains("00:00:02,000 --> 00:00:05,000"));

    Ok(())
}

/// Config defaults merge into the request unless a CLI flag wins
#[test]
fn test_resolve_request_withConfigDefaults_shouldMergeFlags() -> Result<()> {
    let config = Config {
        create_new_file: true,
        prevent_underflow: false,
        log_level: Default::default(),
    };
    let controller = Controller::with_config(config)?;

    let merged = controller.resolve_request(250, false, true);
    assert_eq!(merged.delay_ms, 250);
    // From config
    assert!(merged.create_new_file);
    // From the CLI flag
    assert!(merged.prevent_underflow);

    Ok(())
}
