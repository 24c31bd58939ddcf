/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use tokio_test;
use storyreel::app_config::Config;
use storyreel::app_controller::Controller;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.is_initialized());
    Ok(())
}

/// Test the controller with custom configuration
#[test]
fn test_controller_withCustomConfig_shouldInitializeWithoutErrors() -> Result<()> {
    let mut config = Config::default();
    config.speech.gender = "m".to_string();
    config.speech.voice = "adam".to_string();
    config.subtitle.words_per_cue = 2;

    config.validate()?;
    let controller = Controller::with_config(config)?;
    assert!(controller.is_initialized());
    Ok(())
}

/// Test that a controller without endpoints reports itself uninitialized
#[test]
fn test_controller_withEmptyEndpoints_shouldNotBeInitialized() -> Result<()> {
    let mut config = Config::default();
    config.editor.endpoint = String::new();

    let controller = Controller::with_config(config)?;
    assert!(!controller.is_initialized());
    Ok(())
}

/// Test the simulated single-story run
#[test]
fn test_testRun_withStoryFile_shouldCompleteWithoutRemoteCalls() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let temp_dir = common::create_temp_dir()?;
    let story_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "story.txt",
        "A test story\nWith a body.",
    )?;
    let background = temp_dir.path().join("background.mp4");

    let result = tokio_test::block_on(async {
        controller
            .test_run(&story_path.to_string_lossy(), background, false)
            .await
    });

    assert!(result.is_ok(), "Simulated run should complete without errors");
    Ok(())
}

/// Test the simulated folder run
#[test]
fn test_testRunFolder_withStoryDirectory_shouldComplete() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "one.txt", "Story one\nBody.")?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "two.txt", "Story two\nBody.")?;

    let result = tokio_test::block_on(async {
        controller.test_run_folder(temp_dir.path().to_path_buf(), false).await
    });

    assert!(result.is_ok(), "Simulated folder run should complete without errors");
    Ok(())
}

/// Test that a simulated run fails on an uninitialized controller
#[test]
fn test_testRun_withUninitializedController_shouldFail() -> Result<()> {
    let mut config = Config::default();
    config.speech.endpoint = String::new();
    let controller = Controller::with_config(config)?;

    let result = tokio_test::block_on(async {
        controller.test_run("story.txt", "bg.mp4".into(), false).await
    });

    assert!(result.is_err());
    Ok(())
}

/// Test the real pipeline's early validation of the background video path
#[tokio::test]
async fn test_run_withMissingBackgroundVideo_shouldFailBeforeAnyNetworkCall() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let temp_dir = common::create_temp_dir()?;
    let story_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "story.txt",
        "A test story\nWith a body.",
    )?;
    let missing_background = temp_dir.path().join("missing.mp4");

    let result = controller
        .run(&story_path.to_string_lossy(), missing_background, false)
        .await;

    assert!(result.is_err(), "A missing background video must fail fast");
    Ok(())
}
