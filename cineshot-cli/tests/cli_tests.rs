// cineshot-cli/tests/cli_tests.rs
//
// Black-box tests of the cineshot binary. These avoid anything that needs
// ffmpeg or ffprobe on the test machine: argument parsing, error paths, and
// single-image runs through the pure-Rust pipeline.

use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

fn cineshot_cmd() -> Command {
    Command::cargo_bin("cineshot").expect("failed to find cineshot binary")
}

#[test]
fn help_lists_subcommands() -> Result<(), Box<dyn Error>> {
    cineshot_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("analyze"))
        .stdout(contains("classify"))
        .stdout(contains("eval"))
        .stdout(contains("info"));
    Ok(())
}

#[test]
fn analyze_requires_a_model() -> Result<(), Box<dyn Error>> {
    cineshot_cmd()
        .env_remove("CINESHOT_MODEL")
        .arg("analyze")
        .arg("film.mp4")
        .assert()
        .failure()
        .stderr(contains("--model"));
    Ok(())
}

#[test]
fn analyze_rejects_missing_input() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let model = dir.path().join("model.json");
    std::fs::write(&model, "{}")?;

    cineshot_cmd()
        .arg("analyze")
        .arg("surely/does/not/exist.mp4")
        .arg("--model")
        .arg(&model)
        .assert()
        .failure()
        .stderr(contains("not found"));
    Ok(())
}

#[test]
fn classify_rejects_malformed_model() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let model = dir.path().join("model.json");
    std::fs::write(&model, "not json")?;

    cineshot_cmd()
        .arg("classify")
        .arg("image.png")
        .arg("--model")
        .arg(&model)
        .assert()
        .failure()
        .stderr(contains("model"));
    Ok(())
}

#[test]
fn eval_rejects_missing_ground_truth() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let model = dir.path().join("model.json");
    // Minimal structurally valid model.
    std::fs::write(
        &model,
        r#"{
            "label": "face",
            "window_width": 8,
            "window_height": 8,
            "stages": [{
                "threshold": 0.0,
                "classifiers": [{
                    "rects": [{"x": 0, "y": 0, "width": 8, "height": 8, "weight": 1.0}],
                    "threshold": 0.0,
                    "fail_value": 0.0,
                    "pass_value": 1.0
                }]
            }]
        }"#,
    )?;

    cineshot_cmd()
        .arg("eval")
        .arg("--dataset")
        .arg(dir.path())
        .arg("--ground-truth")
        .arg(dir.path().join("absent.csv"))
        .arg("--model")
        .arg(&model)
        .assert()
        .failure()
        .stderr(contains("Ground truth"));
    Ok(())
}

#[test]
fn info_rejects_missing_file() -> Result<(), Box<dyn Error>> {
    cineshot_cmd()
        .arg("info")
        .arg("surely/does/not/exist.mp4")
        .assert()
        .failure()
        .stderr(contains("not found"));
    Ok(())
}

#[test]
fn info_rejects_unsupported_extension() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let odd = dir.path().join("notes.txt");
    std::fs::write(&odd, "hello")?;

    cineshot_cmd()
        .arg("info")
        .arg(&odd)
        .assert()
        .failure()
        .stderr(contains("Unsupported"));
    Ok(())
}

#[test]
fn invalid_subcommand_fails() -> Result<(), Box<dyn Error>> {
    cineshot_cmd()
        .arg("transcode")
        .assert()
        .failure()
        .stderr(contains("unrecognized subcommand"));
    Ok(())
}
