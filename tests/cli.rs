use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn mirrorpaint_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mirrorpaint").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write_png(path: &Path, width: i32, height: i32) {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.2, 0.4, 0.6);
        ctx.paint().unwrap();
    }
    let mut file = std::fs::File::create(path).unwrap();
    surface.write_to_png(&mut file).unwrap();
}

fn png_size(path: &Path) -> (i32, i32) {
    let mut file = std::fs::File::open(path).unwrap();
    let surface = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    (surface.width(), surface.height())
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    mirrorpaint_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Paint makeup strokes and place stickers over a photo",
        ));
}

#[test]
fn script_is_required() {
    let temp = TempDir::new().unwrap();
    mirrorpaint_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--script"));
}

#[test]
fn missing_script_file_fails() {
    let temp = TempDir::new().unwrap();
    mirrorpaint_cmd(temp.path())
        .args(["--script", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn replays_script_over_background_and_writes_png() {
    let temp = TempDir::new().unwrap();
    let assets = temp.path().join("assets");
    std::fs::create_dir_all(assets.join("glasses")).unwrap();
    write_png(&assets.join("glasses/glasses-round.png"), 120, 40);
    write_png(&temp.path().join("face.png"), 320, 240);

    let script = temp.path().join("session.json");
    std::fs::write(
        &script,
        r#"{"events": [
            {"type": "select_tool", "id": "lip-red"},
            {"type": "pointer_down", "x": 40, "y": 40},
            {"type": "pointer_move", "x": 60, "y": 50},
            {"type": "pointer_up", "x": 60, "y": 50},
            {"type": "select_tool", "id": "glasses-round"},
            {"type": "pointer_down", "x": 160, "y": 100},
            {"type": "pointer_up", "x": 160, "y": 100},
            {"type": "wheel", "x": 160, "y": 100, "delta": -1}
        ]}"#,
    )
    .unwrap();
    let output = temp.path().join("out/result.png");

    mirrorpaint_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--background")
        .arg(temp.path().join("face.png"))
        .arg("--assets")
        .arg(&assets)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    assert_eq!(png_size(&output), (320, 240));
}

#[test]
fn missing_sticker_warns_but_still_exports() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.json");
    std::fs::write(
        &script,
        r#"{"events": [
            {"type": "select_tool", "id": "nose-ring"},
            {"type": "pointer_down", "x": 10, "y": 10},
            {"type": "pointer_up", "x": 10, "y": 10}
        ]}"#,
    )
    .unwrap();
    let output = temp.path().join("result.png");

    mirrorpaint_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--assets")
        .arg(temp.path().join("empty"))
        .args(["--width", "64", "--height", "32"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("jewelry/nose-ring.png"));

    assert_eq!(png_size(&output), (64, 32));
}

#[test]
fn explicit_config_file_is_used() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        r#"
        [[tools.brushes]]
        id = "gold"
        label = "Gold"
        color = [212, 175, 55]
        width = 6.0
        opacity = 1.0
        "#,
    )
    .unwrap();
    let script = temp.path().join("session.json");
    std::fs::write(
        &script,
        r#"{"events": [{"type": "select_tool", "id": "gold"}]}"#,
    )
    .unwrap();

    mirrorpaint_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("x.png"))
        .assert()
        .success();
}

#[test]
fn malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    std::fs::write(&config, "[view\nzoom_step = ").unwrap();
    let script = temp.path().join("session.json");
    std::fs::write(&script, r#"{"events": []}"#).unwrap();

    mirrorpaint_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
