//! CLI integration tests for the `jt` binary.
//!
//! Each test runs in its own temp directory so config discovery and
//! default output names never touch the source tree.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn jt_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jt"))
}

fn script(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scripts").join(name)
}

/// Run jt in `dir` and return (stdout, stderr, exit code).
fn run_jt(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(jt_binary())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute jt");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("output file")).expect("valid JSON")
}

// ============================================================================
// export
// ============================================================================

#[test]
fn test_export_banner_script() {
    let temp = TempDir::new().unwrap();
    let banner = script("banner.jts");
    let (stdout, stderr, code) = run_jt(
        temp.path(),
        &["export", banner.to_str().unwrap(), "--width", "8", "--height", "2", "-o", "banner"],
    );
    assert_eq!(code, 0, "export should succeed: {}", stderr);
    assert!(stdout.contains("banner.jt"));

    let json = read_json(&temp.path().join("banner.jt"));
    let data = &json[0]["data"];
    assert_eq!(json[0]["dataType"], 1);
    assert_eq!(data["pixelWidth"], 8);
    assert_eq!(data["pixelHeight"], 2);
    let payload: Vec<u64> =
        data["graffitiData"].as_array().unwrap().iter().map(|v| v.as_u64().unwrap()).collect();
    assert_eq!(
        payload,
        vec![
            0xC0, 0xC0, 0xC0, 0, 0, 0, 0, 0xC0, // red
            0, 0, 0, 0, 0, 0, 0, 0, // green
            0, 0, 0, 0xC0, 0xC0, 0xC0, 0xC0, 0, // blue
        ]
    );
}

#[test]
fn test_export_animation_script() {
    let temp = TempDir::new().unwrap();
    let blink = script("blink.jts");
    let (_, stderr, code) = run_jt(
        temp.path(),
        &["export", blink.to_str().unwrap(), "--width", "4", "--height", "8", "-o", "blink.jt"],
    );
    assert_eq!(code, 0, "export should succeed: {}", stderr);

    let json = read_json(&temp.path().join("blink.jt"));
    let data = &json[0]["data"];
    assert_eq!(json[0]["dataType"], 0);
    assert_eq!(data["frameNum"], 3);
    assert_eq!(data["delays"], 100);
    assert_eq!(data["aniData"].as_array().unwrap().len(), 3 * 3 * 4);
}

#[test]
fn test_export_uses_config_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("jt.toml"),
        "[canvas]\nwidth = 3\nheight = 8\n\n[export]\ndefault_name = \"panel\"\npretty = true\n",
    )
    .unwrap();

    let (_, stderr, code) = run_jt(temp.path(), &["export"]);
    assert_eq!(code, 0, "export should succeed: {}", stderr);

    let text = std::fs::read_to_string(temp.path().join("panel.jt")).unwrap();
    assert!(text.contains('\n'), "pretty output spans lines");
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json[0]["data"]["pixelWidth"], 3);
    assert_eq!(json[0]["data"]["graffitiData"].as_array().unwrap().len(), 9);
}

#[test]
fn test_export_rejects_zero_delay() {
    let temp = TempDir::new().unwrap();
    let (_, stderr, code) = run_jt(temp.path(), &["export", "--delay", "0"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Error"));
    assert!(!temp.path().join("image.jt").exists());
}

#[test]
fn test_export_script_error_names_line() {
    let temp = TempDir::new().unwrap();
    let broken = script("broken.jts");
    let (_, stderr, code) = run_jt(temp.path(), &["export", broken.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 2"), "stderr was: {}", stderr);
    assert!(!temp.path().join("image.jt").exists());
}

#[test]
fn test_export_from_existing_file() {
    let temp = TempDir::new().unwrap();
    let blink = script("blink.jts");
    let (_, _, code) = run_jt(
        temp.path(),
        &["export", blink.to_str().unwrap(), "--width", "2", "--height", "8", "-o", "src"],
    );
    assert_eq!(code, 0);

    // Re-export only the current frame of the decoded animation
    let (_, stderr, code) =
        run_jt(temp.path(), &["export", "--from", "src.jt", "--mode", "static", "-o", "still"]);
    assert_eq!(code, 0, "re-export should succeed: {}", stderr);
    let json = read_json(&temp.path().join("still.jt"));
    assert_eq!(json[0]["dataType"], 1);
    assert_eq!(json[0]["data"]["graffitiData"].as_array().unwrap().len(), 3 * 2);
}

#[test]
fn test_export_from_existing_file_applies_colors() {
    let temp = TempDir::new().unwrap();
    let (_, _, code) = run_jt(temp.path(), &["export", "--width", "2", "--height", "8", "-o", "blank"]);
    assert_eq!(code, 0);

    let corners = script("corners.jts");
    let (_, stderr, code) = run_jt(
        temp.path(),
        &[
            "export",
            corners.to_str().unwrap(),
            "--from",
            "blank.jt",
            "--primary",
            "red",
            "--secondary",
            "blue",
            "-o",
            "painted",
        ],
    );
    assert_eq!(code, 0, "export should succeed: {}", stderr);

    let json = read_json(&temp.path().join("painted.jt"));
    let payload: Vec<u64> = json[0]["data"]["graffitiData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();
    // red plane, green plane, blue plane; one byte per column
    assert_eq!(payload, vec![0x80, 0, 0, 0, 0, 0x80]);
}

#[test]
fn test_export_from_rejects_size_flags() {
    let temp = TempDir::new().unwrap();
    let (_, _, code) = run_jt(temp.path(), &["export", "-o", "blank"]);
    assert_eq!(code, 0);

    let (_, stderr, code) =
        run_jt(temp.path(), &["export", "--from", "blank.jt", "--width", "4", "-o", "resized"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("--width"), "stderr was: {}", stderr);
    assert!(!temp.path().join("resized.jt").exists());
}

// ============================================================================
// inspect
// ============================================================================

#[test]
fn test_inspect_text_and_json() {
    let temp = TempDir::new().unwrap();
    let banner = script("banner.jts");
    let (_, _, code) = run_jt(
        temp.path(),
        &["export", banner.to_str().unwrap(), "--width", "8", "--height", "2", "-o", "banner"],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_jt(temp.path(), &["inspect", "banner.jt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Size: 8x2"));
    assert!(stdout.contains("RRRBBBBR"));
    assert!(stdout.contains("Red: ["));

    let (stdout, _, code) = run_jt(temp.path(), &["inspect", "banner.jt", "--json"]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["mode"], "static");
    assert_eq!(json["frameCount"], 1);
    assert_eq!(json["frames"][0][0][0], "red");
    assert_eq!(json["frames"][0][1][7], "red");
}

#[test]
fn test_inspect_rejects_garbage() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("bad.jt"), "[{\"dataType\": 7, \"data\": {}}]").unwrap();
    let (_, stderr, code) = run_jt(temp.path(), &["inspect", "bad.jt"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("bad.jt"));
}

// ============================================================================
// preview and palette
// ============================================================================

#[test]
fn test_preview_writes_scaled_png() {
    let temp = TempDir::new().unwrap();
    let banner = script("banner.jts");
    let (_, stderr, code) = run_jt(
        temp.path(),
        &[
            "preview",
            banner.to_str().unwrap(),
            "--width",
            "8",
            "--height",
            "2",
            "--scale",
            "4",
            "-o",
            "banner",
        ],
    );
    assert_eq!(code, 0, "preview should succeed: {}", stderr);

    let image = image::open(temp.path().join("banner.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (32, 8));
    assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(31, 7).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(16, 0).0, [0, 0, 255, 255]);
}

#[test]
fn test_preview_missing_frame() {
    let temp = TempDir::new().unwrap();
    let (_, stderr, code) =
        run_jt(temp.path(), &["preview", "--width", "2", "--height", "2", "--frame", "4", "-o", "x"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_palette_lists_all_colors() {
    let temp = TempDir::new().unwrap();
    let (stdout, _, code) = run_jt(temp.path(), &["palette"]);
    assert_eq!(code, 0);
    for name in ["Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "White"] {
        assert!(stdout.contains(name), "missing {}", name);
    }
    assert!(stdout.contains("101"));
    assert!(stdout.contains("#FF00FF"));
}
