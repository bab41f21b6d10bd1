use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rastermark_cmd() -> Command {
    Command::cargo_bin("rastermark").expect("binary exists")
}

/// Writes a small solid PNG for the CLI to annotate.
fn write_base_png(path: &std::path::Path, width: i32, height: i32) {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = cairo::Context::new(&surface).unwrap();
    ctx.set_source_rgba(1.0, 1.0, 1.0, 1.0);
    ctx.paint().unwrap();
    drop(ctx);

    let mut file = std::fs::File::create(path).unwrap();
    surface.write_to_png(&mut file).unwrap();
}

#[test]
fn rastermark_help_prints_usage() {
    rastermark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Gesture-driven raster annotation editor",
        ));
}

#[test]
fn input_argument_is_required() {
    rastermark_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn missing_input_file_reports_the_path() {
    let temp = TempDir::new().unwrap();
    rastermark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--input", "/definitely/not/here.png", "--output", "/tmp/out.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/definitely/not/here.png"));
}

#[test]
fn replaying_markup_writes_the_composite() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base.png");
    let markup = temp.path().join("markup.toml");
    let output = temp.path().join("out.png");
    write_base_png(&base, 120, 80);

    std::fs::write(
        &markup,
        r#"
[style]
line_width = 3.0

[[step]]
tool = "line"
start = [10.0, 10.0]
end = [110.0, 70.0]

[[step]]
tool = "number"
at = [30.0, 40.0]
"#,
    )
    .unwrap();

    rastermark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--input"])
        .arg(&base)
        .args(["--markup"])
        .arg(&markup)
        .args(["--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved composite"));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    // The composite keeps the base dimensions
    let mut reader = std::io::Cursor::new(bytes);
    let composed = cairo::ImageSurface::create_from_png(&mut reader).unwrap();
    assert_eq!(composed.width(), 120);
    assert_eq!(composed.height(), 80);
}

#[test]
fn unknown_markup_tool_is_rejected() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base.png");
    let markup = temp.path().join("markup.toml");
    write_base_png(&base, 40, 40);

    std::fs::write(
        &markup,
        "[[step]]\ntool = \"pen\"\nstart = [0.0, 0.0]\nend = [10.0, 10.0]\n",
    )
    .unwrap();

    rastermark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--input"])
        .arg(&base)
        .args(["--markup"])
        .arg(&markup)
        .args(["--output"])
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool 'pen'"));
}
