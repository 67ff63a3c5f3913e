use std::{fs, path::PathBuf};

use tempfile::tempdir;

use slotgraph::Format;
use slotgraph_cli::{Args, run};

/// Demo sources live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn demo_args(output: PathBuf, format: Format) -> Args {
    let demos = demos_path();
    Args {
        components: demos.join("components.ts").to_string_lossy().to_string(),
        entities: demos.join("entities.ts").to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        format,
        config: Some(demos.join("config.toml").to_string_lossy().to_string()),
        strict: true,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_all_formats() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut failed_formats = Vec::new();

    for format in [Format::Svg, Format::Html, Format::GraphJson] {
        let output_path = temp_dir.path().join(format!("demo.{}", format.extension()));
        let args = demo_args(output_path.clone(), format);

        match run(&args) {
            Ok(()) => {
                let content = fs::read_to_string(&output_path).expect("Output was not written");
                assert!(!content.is_empty(), "{format} output is empty");
            }
            Err(e) => failed_formats.push((format, e)),
        }
    }

    if !failed_formats.is_empty() {
        eprintln!("\nFormats that failed:");
        for (format, err) in &failed_formats {
            eprintln!("  - {format}: {err}");
        }
        panic!("{} format(s) failed unexpectedly", failed_formats.len());
    }
}

#[test]
fn e2e_svg_contains_every_entity() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("demo.svg");

    run(&demo_args(output_path.clone(), Format::Svg)).expect("Demo should render");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<marker"));
    for entity in ["User", "Room", "Message", "Attachment"] {
        assert!(svg.contains(entity), "SVG is missing `{entity}`");
    }
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = demo_args(temp_dir.path().join("out.svg"), Format::Svg);
    args.entities = temp_dir
        .path()
        .join("missing.ts")
        .to_string_lossy()
        .to_string();

    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("out.svg").exists());
}

#[test]
fn e2e_strict_mode_rejects_warnings() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let broken = temp_dir.path().join("broken.ts");
    fs::write(&broken, "export const Author = defineComponent(EntityId)\n").unwrap();

    let mut args = demo_args(temp_dir.path().join("out.svg"), Format::Svg);
    args.components = broken.to_string_lossy().to_string();

    assert!(run(&args).is_err());

    args.strict = false;
    run(&args).expect("Lenient mode should tolerate warnings");
    assert!(temp_dir.path().join("out.svg").exists());
}
