//! Exit-code contract of the `loss-distance` binary.

use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_loss-distance")
}

#[test]
fn empty_dataset_exits_non_zero_without_artifacts() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("valid")).unwrap();
    let prefix = root.path().join("out");

    let output = Command::new(bin())
        .arg(root.path())
        .args(["--dataset_key", "valid", "--output_plot"])
        .arg(&prefix)
        .env("RUST_LOG", "error")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no valid result files"), "{stderr}");
    assert!(!root.path().join("out_boxplot.png").exists());
    assert!(!root.path().join("out_scatter.png").exists());
}

#[test]
fn malformed_file_exits_non_zero_and_names_it() {
    let root = tempfile::tempdir().unwrap();
    let valid = root.path().join("valid");
    std::fs::create_dir_all(&valid).unwrap();
    std::fs::write(valid.join("valid_L10m_x.csv"), "t,p\n1,not-a-number\n").unwrap();

    let output = Command::new(bin())
        .arg(root.path())
        .arg("--output_plot")
        .arg(root.path().join("out"))
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("valid_L10m_x.csv"), "{stderr}");
}

#[test]
fn invalid_dataset_key_is_rejected() {
    let output = Command::new(bin())
        .args(["some/folder", "--dataset_key", "test"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
