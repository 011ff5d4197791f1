//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    // EXPECT: Binary runs and prints version "0.1.0" to stdout
    let output = Command::new(env!("CARGO_BIN_EXE_cursorchats"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    // VERIFY: Output names the binary and the version from Cargo.toml
    assert!(output.status.success());
    assert!(
        stdout.contains("cursorchats") && stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain the version, but got: {}",
        stdout
    );
}
