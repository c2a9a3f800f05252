use std::process::Command;

use serde_json::Value;

fn run_json(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_nature-lovers"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("RUST_LOG", "info")
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run the nature-lovers binary");

    assert!(
        output.status.success(),
        "nature-lovers exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout holds a single JSON snapshot")
}

#[test]
fn idle_agent_keeps_full_vitality() {
    let snapshot = run_json(&["--ticks", "1"]);

    assert_eq!(snapshot["vitality"], 100);
    assert_eq!(snapshot["columns"], 80);
    assert_eq!(snapshot["rows"], 60);
    assert_eq!(snapshot["cells"].as_array().map(Vec::len), Some(4800));
}

#[test]
fn scripted_meal_raises_vitality() {
    let snapshot = run_json(&[
        "--config",
        "scenarios/milestone.toml",
        "--ticks",
        "1",
        "--intents",
        "R",
    ]);

    assert_eq!(snapshot["vitality"], 110);
}
