use std::path::PathBuf;

fn bin() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_plugroup")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "plugroup.exe"
            } else {
                "plugroup"
            });
            p
        })
}

#[test]
fn cli_build_writes_scene_json() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("fill_scene.json");
    let _ = std::fs::remove_file(&out_path);

    let out_arg = out_path.to_string_lossy().to_string();
    let status = std::process::Command::new(bin())
        .args(["build", "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let raw = std::fs::read_to_string(&out_path).unwrap();
    let scene: serde_json::Value = serde_json::from_str(&raw).unwrap();
    // Root group plus the nine internal nodes.
    assert_eq!(scene["nodes"].as_array().unwrap().len(), 10);
}

#[test]
fn cli_manifest_prints_the_plugin_identity() {
    let output = std::process::Command::new(bin())
        .arg("manifest")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("fr.inria.Fill"));
    assert!(stdout.contains("Filter"));
}

#[test]
fn cli_build_emits_dot() {
    let output = std::process::Command::new(bin())
        .args(["build", "--format", "dot"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("digraph"));
    assert!(stdout.contains("\"Premult1\" -> \"Output1\""));
}
