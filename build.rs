use std::process::Command;

/// Exposes the short commit hash as `INKSTROKE_GIT_HASH` for `--version`.
fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=INKSTROKE_GIT_HASH={hash}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
