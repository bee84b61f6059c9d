use std::env;
use std::fs;
use std::path::PathBuf;

/// Expose the candle-core version resolved in the workspace lockfile as `CANDLE_CORE_VERSION`.
fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let lockfile = manifest_dir.ancestors().map(|dir| dir.join("Cargo.lock")).find(|p| p.exists());
    let version = lockfile
        .as_ref()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|lock| locked_version(&lock, "candle-core"))
        .unwrap_or_else(|| "unknown".to_string());
    if let Some(path) = lockfile { println!("cargo:rerun-if-changed={}", path.display()); }
    println!("cargo:rustc-env=CANDLE_CORE_VERSION={version}");
}

fn locked_version(lock: &str, package: &str) -> Option<String> {
    let name_line = format!("name = \"{package}\"");
    let mut lines = lock.lines();
    while let Some(line) = lines.next() {
        if line.trim() != name_line { continue; }
        let version = lines.next()?.trim().strip_prefix("version = \"")?.strip_suffix('"')?;
        return Some(version.to_string());
    }
    None
}
