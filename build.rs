use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

const TEMPLATE_DIR: &str = "templates";

fn main() {
    // askama compiles the templates into the binary.
    println!("cargo:rerun-if-changed={}", TEMPLATE_DIR);
    if let Ok(entries) = fs::read_dir(TEMPLATE_DIR) {
        for path in entries.flatten().map(|e| e.path()) {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }

    let built_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    println!(
        "cargo:rustc-env=HUSTLER_HUNTER_BUILD_ID={}-{}",
        env!("CARGO_PKG_VERSION"),
        built_at
    );
}
