//! Build script for the Click driver demo
//!
//! Points the linker at the project directory so the demo binary can
//! pick up a board-specific `memory.x` when one is present.

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }
}
