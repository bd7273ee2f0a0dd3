// File: crates/scene-render-skia/build.rs
// Summary: Links the Windows system libraries Skia/ICU need when targeting Windows.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // CARGO_CFG_TARGET_OS reflects the target, not the host running the build script
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW, ...
        println!("cargo:rustc-link-lib=advapi32");
    }
}
