use std::env;

fn main() {
    // Release builds may pin a version string; default to the package version
    let version = env::var("TILEGRAPH_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_default();
    println!("cargo:rustc-env=TILEGRAPH_VERSION={version}");

    println!("cargo:rerun-if-env-changed=TILEGRAPH_VERSION");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
