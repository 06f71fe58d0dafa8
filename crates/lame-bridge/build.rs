use std::env;
use std::path::PathBuf;

/// Files that make up the exported C surface.
const C_API_SOURCES: &[&str] = &[
    "src/ffi.rs",
    "src/ffi/types.rs",
    "src/ffi/functions.rs",
    "cbindgen.toml",
];

fn main() {
    for path in C_API_SOURCES {
        println!("cargo::rerun-if-changed={path}");
    }
    println!("cargo::rerun-if-env-changed=LMB_HEADER_DIR");

    // docs.rs builds in a read-only source tree.
    if env::var_os("DOCS_RS").is_some() {
        return;
    }

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let header_dir = env::var_os("LMB_HEADER_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| crate_dir.join("include"));
    std::fs::create_dir_all(&header_dir).expect("Failed to create header directory");

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("Failed to read cbindgen.toml");

    // The header always declares the feature-gated functions behind
    // `LMB_WITH_LAME`; C callers define it when they link a `lame` build.
    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("Failed to generate C header")
        .write_to_file(header_dir.join("lame_bridge.h"));
}
