use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo for lanefold-c"),
    );
    let include_dir = crate_dir.join("include");
    let config_path = crate_dir.join("cbindgen.toml");

    fs::create_dir_all(&include_dir).expect("failed to create bindings/c/include");

    let config = cbindgen::Config::from_file(&config_path)
        .expect("failed to read bindings/c/cbindgen.toml");

    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("failed to generate the lanefold C header")
        .write_to_file(include_dir.join("lanefold.h"));

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");
}
