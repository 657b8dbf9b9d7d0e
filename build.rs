use std::env;

fn main() {
    // docs.rs and the stub engine build without the native library.
    if env::var("DOCS_RS").is_ok() || env::var("CARGO_FEATURE_DOCSRS").is_ok() {
        println!("cargo:warning=Building with the stub engine, skipping ZBar linkage");
        return;
    }

    // ZBar is consumed as a prebuilt system library. ZBAR_LIB_DIR points the
    // linker at non-standard installs (e.g. a homebrew keg or a local build).
    if let Ok(dir) = env::var("ZBAR_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }
    println!("cargo:rustc-link-lib=zbar");

    println!("cargo:rerun-if-env-changed=ZBAR_LIB_DIR");
    println!("cargo:rerun-if-env-changed=DOCS_RS");
}
