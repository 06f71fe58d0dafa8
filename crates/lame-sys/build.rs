use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=LAME_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LAME_STATIC");

    let statik = env::var_os("LAME_STATIC").is_some();

    // Most distributions do not ship a .pc file for LAME, so a failed lookup
    // falls through to a plain link directive.
    let found = pkg_config::Config::new()
        .statik(statik)
        .probe("lame")
        .is_ok();
    if found {
        return;
    }

    if let Ok(dir) = env::var("LAME_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }
    let kind = if statik { "static" } else { "dylib" };
    println!("cargo:rustc-link-lib={kind}=mp3lame");
}
