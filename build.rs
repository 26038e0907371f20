use std::env;

fn main() {
    // Only the device build links against ESP-IDF; host builds (tests) skip the sysenv export.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    println!("cargo:rerun-if-changed=probe.toml");
    println!("cargo:rerun-if-changed=build.rs");
}
