fn main() {
  // Record the compiler version for the toolchain gate in util::version.
  // Cargo always sets RUSTC for build scripts; fall back to PATH lookup.
  let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
  let version = std::process::Command::new(rustc)
    .arg("--version")
    .output()
    .ok()
    .and_then(|out| String::from_utf8(out.stdout).ok())
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| "unknown".to_string());

  println!("cargo:rustc-env=ORATOOLS_RUSTC_VERSION={}", version);
  println!("cargo:rerun-if-env-changed=RUSTC");
}
