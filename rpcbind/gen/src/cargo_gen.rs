//! Cargo.toml generation for the bindings package.
//!
//! Generated modules reference `rpcbind`, `serde` and `serde_json` by path,
//! so the package manifest only needs those three dependencies.

use std::path::Path;

use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// Renders the manifest of the bindings package.
///
/// `rpcbind_path` points the runtime dependency at a local checkout;
/// without it the registry version is used.
///
/// ## Examples
///
/// ```
/// use rpcbind_gen::cargo_gen::cargo_toml_content;
///
/// let manifest = cargo_toml_content("bindings", None);
/// assert!(manifest.contains("name = \"bindings\""));
/// assert!(manifest.contains("rpcbind = \"0.1\""));
/// ```
pub fn cargo_toml_content(package_name: &str, rpcbind_path: Option<&Path>) -> String {
    let rpcbind = match rpcbind_path {
        Some(path) => format!(
            "rpcbind = {{ path = \"{}\" }}",
            path.display().to_string().replace('\\', "/")
        ),
        None => "rpcbind = \"0.1\"".to_string(),
    };

    format!(
        r#"# This file was automatically generated by rpcbind-gen. Do not edit manually.

[package]
name = "{}"
version = "0.1.0"
edition = "2024"

[dependencies]
{}
serde = {{ version = "1.0", features = ["derive"] }}
serde_json = "1.0"
"#,
        package_name, rpcbind
    )
}

/// Writes `Cargo.toml` into `package_dir` (the parent of the generated `src/`).
///
/// In dry-run mode the manifest is printed instead.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    package_dir: &Path,
    package_name: &str,
    rpcbind_path: Option<&Path>,
    dry_run: bool,
) -> Result<(), GeneratorError> {
    let content = cargo_toml_content(package_name, rpcbind_path);

    if dry_run {
        println!("=== Cargo.toml ===\n{}\n", content);
        return Ok(());
    }

    write_atomic(&package_dir.join("Cargo.toml"), &content)
}
