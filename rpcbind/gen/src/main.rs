//! rpcbind Code Generator
//!
//! Generates typed Rust client bindings from an RPC API schema.

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use rpcbind_define::{CurationTables, SchemaStore};
use rpcbind_gen::cargo_gen::write_cargo_toml;
use rpcbind_gen::errors::GeneratorError;
use rpcbind_gen::output::generate_and_write;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// rpcbind code generator - transforms RPC API schemas into typed Rust bindings
#[derive(Parser, Debug)]
#[command(name = "rpcbind-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the schema documents (methods.json, objects.json, ...)
    #[arg(short, long)]
    schema_dir: PathBuf,

    /// Output directory for generated code
    #[arg(short, long, default_value = "bindings/src")]
    output: PathBuf,

    /// Curation table (TOML); the built-in table is used when omitted
    #[arg(short, long)]
    curation: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Also write a Cargo.toml for the bindings package next to the output directory
    #[arg(long)]
    cargo_toml: bool,

    /// Package name used with --cargo-toml
    #[arg(long, default_value = "bindings")]
    package_name: String,

    /// Local path of the rpcbind runtime crate used with --cargo-toml
    #[arg(long)]
    rpcbind_path: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,rpcbind_gen=info,rpcbind_define=info".to_string(),
            2 => "info,rpcbind_gen=debug,rpcbind_define=debug".to_string(),
            _ => "debug,rpcbind_gen=trace,rpcbind_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let curation = match &cli.curation {
        Some(path) => CurationTables::load(path)?,
        None => CurationTables::builtin()?,
    };
    tracing::info!(
        overrides = curation.overrides.len(),
        generate = curation.generate.len(),
        "loaded curation tables"
    );

    let store = SchemaStore::open(&cli.schema_dir);
    let files = generate_and_write(&store, &curation, &cli.output, cli.dry_run)?;

    if cli.cargo_toml {
        // The output directory is the package's src/
        let package_dir = cli.output.parent().unwrap_or(Path::new("."));
        write_cargo_toml(
            package_dir,
            &cli.package_name,
            cli.rpcbind_path.as_deref(),
            cli.dry_run,
        )?;
    }

    if !cli.dry_run {
        eprintln!(
            "{} Generated {} files in {}",
            "✓".green(),
            files.len(),
            cli.output.display().to_string().bold()
        );
    }

    Ok(())
}
