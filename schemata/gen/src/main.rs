//! Schemata Code Generator
//!
//! Compiles an API description document into a Rust module tree.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use schemata_gen::compile::Compiler;
use schemata_gen::config::GeneratorSettings;
use schemata_gen::emit::generate_and_write;
use schemata_gen::errors::GeneratorError;
use schemata_gen::loader::load_document;
use schemata_gen::names::case::to_snake_case;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Schemata code generator - compiles API descriptions into typed Rust
#[derive(Parser, Debug)]
#[command(name = "schemata-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API description document (.json, .yaml or .yml)
    input: PathBuf,

    /// Output directory for generated code
    #[arg(short, long, default_value = "generated/src")]
    output: PathBuf,

    /// Root namespace (defaults to the document title in snake_case)
    #[arg(short, long)]
    root: Option<String>,

    /// Suffix appended to request type names
    #[arg(long, default_value = "Request")]
    request_suffix: String,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "info,schemata_gen=info".to_string(),
            2 => "info,schemata_gen=debug".to_string(),
            _ => "debug,schemata_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<(), GeneratorError> {
    let document = load_document(&cli.input)?;

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => {
            let derived = to_snake_case(&document.title);
            if derived.is_empty() { "api".to_string() } else { derived }
        }
    };
    info!(input = %cli.input.display(), root = %root, "compiling");

    let settings = GeneratorSettings::new(root).with_request_suffix(cli.request_suffix.as_str());
    let compiler = Compiler::new(&document, settings.clone())?;
    let declarations = compiler.compile().into_result()?;

    let files = generate_and_write(
        &declarations,
        &document.title,
        settings.protocol(),
        &cli.output,
        cli.dry_run,
    )?;

    if !cli.dry_run {
        eprintln!(
            "{} {} declarations into {} files under {}",
            "Generated".green().bold(),
            declarations.len(),
            files.len(),
            cli.output.display()
        );
    }

    Ok(())
}

fn report(error: &GeneratorError) {
    match error {
        GeneratorError::GenerationFailed { failures } => {
            eprintln!(
                "{} {} element(s) failed; nothing was written",
                "error:".red().bold(),
                failures.len()
            );
            for failure in failures {
                eprintln!("  {} {}", failure.path.to_string().yellow(), failure.error);
            }
        }
        other => eprintln!("{} {}", "error:".red().bold(), other),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}
