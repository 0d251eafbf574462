//! Command-line interface for sanitex
//! Sanitizes lesson and flashcard text files so they can be handed to a
//! Markdown+math renderer.
//!
//! Usage:
//!   sanitex [`<path>`...] [--pipeline `<name>`] [--config `<file>`] [--format text|json]
//!   sanitex --list-pipelines
//!
//! With no path (or `-`) the text is read from stdin.

mod process;

use clap::{Arg, ArgAction, Command};
use process::{CliError, OutputFormat, Request};
use sanitex_config::Loader;
use sanitex_core::transforms::standard::PipelineKind;
use tracing_subscriber::EnvFilter;

/// Optional per-directory configuration picked up when `--config` is absent.
const LOCAL_CONFIG: &str = "sanitex.toml";

fn command() -> Command {
    Command::new("sanitex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sanitize AI-generated lesson and flashcard text for Markdown+math renderers")
        .arg(
            Arg::new("paths")
                .help("Files to sanitize ('-' or nothing reads stdin)")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("pipeline")
                .long("pipeline")
                .short('p')
                .help("Pipeline to run (see --list-pipelines)")
                .default_value("lesson-render"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text or json")
                .default_value("text"),
        )
        .arg(
            Arg::new("list-pipelines")
                .long("list-pipelines")
                .help("List available pipelines")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SANITEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let matches = command().get_matches();

    if matches.get_flag("list-pipelines") {
        handle_list_pipelines_command();
        return;
    }

    if let Err(e) = handle_sanitize_command(&matches).await {
        eprintln!("Error: {}", e);
        if matches!(e, CliError::UnknownPipeline(_)) {
            eprintln!("\nAvailable pipelines:");
            for kind in PipelineKind::all() {
                eprintln!("  {} - {}", kind, kind.description());
            }
        }
        std::process::exit(1);
    }
}

/// Handle the default sanitize command
async fn handle_sanitize_command(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let pipeline: PipelineKind = matches
        .get_one::<String>("pipeline")
        .map(String::as_str)
        .unwrap_or("lesson-render")
        .parse()?;
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()?;

    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    let options = loader.build()?.sanitize_options();

    let paths: Vec<String> = matches
        .get_many::<String>("paths")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let request = Request {
        pipeline,
        options,
        paths,
    };
    let reports = process::run(request).await?;
    print!("{}", process::render(&reports, format)?);
    Ok(())
}

/// Handle the list-pipelines command
fn handle_list_pipelines_command() {
    println!("Available pipelines:\n");
    for kind in PipelineKind::all() {
        println!("  {}", kind);
        println!("    {}", kind.description());
    }
}
