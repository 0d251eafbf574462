//! Reading inputs, running a pipeline over them, and rendering the results.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sanitex_config::ConfigError;
use sanitex_core::transforms::standard::{PipelineKind, UnknownPipeline};
use sanitex_core::transforms::TransformError;
use sanitex_core::SanitizeOptions;
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Path standing for stdin.
pub const STDIN: &str = "-";

#[derive(Debug)]
pub enum CliError {
    Io { path: String, message: String },
    Config(ConfigError),
    Transform(TransformError),
    UnknownPipeline(String),
    UnknownFormat(String),
    Task(String),
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, message } => write!(f, "could not read {}: {}", path, message),
            CliError::Config(err) => write!(f, "configuration error: {}", err),
            CliError::Transform(err) => write!(f, "pipeline failed: {}", err),
            CliError::UnknownPipeline(name) => write!(f, "unknown pipeline '{}'", name),
            CliError::UnknownFormat(name) => {
                write!(f, "unknown format '{}' (expected text or json)", name)
            }
            CliError::Task(msg) => write!(f, "worker task failed: {}", msg),
            CliError::Output(msg) => write!(f, "could not format output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<TransformError> for CliError {
    fn from(err: TransformError) -> Self {
        CliError::Transform(err)
    }
}

impl From<UnknownPipeline> for CliError {
    fn from(err: UnknownPipeline) -> Self {
        CliError::UnknownPipeline(err.0)
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        CliError::Task(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

pub struct Request {
    pub pipeline: PipelineKind,
    pub options: SanitizeOptions,
    pub paths: Vec<String>,
}

/// The sanitized text of one input.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub path: String,
    pub pipeline: String,
    pub output: String,
}

async fn read_source(path: &str) -> Result<String, CliError> {
    let io_error = |e: std::io::Error| CliError::Io {
        path: path.to_string(),
        message: e.to_string(),
    };
    if path == STDIN {
        let mut source = String::new();
        tokio::io::stdin()
            .read_to_string(&mut source)
            .await
            .map_err(io_error)?;
        Ok(source)
    } else {
        tokio::fs::read_to_string(path).await.map_err(io_error)
    }
}

/// Sanitize every input concurrently; reports come back in input order.
pub async fn run(request: Request) -> Result<Vec<Report>, CliError> {
    let Request {
        pipeline,
        options,
        mut paths,
    } = request;
    if paths.is_empty() {
        paths.push(STDIN.to_string());
    }

    let transform = Arc::new(pipeline.build(&options));
    let mut tasks = Vec::with_capacity(paths.len());

    for path in paths {
        let transform = Arc::clone(&transform);
        tasks.push(tokio::spawn(async move {
            let source = read_source(&path).await?;
            tracing::debug!(%path, bytes = source.len(), "sanitizing");
            let output = tokio::task::spawn_blocking(move || transform.run(source)).await??;
            Ok::<_, CliError>(Report {
                path,
                pipeline: pipeline.name().to_string(),
                output,
            })
        }));
    }

    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        reports.push(task.await??);
    }
    Ok(reports)
}

/// Render reports for stdout.
pub fn render(reports: &[Report], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(reports)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text if reports.len() == 1 => Ok(reports[0].output.clone()),
        OutputFormat::Text => {
            let mut out = String::new();
            for report in reports {
                out.push_str(&format!("==> {} <==\n", report.path));
                out.push_str(&report.output);
                if !report.output.ends_with('\n') {
                    out.push('\n');
                }
            }
            Ok(out)
        }
    }
}
