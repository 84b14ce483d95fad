//! `apimap`: scan a project tree and print its HTTP API inventory.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use apimap_analysis::{scan_with_config, OutputFormat};
use apimap_core::config::{ApimapConfig, CliOverrides};
use apimap_core::errors::{ApimapErrorCode, PipelineError};
use apimap_core::tracing::init_tracing;

/// Exit status for input problems (missing root, invalid configuration).
const EXIT_INPUT_ERROR: u8 = 1;
/// Exit status for anything else that stops a run.
const EXIT_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "apimap")]
#[command(about = "Discover HTTP API calls, endpoints, and OpenAPI declarations in a source tree")]
#[command(version)]
struct Cli {
    /// Project root to scan
    path: PathBuf,

    /// Report format
    #[arg(short, long, value_enum)]
    output: Option<CliOutputFormat>,

    /// Config file (default: apimap.toml in the project root, if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra gitignore-style pattern to skip; repeatable
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Skip files larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    max_file_size: Option<u64>,

    /// Worker threads for reading and extraction (0 = one per core)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Log filter: a level (error, warn, info, debug, trace) or a filter directive
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliOutputFormat {
    Raw,
    Markdown,
    Compact,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Raw => OutputFormat::Raw,
            CliOutputFormat::Markdown => OutputFormat::Markdown,
            CliOutputFormat::Compact => OutputFormat::Compact,
        }
    }
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            extra_ignore: self.ignore.clone(),
            max_file_size: self.max_file_size,
            threads: self.threads,
            follow_symlinks: self.follow_symlinks.then_some(true),
            format: self.output.map(|f| OutputFormat::from(f).as_str().to_string()),
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ApimapConfig::load(&cli.path, cli.config.as_deref(), Some(&cli.overrides())) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.log_level.as_deref().unwrap_or_default());
            return fail(&PipelineError::from(e));
        }
    };
    init_tracing(config.output.effective_log_level());

    let format = match config.output.effective_format().parse::<OutputFormat>() {
        Ok(format) => format,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::from(EXIT_INPUT_ERROR);
        }
    };
    tracing::debug!(path = %cli.path.display(), format = %format, "starting scan");

    let report = match scan_with_config(&cli.path, format, &config) {
        Ok(report) => report,
        Err(e) => return fail(&e),
    };

    match write_report(&report, cli.out.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to write report: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn fail(error: &PipelineError) -> ExitCode {
    eprintln!("error: {}", error.coded_string());
    if error.is_input_error() {
        ExitCode::from(EXIT_INPUT_ERROR)
    } else {
        ExitCode::from(EXIT_FAILURE)
    }
}

fn write_report(report: &str, out: Option<&PathBuf>) -> io::Result<()> {
    match out {
        Some(path) => fs::write(path, ensure_newline(report)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(ensure_newline(report).as_bytes())?;
            handle.flush()
        }
    }
}

fn ensure_newline(report: &str) -> String {
    if report.ends_with('\n') {
        report.to_string()
    } else {
        format!("{}\n", report)
    }
}
