//! packsmith - interactive builder, packager, and deployer of content packs.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod console;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "packsmith",
    about = "Interactive builder, packager, and deployer of content packs",
    version
)]
struct Cli {
    /// Working directory holding the pack (asked interactively when omitted)
    #[clap(long)]
    dir: Option<PathBuf>,

    /// Set log level
    #[clap(long, default_value = "info")]
    log_level: LogLevel,
}

/// Logs go to stderr so they never interleave with wizard prompts on stdout.
fn initialize_tracing(log_level: &LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let mut prompt = console::ConsolePrompt;

    match packsmith_core::session::run(&mut prompt, cli.dir) {
        Ok(()) => {
            println!("No error occurred throughout the process.");
            println!("Process exited with code: 0");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            println!("Error: {err}.");
            println!("Process exited with code: {code}");
            ExitCode::from(code)
        }
    }
}
