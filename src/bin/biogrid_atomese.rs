use std::path::PathBuf;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use biogrid_atomese::app::{App, Input};
use biogrid_atomese::biogrid::BiogridHttpClient;
use biogrid_atomese::config::ConfigLoader;
use biogrid_atomese::domain::ReleaseVersion;
use biogrid_atomese::error::BiogridError;
use biogrid_atomese::output::{ConsoleOutput, JsonOutput, OutputMode};
use biogrid_atomese::store::Store;
use biogrid_atomese::summary::JsonMetadataRegistry;

#[derive(Parser)]
#[command(name = "biogrid-atomese")]
#[command(about = "Convert BioGRID SARS-CoV-2 and coronavirus interactions to Atomese")]
#[command(version, author)]
struct Cli {
    /// Print the result as JSON instead of a human summary.
    #[arg(long)]
    non_interactive: bool,

    /// Config file (defaults to ./biogrid-atomese.json when present).
    #[arg(long)]
    config: Option<String>,

    /// Directory the configured output paths are relative to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Process a local file in BioGRID tab3 format instead of downloading.
    #[arg(long, conflicts_with = "release")]
    path: Option<PathBuf>,

    /// Release to download, e.g. 3.5.183 (latest when omitted).
    #[arg(long)]
    release: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<BiogridError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &BiogridError) -> u8 {
    match error {
        BiogridError::MissingInput(_)
        | BiogridError::InvalidVersion(_)
        | BiogridError::ConfigRead(_)
        | BiogridError::ConfigParse(_) => 2,
        BiogridError::BiogridHttp(_) | BiogridError::BiogridStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let store = match cli.output_dir {
        Some(dir) => {
            let root = Utf8PathBuf::from_path_buf(dir).map_err(|dir| {
                BiogridError::Filesystem(format!("non-utf8 output dir {}", dir.display()))
            })?;
            Store::new(&root, &config)
        }
        None => Store::current_dir(&config)?,
    };

    let input = match cli.path {
        Some(path) => Input::LocalFile(path),
        None => Input::Release(
            cli.release
                .map(|value| value.parse::<ReleaseVersion>())
                .transpose()?,
        ),
    };

    let metadata = JsonMetadataRegistry::new(store.metadata_path().to_owned());
    let client = BiogridHttpClient::new()?;
    let app = App::new(store, client, metadata, config.script);
    let today = chrono::Local::now().date_naive();

    match output_mode {
        OutputMode::NonInteractive => {
            let result = app.convert(input, today, &JsonOutput)?;
            JsonOutput::print_convert(&result).into_diagnostic()?;
        }
        OutputMode::Interactive => {
            let result = app.convert(input, today, &ConsoleOutput)?;
            ConsoleOutput::print_convert(&result);
        }
    }
    Ok(())
}
