//! Command implementations and argument parsing for the smote CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use smote_core::{SmoteBuilder, SmoteError};
use smote_providers_geojson::{
    ProviderError, SmoteOutput, WorkingData, read_feature_collection, run_smote,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_RATE: u32 = 100;
const DEFAULT_NEIGHBOURS: usize = 5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "smote",
    about = "Generate synthetic minority-class points with SMOTE."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Oversample a JSON coordinate array or GeoJSON feature collection.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the JSON input.
    pub input: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Input shape; `auto` inspects the document structure.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Number of leading points to oversample (defaults to all of them).
    #[arg(long)]
    pub count: Option<usize>,

    /// Oversampling rate as a percentage.
    #[arg(long, default_value_t = DEFAULT_RATE)]
    pub rate: u32,

    /// Nearest neighbours considered per point.
    #[arg(long, short = 'k', default_value_t = DEFAULT_NEIGHBOURS)]
    pub neighbours: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Input shapes accepted by `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Choose from the document structure.
    Auto,
    /// A JSON array of coordinate arrays.
    Coordinates,
    /// A GeoJSON `FeatureCollection` of `Point` features.
    Geojson,
}

impl InputFormat {
    fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Coordinates => "coordinates",
            Self::Geojson => "geojson",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading input or writing output.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input did not have the shape requested with `--format`.
    #[error("expected {expected} input but `{path}` holds {found}")]
    FormatMismatch {
        /// Path of the offending input.
        path: PathBuf,
        /// Shape requested on the command line.
        expected: &'static str,
        /// Shape detected in the document.
        found: &'static str,
    },
    /// Reading, converting or writing working data failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Parameter validation failed.
    #[error(transparent)]
    Core(#[from] SmoteError),
}

impl CliError {
    /// Returns the core error behind this failure, if any.
    #[must_use]
    pub fn smote_error(&self) -> Option<&SmoteError> {
        match self {
            Self::Core(error) | Self::Provider(ProviderError::Smote(error)) => Some(error),
            _ => None,
        }
    }
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name derived from the input file.
    pub data_source: String,
    /// Number of input points.
    pub input_points: usize,
    /// Synthetic points in the input's shape.
    pub output: SmoteOutput,
    /// Destination requested with `--output`.
    pub destination: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading the input or oversampling fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use smote_cli::cli::{Cli, Command, InputFormat, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "[[0, 0], [10, 0], [0, 10], [10, 10]]")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         input: file.path().to_path_buf(),
///         output: None,
///         format: InputFormat::Auto,
///         count: None,
///         rate: 200,
///         neighbours: 2,
///         seed: Some(7),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.output.len(), 8);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        input = %command.input.display(),
        format = command.format.label(),
        rate = command.rate,
        neighbours = command.neighbours,
        shape = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let mut builder = SmoteBuilder::new()
        .with_rate(command.rate)
        .with_neighbours(command.neighbours);
    if let Some(count) = command.count {
        builder = builder.with_sample_count(count);
    }
    let smote = builder.build()?;

    let data = load_working_data(&command.input, command.format)?;
    Span::current().record("shape", field::display(data.shape()));

    let mut rng = match command.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let output = run_smote(&data, &smote, &mut rng)?;
    let summary = ExecutionSummary {
        data_source: derive_data_source_name(&command.input),
        input_points: data.len(),
        output,
        destination: command.output,
    };

    info!(
        data_source = summary.data_source.as_str(),
        input_points = summary.input_points,
        synthetic = summary.output.len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.load", err, fields(path = %path.display()))]
pub(super) fn load_working_data(path: &Path, format: InputFormat) -> Result<WorkingData, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    match format {
        InputFormat::Auto => Ok(WorkingData::from_json(reader)?),
        InputFormat::Geojson => Ok(WorkingData::Features(read_feature_collection(reader)?)),
        InputFormat::Coordinates => match WorkingData::from_json(reader)? {
            data @ WorkingData::Coordinates(_) => Ok(data),
            other => Err(CliError::FormatMismatch {
                path: path.to_path_buf(),
                expected: "coordinates",
                found: other.shape(),
            }),
        },
    }
}

pub(super) fn derive_data_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders the synthetic points in `summary` as JSON followed by a newline.
///
/// # Errors
/// Returns [`CliError::Provider`] if serialising or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use smote_cli::cli::{ExecutionSummary, render_summary};
/// # use smote_providers_geojson::SmoteOutput;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     input_points: 2,
///     output: SmoteOutput::Coordinates(vec![vec![0.5, 0.25]]),
///     destination: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "[[0.5,0.25]]\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> Result<(), CliError> {
    summary.output.write_json(&mut writer)?;
    writeln!(writer).map_err(ProviderError::from)?;
    Ok(())
}

/// Writes `summary` to its `--output` destination, or to `stdout` when none
/// was given.
///
/// # Errors
/// Returns [`CliError::Io`] when the destination cannot be created and
/// [`CliError::Provider`] when writing fails.
pub fn write_summary(summary: &ExecutionSummary, stdout: impl Write) -> Result<(), CliError> {
    let Some(path) = summary.destination.as_deref() else {
        return render_summary(summary, stdout);
    };
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    render_summary(summary, &mut writer)?;
    writer.flush().map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "result written");
    Ok(())
}
