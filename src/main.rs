use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use factcheck_jobs::check::check_equality;
use factcheck_jobs::io::{CsvSource, WorkbookSource};
use factcheck_jobs::model::{FallbackCell, Party};
use factcheck_jobs::run::{self, RunOptions};
use factcheck_jobs::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level).and_then(|()| execute(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|error| ToolError::Logging(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Report(args) => execute_report(args),
        Command::Tally(args) => execute_tally(args),
        Command::Check(args) => execute_check(args),
    }
}

fn execute_report(args: ReportArgs) -> Result<()> {
    let options = args.into_options()?;
    let report = run::fact_check(&options)?;
    println!("{}", report.tally);
    println!("report written to {}", options.output.display());
    Ok(())
}

fn execute_tally(args: TallyArgs) -> Result<()> {
    let json = args.json;
    let options = args.inputs.into_options()?;
    let tally = run::compute_tally(&options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("{tally}");
    }
    Ok(())
}

fn execute_check(args: CheckArgs) -> Result<()> {
    require_input(&args.employment)?;
    let given = CsvSource::new(args.employment, args.check_skip_rows);
    let reference = WorkbookSource::new(args.snapshot, args.snapshot_skip_rows);
    println!("{}", check_equality(&given, &reference));
    Ok(())
}

fn require_input(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Attribute monthly private employment changes to the party in the White House."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the equality check and the tally, then write the Markdown report.
    Report(ReportArgs),
    /// Print the per-party tally only.
    Tally(TallyArgs),
    /// Compare the employment CSV with a reference workbook.
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// Employment series exported as CSV.
    #[arg(long, default_value = "BLS_private.csv")]
    employment: PathBuf,

    /// Years in which control of the presidency changed, one per line.
    #[arg(long, default_value = "presidents.txt")]
    timeline: PathBuf,

    /// Party in power before the first change-year.
    #[arg(long, value_enum, default_value_t = PartyArg::Democrat)]
    initial_party: PartyArg,

    /// Month (1-12) of the last row whose value fills missing cells.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=12))]
    fallback_month: u8,

    /// Preamble lines before the CSV header.
    #[arg(long, default_value_t = run::DEFAULT_CSV_SKIP_ROWS)]
    csv_skip_rows: usize,
}

impl InputArgs {
    fn into_options(self) -> Result<RunOptions> {
        require_input(&self.employment)?;
        require_input(&self.timeline)?;
        let mut options = RunOptions::new(self.employment, self.timeline);
        options.initial_party = self.initial_party.into();
        options.fallback = FallbackCell::from_month_number(self.fallback_month)?;
        options.csv_skip_rows = self.csv_skip_rows;
        Ok(options)
    }
}

#[derive(clap::Args)]
struct ReportArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Reference workbook compared against the employment CSV.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Markdown report destination.
    #[arg(long, default_value = "conclusions.md")]
    output: PathBuf,

    /// Preamble lines before the CSV header for the equality check.
    #[arg(long, default_value_t = run::DEFAULT_CHECK_SKIP_ROWS)]
    check_skip_rows: usize,

    /// Preamble rows before the header of the reference workbook.
    #[arg(long, default_value_t = run::DEFAULT_SNAPSHOT_SKIP_ROWS)]
    snapshot_skip_rows: usize,

    /// When the reference workbook was retrieved, as shown in the report.
    #[arg(long, default_value = run::DEFAULT_SNAPSHOT_LABEL)]
    snapshot_label: String,
}

impl ReportArgs {
    fn into_options(self) -> Result<RunOptions> {
        let mut options = self.inputs.into_options()?;
        options.snapshot = self.snapshot;
        options.output = self.output;
        options.check_skip_rows = self.check_skip_rows;
        options.snapshot_skip_rows = self.snapshot_skip_rows;
        options.snapshot_label = self.snapshot_label;
        Ok(options)
    }
}

#[derive(clap::Args)]
struct TallyArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Print the tally as JSON (figures in thousands).
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Employment series exported as CSV.
    #[arg(long, default_value = "BLS_private.csv")]
    employment: PathBuf,

    /// Reference workbook.
    #[arg(long, default_value = "labour_data_10_07_24.xlsx")]
    snapshot: PathBuf,

    /// Preamble lines before the CSV header.
    #[arg(long, default_value_t = run::DEFAULT_CHECK_SKIP_ROWS)]
    check_skip_rows: usize,

    /// Preamble rows before the workbook header.
    #[arg(long, default_value_t = run::DEFAULT_SNAPSHOT_SKIP_ROWS)]
    snapshot_skip_rows: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PartyArg {
    Democrat,
    Republican,
}

impl From<PartyArg> for Party {
    fn from(arg: PartyArg) -> Self {
        match arg {
            PartyArg::Democrat => Party::Democrat,
            PartyArg::Republican => Party::Republican,
        }
    }
}
