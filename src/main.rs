use clap::{Args, Parser, Subcommand};
use sheets_async::cli::{self, SheetSelector, WorkbookArgs};
use sheets_async::config::{CREDENTIALS_ENV, DOCUMENT_KEY_ENV};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheets")]
#[command(about = "Read and write spreadsheet cells with A1 addresses.")]
#[command(long_about = "sheets - A1-addressed spreadsheet access

Works against a YAML workbook file served through the in-memory
spreadsheet service.

COMMANDS:
  worksheets  - List worksheets of a workbook
  get         - Print a cell (D20) or a range (B2:C8)
  set         - Write cells (B2=100 B4=0.5)
  run         - Write parameters from a plan, then read results

EXAMPLES:
  sheets worksheets book.yaml
  sheets get book.yaml D10:D14 --sheet Model
  sheets set book.yaml B2=100 B4=0.5
  sheets run book.yaml plan.yaml -p parameter1=100 -p parameter2=0.5

Set RUST_LOG=sheets_async=debug to trace service calls.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WorkbookOpts {
    /// Path to the YAML workbook file
    file: PathBuf,

    /// Spreadsheet key (defaults to the key stored in the workbook)
    #[arg(short, long, env = DOCUMENT_KEY_ENV)]
    key: Option<String>,

    /// Service-account credentials JSON file
    #[arg(short, long, env = CREDENTIALS_ENV)]
    credentials: Option<PathBuf>,
}

impl From<WorkbookOpts> for WorkbookArgs {
    fn from(opts: WorkbookOpts) -> Self {
        WorkbookArgs {
            file: opts.file,
            document_key: opts.key,
            credentials: opts.credentials,
        }
    }
}

#[derive(Args)]
struct SheetOpts {
    /// Worksheet title (takes precedence over --index)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Worksheet index
    #[arg(short, long, default_value = "0")]
    index: usize,
}

impl From<SheetOpts> for SheetSelector {
    fn from(opts: SheetOpts) -> Self {
        SheetSelector {
            name: opts.sheet,
            index: opts.index,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List worksheets of a workbook
    Worksheets {
        #[command(flatten)]
        workbook: WorkbookOpts,
    },

    /// Print a cell or a range
    Get {
        #[command(flatten)]
        workbook: WorkbookOpts,

        /// Cell (D20) or range (B2:C8)
        target: String,

        #[command(flatten)]
        sheet: SheetOpts,
    },

    /// Write cells
    Set {
        #[command(flatten)]
        workbook: WorkbookOpts,

        /// Assignments in CELL=VALUE form
        #[arg(required = true)]
        assignments: Vec<String>,

        #[command(flatten)]
        sheet: SheetOpts,
    },

    #[command(long_about = "Run a parameter plan against a worksheet.

Writes every parameter into its cell concurrently, waits for all writes
to be acknowledged, then reads the total cell and the intermediate range.
Prints the result as JSON.

PLAN FILE:
  parameter_range: B2:C8
  parameter_cells:
    parameter1: B2
    parameter2: B4
  total_cell: D20
  intermediate_range: D10:D14")]
    /// Write parameters from a plan, then read results
    Run {
        #[command(flatten)]
        workbook: WorkbookOpts,

        /// Path to the YAML plan file
        plan: PathBuf,

        /// Parameter in name=value form (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Leave the workbook file unchanged
        #[arg(short = 'n', long)]
        dry_run: bool,

        #[command(flatten)]
        sheet: SheetOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Worksheets { workbook } => cli::worksheets(workbook.into()).await?,

        Commands::Get {
            workbook,
            target,
            sheet,
        } => cli::get(workbook.into(), sheet.into(), target).await?,

        Commands::Set {
            workbook,
            assignments,
            sheet,
        } => cli::set(workbook.into(), sheet.into(), assignments).await?,

        Commands::Run {
            workbook,
            plan,
            params,
            dry_run,
            sheet,
        } => cli::run(workbook.into(), sheet.into(), plan, params, dry_run).await?,
    }

    Ok(())
}
