use clap::{Parser, Subcommand, ValueEnum};
use statusboard::cli;
use statusboard::{FileFormat, Interchange, InterchangeConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "statusboard")]
#[command(about = "Export and import project status reports (sectioned CSV / Excel).")]
#[command(long_about = "Statusboard - project status report interchange

COMMANDS:
  export      - Write the status dataset as a dated CSV or Excel report
  import      - Read a CSV/Excel report, merged over existing data
  allocation  - Read the monthly resource allocation sheet

EXAMPLES:
  statusboard export state.yaml --format xlsx --out-dir reports/
  statusboard import report.csv --existing state.yaml --output state.yaml
  statusboard allocation staffing.xlsx --sheet \"Monthly Resource Allocation\"

Logging: set RUST_LOG (e.g. RUST_LOG=statusboard=debug).")]
#[command(version)]
struct Cli {
    /// YAML config file (allocation sheet, milestone color, report prefix)
    #[arg(short, long, global = true, env = "STATUSBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Xlsx,
}

impl From<Format> for FileFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => FileFormat::Csv,
            Format::Xlsx => FileFormat::Excel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export the status dataset as a report file.

The report is named project-status-report-<YYYY-MM-DD>.<csv|xlsx>.
CSV reports hold one `--- NAME ---` section per table; Excel reports
hold one worksheet per table.")]
    /// Export the status dataset to CSV or Excel
    Export {
        /// Status payload file (.yaml/.yml or .json)
        state: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Directory for the report file
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    #[command(long_about = "Import a CSV or Excel report.

Sections missing from the report (or present with no rows) keep the
values from --existing. Milestone colors, tasks, and checkpoints are
carried over from the existing milestone at the same position.")]
    /// Import a CSV/Excel report, merged over existing data
    Import {
        /// Report file (.csv, .xlsx, .xls)
        file: PathBuf,

        /// Existing status payload (.yaml/.yml or .json)
        #[arg(short, long)]
        existing: Option<PathBuf>,

        /// Write the merged payload here instead of printing YAML
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import the monthly resource allocation sheet
    Allocation {
        /// Excel workbook (.xlsx, .xls)
        file: PathBuf,

        /// Sheet name (defaults to the configured allocation sheet)
        #[arg(short, long, env = "STATUSBOARD_ALLOCATION_SHEET")]
        sheet: Option<String>,

        /// Write the entries here instead of printing YAML
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statusboard=info".into()),
        )
        .init();

    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => InterchangeConfig::load(path)?,
        None => InterchangeConfig::default(),
    };
    let interchange = Interchange::new(config);

    match args.command {
        Commands::Export {
            state,
            format,
            out_dir,
        } => cli::export(&interchange, state, format.into(), out_dir).await?,

        Commands::Import {
            file,
            existing,
            output,
        } => cli::import(&interchange, file, existing, output).await?,

        Commands::Allocation {
            file,
            sheet,
            output,
        } => cli::allocation(&interchange, file, sheet, output).await?,
    }

    Ok(())
}
