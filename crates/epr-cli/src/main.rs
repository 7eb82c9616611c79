mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "epr",
    version,
    about = "Aggregate EPR plastic sales/purchase rows and project recycled-content targets"
)]
struct Cli {
    /// Log debug events to stderr (overrides EPR_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the category summary and both target projections from JSON rows
    Summarize {
        /// JSON array of rows (category, registrationType, financialYear, quantity, ...)
        input_file: PathBuf,

        /// Custom mandate table (JSON)
        #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
        mandates: Option<PathBuf>,

        /// Predefined mandate table
        #[arg(short, long, value_name = "NAME", default_value = "urep")]
        preset: String,

        /// Leave a category out of the projections (repeatable)
        #[arg(short, long = "exclude", value_name = "CATEGORY")]
        exclude: Vec<String>,

        /// Let every upload status feed the registered/recycled deductions
        #[arg(long)]
        any_status: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the report as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Group cost line items by product, component, polymer, category or supplier
    Group {
        /// JSON array of cost line items
        input_file: PathBuf,

        /// Grouping dimension
        #[arg(short, long, default_value = "product")]
        by: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show the product/component breakdown (supplier and polymer only)
        #[arg(long)]
        drill_down: bool,
    },
    /// Print a saved report
    Inspect {
        /// Report JSON written by `summarize --out`
        report_file: PathBuf,
    },
    /// Manage and inspect mandate tables
    Mandates {
        #[command(subcommand)]
        action: MandatesAction,
    },
}

#[derive(Subcommand)]
enum MandatesAction {
    /// List predefined mandate tables
    List,
    /// Print a predefined mandate table
    Show {
        /// Preset name (e.g., "urep")
        preset: String,
    },
    /// Validate a custom mandate table
    Validate {
        /// Path to JSON mandate table
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("EPR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Summarize {
            input_file,
            mandates,
            preset,
            exclude,
            any_status,
            output,
            out,
        } => commands::summarize::run(
            input_file,
            mandates,
            &preset,
            &exclude,
            any_status,
            &output,
            out,
        ),
        Commands::Group {
            input_file,
            by,
            output,
            drill_down,
        } => commands::group::run(input_file, &by, &output, drill_down),
        Commands::Inspect { report_file } => commands::inspect::run(&report_file),
        Commands::Mandates { action } => match action {
            MandatesAction::List => commands::mandates::list(),
            MandatesAction::Show { preset } => commands::mandates::show(&preset),
            MandatesAction::Validate { file } => commands::mandates::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
