mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ncrb",
    version,
    about = "Extract and consolidate state-wise suicide statistics from NCRB reports"
)]
struct Cli {
    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Custom JSON layout file
    #[arg(short, long = "layout", value_name = "FILE", conflicts_with = "preset")]
    layout: Option<PathBuf>,

    /// Predefined layout (default: ncrb-adsi)
    #[arg(short, long = "preset", value_name = "NAME")]
    preset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the section tables of report PDFs (or pre-extracted .txt) without reshaping
    Extract {
        /// PDF or text files
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write JSON wide tables to a file, ready for `consolidate`
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Run pdftotext without -layout
        #[arg(long)]
        raw: bool,
    },
    /// Split a document into whitespace-separated columns, one row per line
    Split {
        /// PDF or text file
        input_file: PathBuf,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Reshape reports (PDF, txt, xlsx or extracted JSON) into one long-format dataset
    Consolidate {
        /// Input files; each is processed independently
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Duplicate (year, entity, category) handling: keep, keep-first or error
        #[arg(long, value_name = "POLICY")]
        duplicates: Option<String>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the dataset to a file (format from --output, table becomes csv)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Write the batch summary as JSON
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },
    /// Manage and inspect report layouts
    Layouts {
        #[command(subcommand)]
        action: LayoutsAction,
    },
}

#[derive(Subcommand)]
enum LayoutsAction {
    /// List predefined layouts
    List,
    /// Explain a layout in plain language
    Explain {
        /// Preset name (e.g., "ncrb-adsi")
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_files,
            layout,
            output,
            out,
            raw,
        } => commands::extract::run(input_files, layout.layout, layout.preset, &output, out, raw),
        Commands::Split { input_file, output } => commands::split::run(input_file, &output),
        Commands::Consolidate {
            input_files,
            layout,
            duplicates,
            output,
            out,
            summary,
        } => commands::consolidate::run(commands::consolidate::ConsolidateArgs {
            input_files,
            layout_file: layout.layout,
            preset: layout.preset,
            duplicates,
            output_format: output,
            out,
            summary,
        }),
        Commands::Layouts { action } => match action {
            LayoutsAction::List => commands::layouts::list(),
            LayoutsAction::Explain { preset } => commands::layouts::explain(&preset),
            LayoutsAction::Validate { file } => commands::layouts::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
