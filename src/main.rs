use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use dte::config::{config_dir, expand_path, init_config, load_config};
use dte::input::read_documents;
use dte::render::{render_chart_text, render_files, render_months, render_table, render_types};
use dte::session::{Listing, PageMove};
use dte::{shell, DocumentType, Result, Session, YearMonth};

#[derive(Parser)]
#[command(name = "dte")]
#[command(
    version,
    about = "Filter, chart and export Salvadoran electronic tax receipts (DTE)",
    long_about = None
)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.dte)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log every admitted document and recompute pass
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// JSON files or directories containing them
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct Filters {
    /// Document type code (e.g., 01 for Factura)
    #[arg(short = 't', long = "type", value_name = "CODE")]
    doc_type: Option<DocumentType>,

    /// Emission month to keep, YYYY-MM (can be repeated)
    #[arg(short, long, value_name = "YYYY-MM")]
    month: Vec<YearMonth>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config.toml template into the config directory
    Init,

    /// List loaded files, ten per page
    Files {
        #[command(flatten)]
        inputs: Inputs,

        /// Page to show
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// List document types present in the files
    Types {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// List emission months available for a document type
    Months {
        #[command(flatten)]
        inputs: Inputs,

        /// Document type code
        #[arg(short = 't', long = "type", value_name = "CODE")]
        doc_type: DocumentType,
    },

    /// Show the filtered receipts as a paginated table
    Table {
        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        filters: Filters,

        /// Case-insensitive text matched against NIT, issuer, receiver and date
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Print the total-payable series for the type and month selection
    Chart {
        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        filters: Filters,

        /// Draw text bars instead of printing chart JSON
        #[arg(long)]
        text: bool,
    },

    /// Export the type and month selection as a zip of JSON documents
    Export {
        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        filters: Filters,

        /// Directory for the archive (default: export.output_dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive session reading commands from stdin
    Shell {
        /// Files or directories to load at start
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dte=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Files { inputs, page } => cmd_files(&cfg_dir, &inputs, page),
        Commands::Types { inputs } => cmd_types(&cfg_dir, &inputs),
        Commands::Months { inputs, doc_type } => cmd_months(&cfg_dir, &inputs, doc_type),
        Commands::Table {
            inputs,
            filters,
            search,
            page,
        } => cmd_table(&cfg_dir, &inputs, &filters, search.as_deref(), page),
        Commands::Chart {
            inputs,
            filters,
            text,
        } => cmd_chart(&cfg_dir, &inputs, &filters, text),
        Commands::Export {
            inputs,
            filters,
            output,
        } => cmd_export(&cfg_dir, &inputs, &filters, output),
        Commands::Shell { paths } => cmd_shell(&cfg_dir, &paths),
    }
}

/// Initialize config directory with the template file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    let path = init_config(cfg_dir)?;

    println!("Initialized dte config at: {}", path.display());
    println!();
    println!("Then explore a folder of DTE files:");
    println!("  dte types <dir>");
    println!("  dte table <dir> --type 01 --month 2024-01");

    Ok(())
}

/// Load config and ingest every input, reporting skipped files on stderr
fn open_session(cfg_dir: &Path, paths: &[PathBuf]) -> Result<Session> {
    let config = load_config(cfg_dir)?;
    let mut session = Session::new(config);
    let report = session.ingest_read(read_documents(paths));
    for (name, err) in &report.rejected {
        eprintln!("Skipped {name}: {err}");
    }
    Ok(session)
}

fn apply_filters(session: &mut Session, filters: &Filters) {
    session.select_type(filters.doc_type);
    if !filters.month.is_empty() {
        session.select_months(filters.month.iter().copied());
    }
}

/// List loaded files
fn cmd_files(cfg_dir: &Path, inputs: &Inputs, page: Option<usize>) -> Result<()> {
    let mut session = open_session(cfg_dir, &inputs.paths)?;
    if let Some(page) = page {
        session.navigate(Listing::Files, PageMove::Jump(page))?;
    }
    println!("{}", render_files(&session));
    Ok(())
}

/// List available document types
fn cmd_types(cfg_dir: &Path, inputs: &Inputs) -> Result<()> {
    let session = open_session(cfg_dir, &inputs.paths)?;
    println!("{}", render_types(&session));
    Ok(())
}

/// List available months for a type
fn cmd_months(cfg_dir: &Path, inputs: &Inputs, doc_type: DocumentType) -> Result<()> {
    let mut session = open_session(cfg_dir, &inputs.paths)?;
    session.select_type(Some(doc_type));
    println!("{}", render_months(&session));
    Ok(())
}

/// Show the filtered data table
fn cmd_table(
    cfg_dir: &Path,
    inputs: &Inputs,
    filters: &Filters,
    search: Option<&str>,
    page: Option<usize>,
) -> Result<()> {
    let mut session = open_session(cfg_dir, &inputs.paths)?;
    apply_filters(&mut session, filters);
    if let Some(text) = search {
        session.set_search(text);
    }
    if let Some(page) = page {
        session.navigate(Listing::Data, PageMove::Jump(page))?;
    }
    println!("{}", render_table(&session));
    Ok(())
}

/// Print chart data as JSON, or as text bars
fn cmd_chart(cfg_dir: &Path, inputs: &Inputs, filters: &Filters, text: bool) -> Result<()> {
    let mut session = open_session(cfg_dir, &inputs.paths)?;
    apply_filters(&mut session, filters);
    let chart = session.chart();
    if text {
        println!("{}", render_chart_text(&chart));
    } else {
        let json = serde_json::to_string_pretty(&chart)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        println!("{json}");
    }
    Ok(())
}

/// Write the export archive
fn cmd_export(
    cfg_dir: &Path,
    inputs: &Inputs,
    filters: &Filters,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut session = open_session(cfg_dir, &inputs.paths)?;
    apply_filters(&mut session, filters);
    let dir = match output {
        Some(dir) => dir,
        None => expand_path(&session.config().export.output_dir),
    };
    println!("{}", shell::export(&session, &dir)?);
    Ok(())
}

/// Run the interactive shell on stdin/stdout
fn cmd_shell(cfg_dir: &Path, paths: &[PathBuf]) -> Result<()> {
    let mut session = open_session(cfg_dir, paths)?;
    if !paths.is_empty() {
        println!("Loaded {} document(s)", session.store().len());
    }
    println!("Type 'help' for a list of commands.");
    let stdin = std::io::stdin();
    shell::run(&mut session, stdin.lock(), std::io::stdout().lock())
}
