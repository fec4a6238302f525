//! Binary entry point for the `edgecolor` CLI.
#![forbid(unsafe_code)]

#[path = "cli/config.rs"]
mod config;
#[path = "cli/ui.rs"]
mod ui;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use vizing::{
    cli::edge_list::{
        read_coloring, read_edge_list, write_coloring, CliError, ColoringFormat, EdgeListFormat,
    },
    logging::init_logging,
    verify::{diff_edge_sets, verify_triples, VerifyReport, VerifySeverity},
    ColoringOptions, ColoringReport, GraphStats, Multigraph, PaletteGrowth,
};

use config::CliConfig;
use ui::Ui;

#[derive(Parser, Debug)]
#[command(
    name = "edgecolor",
    version,
    about = "Color the edges of a multigraph with at most max-degree + 1 colors",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "EDGECOLOR_CONFIG",
        value_name = "FILE",
        help = "Path to the CLI config file"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "FILTER",
        help = "Log filter, e.g. info or vizing=debug"
    )]
    log_level: Option<String>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[arg(long, short, global = true, help = "Suppress summaries and progress")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Color an edge list and write the coloring.
    Color(ColorCmd),
    /// Check an output coloring against its input edge list.
    Verify(VerifyCmd),
    /// Print size statistics for an edge list.
    Stats(StatsCmd),
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[arg(long, value_enum, help = "Input edge-list layout")]
    input_format: Option<InputFormatArg>,
}

#[derive(Args, Debug)]
struct ColorCmd {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long, short, value_name = "FILE", help = "Write the coloring here instead of stdout")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, help = "Coloring output layout")]
    output_format: Option<ColoringFormatArg>,

    #[arg(
        long,
        help = "Grow the palette past max-degree + 1 when recoloring fails"
    )]
    allow_palette_growth: bool,

    #[arg(long, help = "Show a progress bar while coloring")]
    progress: bool,
}

#[derive(Args, Debug)]
struct VerifyCmd {
    #[command(flatten)]
    input: InputArgs,

    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[arg(long, value_enum, help = "Layout of the coloring file")]
    output_format: Option<ColoringFormatArg>,
}

#[derive(Args, Debug)]
struct StatsCmd {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum InputFormatArg {
    Text,
    Csv,
}

impl From<InputFormatArg> for EdgeListFormat {
    fn from(value: InputFormatArg) -> Self {
        match value {
            InputFormatArg::Text => EdgeListFormat::Text,
            InputFormatArg::Csv => EdgeListFormat::Csv,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColoringFormatArg {
    Text,
    Csv,
    Json,
}

impl From<ColoringFormatArg> for ColoringFormat {
    fn from(value: ColoringFormatArg) -> Self {
        match value {
            ColoringFormatArg::Text => ColoringFormat::Text,
            ColoringFormatArg::Csv => ColoringFormat::Csv,
            ColoringFormatArg::Json => ColoringFormat::Json,
        }
    }
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.clone())?;
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "warn".to_string());
    init_logging(&level)?;
    tracing::debug!(config = ?config.path(), "loaded CLI config");

    let ui = Ui::new(cli.quiet);
    match &cli.command {
        Command::Color(cmd) => run_color(&cli, cmd, &config, &ui),
        Command::Verify(cmd) => run_verify(&cli, cmd, &config, &ui),
        Command::Stats(cmd) => run_stats(&cli, cmd, &config, &ui),
    }
}

fn run_color(cli: &Cli, cmd: &ColorCmd, config: &CliConfig, ui: &Ui) -> Result<i32, Box<dyn Error>> {
    let records = load_input(&cmd.input, config)?;
    let mut graph = Multigraph::from_records(records).map_err(CliError::from)?;

    let allow_growth = cmd.allow_palette_growth || config.allow_palette_growth.unwrap_or(false);
    let options = ColoringOptions {
        palette_growth: if allow_growth {
            PaletteGrowth::Allow
        } else {
            PaletteGrowth::Forbid
        },
    };

    let bar = if cmd.progress {
        ui.edge_progress(graph.edge_count())
    } else {
        indicatif::ProgressBar::hidden()
    };
    let report = graph
        .edge_coloring_with(&options, |done, _| bar.set_position(done as u64))
        .map_err(CliError::from)?;
    bar.finish_and_clear();

    let format = cmd
        .output_format
        .map(ColoringFormat::from)
        .or(config.output_format)
        .unwrap_or_default();
    write_coloring(cmd.output.as_deref(), format, &graph.colored_edges())?;

    if cmd.output.is_some() {
        emit(cli.format, &report, || print_report_text(ui, &report))?;
    }
    Ok(0)
}

fn run_verify(cli: &Cli, cmd: &VerifyCmd, config: &CliConfig, ui: &Ui) -> Result<i32, Box<dyn Error>> {
    let records = load_input(&cmd.input, config)?;
    let format = cmd
        .output_format
        .map(ColoringFormat::from)
        .or(config.output_format)
        .unwrap_or_default();
    let colored = read_coloring(&cmd.output, format)?;

    let diff = diff_edge_sets(&records, &colored);
    let mut report = verify_triples(&colored);
    report.merge_diff(&diff);

    emit(cli.format, &report, || print_verify_text(ui, &report))?;
    Ok(if report.success { 0 } else { 2 })
}

fn run_stats(cli: &Cli, cmd: &StatsCmd, config: &CliConfig, ui: &Ui) -> Result<i32, Box<dyn Error>> {
    let records = load_input(&cmd.input, config)?;
    let graph = Multigraph::from_records(records).map_err(CliError::from)?;
    let stats = graph.stats();
    emit(cli.format, &stats, || print_stats_text(ui, &stats))?;
    Ok(0)
}

fn load_input(args: &InputArgs, config: &CliConfig) -> Result<Vec<vizing::EdgeRecord>, CliError> {
    let format = args
        .input_format
        .map(EdgeListFormat::from)
        .or(config.input_format)
        .unwrap_or_default();
    ensure_exists(&args.input)?;
    read_edge_list(&args.input, format)
}

fn ensure_exists(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::Message(format!("{} not found", path.display())))
    }
}

fn emit<T, F>(format: OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: serde::Serialize,
    F: Fn(),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(),
    }
    Ok(())
}

fn print_report_text(ui: &Ui, report: &ColoringReport) {
    ui.section(
        "Coloring:",
        [
            ("max_degree", report.max_degree),
            ("palette", report.palette_size),
            ("colors_used", report.colors_used),
            ("direct", report.direct_assignments),
            ("path_swaps", report.path_swaps),
            ("fan_rotations", report.fan_rotations),
            ("palette_growths", report.palette_growths),
        ],
    );
}

fn print_verify_text(ui: &Ui, report: &VerifyReport) {
    ui.section(
        "Verify:",
        [
            ("success", report.success.to_string()),
            ("edges", report.counts.edges.to_string()),
            ("vertices", report.counts.vertices.to_string()),
            ("max_degree", report.counts.max_degree.to_string()),
            ("colors_used", report.counts.colors_used.to_string()),
            ("conflicts", report.counts.conflicts.to_string()),
        ],
    );
    for finding in &report.findings {
        let tag = match finding.severity {
            VerifySeverity::Info => "info",
            VerifySeverity::Warning => "warning",
            VerifySeverity::Error => "error",
        };
        println!("- {tag}: {}", finding.message);
    }
}

fn print_stats_text(ui: &Ui, stats: &GraphStats) {
    ui.section(
        "Graph:",
        [
            ("vertices", stats.vertices as i64),
            ("edges", stats.edges as i64),
            ("max_degree", stats.max_degree as i64),
            ("parallel_edges", stats.parallel_edges as i64),
            ("total_multiplicity", stats.total_multiplicity),
        ],
    );
}
