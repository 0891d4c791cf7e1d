use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fib_compare::app::AppController;
use fib_compare::config::AppConfig;
use fib_compare::data::loader::DatasetLoader;
use fib_compare::data::source::DirectorySource;
use fib_compare::data::summary::{summarize, summary_table};
use fib_compare::plot::chart::ChartBuilder;
use fib_compare::plot::render::{renderer_for, OutputFormat};
use fib_compare::selection::LineSelectionProvider;
use fib_compare::Error;

#[derive(Parser)]
#[command(name = "fib-compare")]
#[command(about = "Compare Fibonacci benchmark runs: execution time against Fibonacci index, one line per method")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "FIB_COMPARE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the benchmark files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Extension of benchmark files
    #[arg(long, global = true)]
    extension: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the chart once
    Render {
        /// Methods to show, comma separated (default: all)
        #[arg(long, value_delimiter = ',')]
        methods: Option<Vec<String>>,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Render, then re-render for every selection read from stdin
    Interactive {
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Print per-method statistics
    Summary,
    /// List the methods found in the data directory
    Methods,
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("fib_compare={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(ext) = &cli.extension {
        config.extension = ext.clone();
    }
    Ok(config)
}

fn apply_output(config: &mut AppConfig, out: &OutputArgs) {
    if let Some(format) = out.format {
        config.format = format;
        if out.output.is_none() && format == OutputFormat::Json {
            config.output.set_extension("json");
        }
    }
    if let Some(output) = &out.output {
        config.output = output.clone();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;
    debug!("Configuration: {:?}", config);

    let source = DirectorySource::new(&config.data_dir);
    let loader = DatasetLoader::new(config.extension.clone());

    match &cli.command {
        Commands::Render { methods, out } => {
            apply_output(&mut config, out);
            let renderer = renderer_for(config.format, &config.output, &config.page_title);
            let mut app = AppController::start(&source, loader, ChartBuilder::new(config.chart.clone()), renderer)?;
            if let Some(methods) = methods {
                app.on_selection_change(methods.iter().cloned())?;
            }
            println!("Wrote {}", config.output.display());
        }
        Commands::Interactive { out } => {
            apply_output(&mut config, out);
            let renderer = renderer_for(config.format, &config.output, &config.page_title);
            let mut app = AppController::start(&source, loader, ChartBuilder::new(config.chart.clone()), renderer)?;
            eprintln!(
                "Methods: {}. Enter a comma-separated selection, '*' for all, 'reload' or 'quit'.",
                app.filter().available_methods().join(", ")
            );
            let mut provider = LineSelectionProvider::new(io::stdin().lock());
            app.run(&mut provider, &source)?;
        }
        Commands::Summary => {
            let dataset = loader.load_from(&source)?;
            println!("{}", summary_table(&summarize(&dataset)));
        }
        Commands::Methods => {
            let dataset = loader.load_from(&source)?;
            for method in dataset.methods() {
                println!("{}", method);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(no_data @ Error::NoData { .. }) => eprintln!("{}", no_data),
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
