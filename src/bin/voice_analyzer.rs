use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use voice_analyzer::render::{pitch_plot, render_text};
use voice_analyzer::session::{APP_TITLE, DISCLAIMER_TEXT, DISCLAIMER_TITLE, WELCOME_TEXT};
use voice_analyzer::{analyze_upload_in, AnalyzerConfig, FeatureExtractor, WizardState};

const PLOT_WIDTH: usize = 72;
const PLOT_HEIGHT: usize = 12;

#[derive(Parser, Debug)]
#[command(
    name = "voice_analyzer",
    about = "Detect gender and acoustic features from a voice recording"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Analyzer configuration JSON (defaults are used when absent or unreadable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one audio file ("-" reads the file from stdin)
    Analyze {
        input: String,
        /// Accept the privacy disclaimer without prompting
        #[arg(long)]
        agree: bool,
        /// Print the report as JSON instead of tiles
        #[arg(long)]
        json: bool,
        /// Write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Append a plot of the pitch track (to stderr with --json)
        #[arg(long)]
        plot: bool,
        /// Directory for the staged upload (defaults to the system temp dir)
        #[arg(long)]
        temp_dir: Option<PathBuf>,
    },
    /// Print the effective analyzer configuration
    Config,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli
        .config
        .as_deref()
        .map(AnalyzerConfig::load_from_file)
        .unwrap_or_default();

    match cli.command {
        Commands::Analyze {
            input,
            agree,
            json,
            output,
            plot,
            temp_dir,
        } => run_analyze(
            config,
            &input,
            AnalyzeOptions {
                agree,
                json,
                output,
                plot,
                temp_dir,
            },
        ),
        Commands::Config => run_config(&config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

struct AnalyzeOptions {
    agree: bool,
    json: bool,
    output: Option<PathBuf>,
    plot: bool,
    temp_dir: Option<PathBuf>,
}

fn run_analyze(config: AnalyzerConfig, input: &str, options: AnalyzeOptions) -> Result<ExitCode> {
    let extractor =
        FeatureExtractor::with_config(config).context("invalid analyzer configuration")?;
    let from_stdin = input == "-";

    // Splash, then disclaimer; analysis only runs once consent is given
    let state = WizardState::default();
    if !options.json {
        println!("{APP_TITLE}\n{WELCOME_TEXT}\n");
    }
    let state = state.start()?;
    if !options.json {
        println!("{DISCLAIMER_TITLE}\n{DISCLAIMER_TEXT}\n");
    }

    let consented = if options.agree {
        true
    } else if from_stdin {
        eprintln!("Consent cannot be prompted while audio is read from stdin; pass --agree");
        false
    } else {
        prompt_consent()?
    };
    if !consented {
        eprintln!("Consent declined; nothing was analyzed.");
        return Ok(ExitCode::from(3));
    }
    let state = state.agree()?;
    log::debug!("[CLI] Wizard state: {}", state);

    let bytes = read_input(input)?;
    let temp_dir = options.temp_dir.unwrap_or_else(std::env::temp_dir);
    let report = match analyze_upload_in(&extractor, &bytes, &temp_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return Ok(ExitCode::from(1));
        }
    };

    if let Some(path) = &options.output {
        write_json(path, &serde_json::to_string_pretty(&report)?)?;
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    if options.plot {
        let plot = pitch_plot(&report.pitch_array, PLOT_WIDTH, PLOT_HEIGHT);
        // stdout carries only the report in JSON mode
        if options.json {
            eprint!("{plot}");
        } else {
            print!("{plot}");
        }
    }

    Ok(ExitCode::from(0))
}

fn run_config(config: &AnalyzerConfig) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(ExitCode::from(0))
}

fn prompt_consent() -> Result<bool> {
    eprint!("I Agree & Continue? [y/N] ");
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("reading audio from stdin")?;
        Ok(bytes)
    } else {
        fs::read(input).with_context(|| format!("reading {}", input))
    }
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
