//! Wingman CLI - a local AI wingman for your code, served by Ollama.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wingman_core::CommandKind;

mod commands;

/// Wingman - suggest, explain, fix, review, document and test code with a
/// locally hosted model
#[derive(Parser)]
#[command(name = "wingman")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest code continuing or improving the selection
    Suggest(GenerateArgs),

    /// Explain the selected code
    Explain(GenerateArgs),

    /// Fix the selected code
    Fix(GenerateArgs),

    /// Review the selected code
    Review(GenerateArgs),

    /// Write documentation comments for the selected code
    Docs(GenerateArgs),

    /// Write unit tests for the selected code
    Tests(GenerateArgs),

    /// List the models available on the Ollama server
    Models,

    /// Show, save or reset the persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Input file
    file: PathBuf,

    /// Selection as a 1-based line range START:END (whole file when omitted)
    #[arg(long)]
    lines: Option<String>,

    /// Insert the reply into the file after the selection instead of
    /// printing it
    #[arg(long)]
    write: bool,

    /// Project root scanned for context files
    #[arg(long, default_value = ".")]
    project: PathBuf,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the effective settings for the current model
    Show,

    /// Save field overrides over the current model's defaults
    Save(SaveArgs),

    /// Reset persisted settings to a model's defaults
    Reset {
        /// Model to reset to
        model: String,
    },
}

#[derive(clap::Args)]
struct SaveArgs {
    /// Model to select
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    context: Option<u32>,
    #[arg(long)]
    temperature: Option<f32>,
    #[arg(long)]
    top_k: Option<u32>,
    #[arg(long)]
    top_p: Option<f32>,
    #[arg(long)]
    min_p: Option<f32>,
    #[arg(long)]
    repeat_penalty: Option<f32>,
    #[arg(long)]
    num_predict: Option<i32>,
    #[arg(long)]
    num_gpu: Option<i32>,
    #[arg(long)]
    thinking: Option<bool>,
    #[arg(long)]
    history: Option<bool>,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Suggest(args) => generate(CommandKind::Suggest, args),
        Commands::Explain(args) => generate(CommandKind::Explain, args),
        Commands::Fix(args) => generate(CommandKind::Fix, args),
        Commands::Review(args) => generate(CommandKind::Review, args),
        Commands::Docs(args) => generate(CommandKind::GenerateDocs, args),
        Commands::Tests(args) => generate(CommandKind::GenerateTests, args),
        Commands::Models => tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(commands::models::run()),
        Commands::Settings { action } => commands::settings::run(action),
    }
}

fn generate(kind: CommandKind, args: GenerateArgs) -> miette::Result<()> {
    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(commands::generate::run(
            kind,
            &args.file,
            args.lines.as_deref(),
            args.write,
            &args.project,
        ))
}
