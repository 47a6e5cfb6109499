use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;

use clarion_fence_lib::config::Config;
use clarion_fence_lib::exit_codes::exit;

mod commands;

#[derive(Parser)]
#[command(name = "clarion-fence", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report whether text looks like Clarion source (exit code 0 if it does)
    Classify {
        /// File to classify; reads stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Only set the exit code
        #[arg(short, long)]
        quiet: bool,
    },

    /// Paste clipboard text into a document, wrapping Clarion source in a fenced block
    Paste(PasteArgs),

    /// Insert an empty Clarion block, or surround the selection with one
    Block {
        /// Markdown document to edit
        document: PathBuf,

        #[command(flatten)]
        position: Position,

        /// Surround the selection instead of inserting an empty block
        #[arg(long)]
        surround: bool,

        /// Print the result instead of writing the document
        #[arg(long)]
        dry_run: bool,
    },

    /// Show, set or reset the remembered wrap preference
    Preference {
        #[command(subcommand)]
        action: PreferenceCommand,
    },

    /// Print the effective configuration
    Config,

    /// Create a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = ".clarion-fence.toml")]
        path: PathBuf,
    },
}

#[derive(Args)]
pub struct PasteArgs {
    /// Markdown document to paste into (created if missing)
    document: PathBuf,

    /// File holding the clipboard text; "-" reads stdin
    clipboard: PathBuf,

    #[command(flatten)]
    position: Position,

    /// Answer the wrap prompt without asking
    #[arg(long, value_enum)]
    answer: Option<Answer>,

    /// Remember the answer given with --answer
    #[arg(long, requires = "answer")]
    remember: bool,

    /// Print the result instead of writing the document
    #[arg(long)]
    dry_run: bool,
}

/// Caret or selection, as 1-based line and column numbers. Defaults to the end of the
/// document.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct Position {
    /// Caret line
    #[arg(long, requires = "column")]
    line: Option<usize>,

    /// Caret column
    #[arg(long, requires = "line")]
    column: Option<usize>,

    /// Line where the selection ends
    #[arg(long, requires_all = ["line", "end_column"])]
    end_line: Option<usize>,

    /// Column where the selection ends
    #[arg(long, requires = "end_line")]
    end_column: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Answer {
    /// Wrap the text
    Wrap,
    /// Paste the text unchanged
    Plain,
    /// Close the prompt without answering
    Dismiss,
}

#[derive(Subcommand)]
pub enum PreferenceCommand {
    /// Print the stored preference
    Show,
    /// Store a preference
    Set {
        #[arg(value_enum)]
        value: PreferenceValue,
    },
    /// Forget the stored preference
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PreferenceValue {
    Always,
    Never,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(command: Commands, config: &Config) -> anyhow::Result<i32> {
    match command {
        Commands::Classify { file, quiet } => commands::classify::handle_classify(file.as_deref(), quiet),
        Commands::Paste(args) => commands::paste::handle_paste(&args, config),
        Commands::Block {
            document,
            position,
            surround,
            dry_run,
        } => commands::block::handle_block(&document, position, surround, dry_run, config),
        Commands::Preference { action } => commands::preference::handle_preference(action, config),
        Commands::Config => commands::config::handle_config(config),
        Commands::Init { path } => commands::config::handle_init(&path),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        // `init` must not fail on a broken config it is about to replace
        Commands::Init { path } => commands::config::handle_init(&path),
        command => {
            let config = match Config::load(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}: {}", "Config error".red().bold(), e);
                    exit::tool_error();
                }
            };
            run(command, &config)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            exit::tool_error();
        }
    }
}
