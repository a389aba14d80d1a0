//! JS Snippets CLI - headless host for the snippet service
//!
//! Mounts the service against an in-memory host so a snippet source can be
//! checked, listed, queried for completions, and exercised from a terminal.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use jssnippets_core::host::memory::Insertion;
use jssnippets_core::{
    CompletionContext, CompletionItem, ConfigError, Editor, MemoryEditor, MemoryHost,
    ServiceSettings, ServiceState, SnippetError, SnippetService,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless host for JS Snippets sources
#[derive(Parser)]
#[command(name = "jssnippets-cli")]
#[command(author, version, about = "JS Snippets command-line host")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL or directory the snippet source is loaded from
    #[arg(short, long, global = true, default_value = ".")]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Load the snippet source and report what was found
    #[command(about = "Load the snippet source and report entry counts")]
    Check,

    /// List palette commands
    #[command(about = "List the palette commands the source registers")]
    Commands {
        /// Output format for the command list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Query completions for a prefix
    #[command(about = "Print completion items for a typed prefix")]
    Complete {
        /// Text typed before the cursor
        prefix: String,

        /// Editor mode (`javascript` or a full id such as `ace/mode/javascript`)
        #[arg(short, long, default_value = "javascript")]
        mode: String,

        /// Output format for the completion list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Run a palette command against an in-memory editor
    #[command(about = "Run a palette command and print the inserted text")]
    Exec {
        /// Command name (e.g. `snippet-clg-0`)
        name: String,

        /// Simulate an editor without native snippet support
        #[arg(long)]
        plain: bool,
    },
}

/// Output format for list commands
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let base_url = cli.base_url.as_str();

    let result = match cli.command {
        Commands::Check => cmd_check(config, base_url).await,
        Commands::Commands { format } => cmd_commands(config, base_url, format).await,
        Commands::Complete {
            prefix,
            mode,
            format,
        } => cmd_complete(config, base_url, &prefix, &mode, format).await,
        Commands::Exec { name, plain } => cmd_exec(config, base_url, &name, plain).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Reads settings from `path`, or defaults when no path was given
fn load_settings(path: Option<&Path>) -> Result<ServiceSettings, CliError> {
    path.map_or_else(|| Ok(ServiceSettings::default()), ServiceSettings::load)
        .map_err(CliError::from)
}

/// Service mounted on an in-memory host
struct Session {
    host: Arc<MemoryHost>,
    service: SnippetService,
}

impl Session {
    /// Builds the service and runs `init` against `base_url`
    async fn start(config: Option<&Path>, base_url: &str) -> Result<Self, CliError> {
        let settings = load_settings(config)?;
        let host = MemoryHost::new();
        let mut service = SnippetService::new(
            settings,
            host.ports(),
            Arc::new(jssnippets_core::SourceFetcher::new()),
        );
        service.init(base_url).await;

        Ok(Self { host, service })
    }

    /// Fails with the toast text when the service did not come up
    fn ensure_ready(&self) -> Result<(), CliError> {
        if self.service.state() == ServiceState::Ready {
            return Ok(());
        }
        let reason = self
            .host
            .toasts()
            .first()
            .map_or_else(|| self.service.state().to_string(), |(text, _)| text.clone());
        Err(CliError::Degraded(reason))
    }
}

/// Check command handler
async fn cmd_check(config: Option<&Path>, base_url: &str) -> Result<(), CliError> {
    let session = Session::start(config, base_url).await?;
    session.ensure_ready()?;

    let snippets = session.service.snippets();
    let usable = snippets.iter().filter(|s| s.is_usable()).count();
    println!(
        "Loaded {} entries from {}: {usable} usable, {} skipped",
        snippets.len(),
        session.service.base_url().unwrap_or(base_url),
        snippets.len() - usable
    );
    if !session.service.has_completer() {
        println!("No completer registered");
    }
    Ok(())
}

/// Palette command listing entry
#[derive(Debug, Serialize)]
struct CommandOutput {
    name: String,
    label: String,
}

/// Commands command handler
async fn cmd_commands(
    config: Option<&Path>,
    base_url: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let session = Session::start(config, base_url).await?;
    session.ensure_ready()?;

    let commands: Vec<CommandOutput> = session
        .host
        .command_names()
        .into_iter()
        .filter_map(|name| {
            session.host.command(&name).map(|command| CommandOutput {
                name,
                label: command.value,
            })
        })
        .collect();

    match format {
        OutputFormat::Table => println!("{}", format_command_table(&commands)),
        OutputFormat::Json => println!("{}", format_json(&commands)?),
    }
    Ok(())
}

/// Format palette commands as a table string
fn format_command_table(commands: &[CommandOutput]) -> String {
    if commands.is_empty() {
        return "No commands registered.".to_string();
    }

    let name_width = commands
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    let _ = writeln!(output, "{:<name_width$}  LABEL", "NAME");
    let _ = writeln!(output, "{:-<name_width$}  -----", "");
    for command in commands {
        let _ = writeln!(output, "{:<name_width$}  {}", command.name, command.label);
    }
    output.trim_end().to_string()
}

/// Expands a short mode name to a full mode id
fn mode_id(mode: &str) -> String {
    if mode.contains('/') {
        mode.to_string()
    } else {
        format!("ace/mode/{mode}")
    }
}

/// Complete command handler
async fn cmd_complete(
    config: Option<&Path>,
    base_url: &str,
    prefix: &str,
    mode: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let session = Session::start(config, base_url).await?;
    session.ensure_ready()?;

    let items = session
        .host
        .query(&CompletionContext::new(mode_id(mode)), prefix);

    match format {
        OutputFormat::Table => println!("{}", format_completion_table(&items)),
        OutputFormat::Json => println!("{}", format_json(&items)?),
    }
    Ok(())
}

/// Format completion items as a table string
fn format_completion_table(items: &[CompletionItem]) -> String {
    if items.is_empty() {
        return "No completions.".to_string();
    }

    let caption_width = items
        .iter()
        .map(|i| i.caption.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    let _ = writeln!(output, "{:<caption_width$}  {:>5}  META", "CAPTION", "SCORE");
    let _ = writeln!(output, "{:-<caption_width$}  -----  ----", "");
    for item in items {
        let _ = writeln!(
            output,
            "{:<caption_width$}  {:>5}  {}",
            item.caption, item.score, item.meta
        );
    }
    output.trim_end().to_string()
}

/// Exec command handler
async fn cmd_exec(
    config: Option<&Path>,
    base_url: &str,
    name: &str,
    plain: bool,
) -> Result<(), CliError> {
    let session = Session::start(config, base_url).await?;
    session.ensure_ready()?;

    let editor = Arc::new(if plain {
        MemoryEditor::plain()
    } else {
        MemoryEditor::with_snippets()
    });
    session.host.focus(Arc::clone(&editor) as Arc<dyn Editor>);

    if !session.host.exec(name) {
        return Err(CliError::CommandNotFound(name.to_string()));
    }

    for insertion in editor.insertions() {
        match insertion {
            Insertion::Snippet(template) => println!("{template}"),
            Insertion::Text(text) => println!("{text}"),
        }
    }
    Ok(())
}

/// Serialize a value as pretty JSON
fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - settings, output, or other non-load errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Lookup failure - the named command does not exist
    pub const NOT_FOUND: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Core library error
    #[error(transparent)]
    Snippet(#[from] SnippetError),

    /// The snippet source could not be loaded
    #[error("Snippet source unavailable: {0}")]
    Degraded(String),

    /// Palette command not found
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Output formatting error
    #[error("Output error: {0}")]
    Output(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Snippet(err.into())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (settings, degraded source, output)
    /// - 2: Command not found
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound(_) => exit_codes::NOT_FOUND,
            Self::Snippet(_) | Self::Degraded(_) | Self::Output(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
