//! Autoname CLI entry point.
//!
//! Exposes the labelling, origin and title helpers, and runs actions over a
//! JSON selection against in-memory collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use autoname::annotation::GroupCounter;
use autoname::config::{load_with, AppConfig};
use autoname::dispatch::{
    available_actions, resolve, Action, ActionDispatcher, ActiveSelection, ConfigProvider,
    InMemoryScope, InMemoryToolSink, InMemoryTriage, ScopeRegistry, SelectionContext, ToolSink,
    TriageSink,
};
use autoname::engine::origin::request_origin;
use autoname::engine::{extract_title, normalize};
use autoname::types::Request;

/// Autoname — stable labels and grouped annotations for captured HTTP traffic.
#[derive(Parser)]
#[command(name = "autoname", version, about)]
struct Cli {
    /// Config file to use instead of `~/.autoname/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Print the label for a request.
    Label {
        /// Request method.
        method: String,
        /// Absolute request URL.
        url: String,
    },
    /// Print the origin of a URL.
    Origin {
        /// Absolute request URL.
        url: String,
    },
    /// Print the page title found in an HTML file.
    Title {
        /// File holding the response body.
        file: PathBuf,
    },
    /// List the actions offered for a selection.
    Actions {
        /// JSON selection context.
        selection: PathBuf,
    },
    /// Run an action over a selection and print what the collaborators received.
    Dispatch {
        /// One of route-to-tool, route-to-triage, include-in-scope, exclude-from-scope.
        action: Action,
        /// JSON selection context.
        selection: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_with(cli.config.as_deref(), |key| std::env::var(key).ok())
        .context("failed to load configuration")?;
    let config = loaded.config.clone();

    let _logging_guard = match &cli.log_dir {
        Some(dir) => Some(autoname::logging::init_production(dir, &config.logging.level)?),
        None => {
            autoname::logging::init_cli(&config.logging.level);
            None
        }
    };
    loaded.log_summary();

    match cli.command {
        Command::Label { method, url } => handle_label(&method, &url),
        Command::Origin { url } => handle_origin(&url),
        Command::Title { file } => handle_title(&file),
        Command::Actions { selection } => handle_actions(&selection),
        Command::Dispatch { action, selection } => handle_dispatch(action, &selection, config),
    }
}

fn handle_label(method: &str, url: &str) -> anyhow::Result<()> {
    let request = Request::from_url(method, url).with_context(|| format!("invalid URL {url}"))?;
    println!("{}", normalize(&request.method, &request.path_without_query));
    Ok(())
}

fn handle_origin(url: &str) -> anyhow::Result<()> {
    let request = Request::from_url("GET", url).with_context(|| format!("invalid URL {url}"))?;
    println!("{}", request_origin(&request.url, &request.path));
    Ok(())
}

fn handle_title(file: &Path) -> anyhow::Result<()> {
    let body = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    match extract_title(&body) {
        Some(title) => {
            println!("{title}");
            Ok(())
        }
        None => anyhow::bail!("no title found in {}", file.display()),
    }
}

fn load_selection(path: &Path) -> anyhow::Result<ActiveSelection> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read selection at {}", path.display()))?;
    let context: SelectionContext = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse selection at {}", path.display()))?;
    let selection = resolve(context);
    debug!(size = selection.len(), "selection resolved");
    Ok(selection)
}

fn handle_actions(path: &Path) -> anyhow::Result<()> {
    let selection = load_selection(path)?;
    for action in available_actions(&selection) {
        println!("{}\t{}", action.id(), action.label());
    }
    Ok(())
}

fn handle_dispatch(action: Action, path: &Path, config: AppConfig) -> anyhow::Result<()> {
    let selection = load_selection(path)?;
    anyhow::ensure!(
        available_actions(&selection).contains(&action),
        "nothing selected"
    );

    let counter = Arc::new(GroupCounter::new());
    let tool = Arc::new(InMemoryToolSink::new());
    let triage = Arc::new(InMemoryTriage::new());
    let scope = Arc::new(InMemoryScope::new());

    let provider: Arc<dyn ConfigProvider> = Arc::new(config.annotations);
    let tool_sink: Arc<dyn ToolSink> = tool.clone();
    let triage_sink: Arc<dyn TriageSink> = triage.clone();
    let scope_registry: Arc<dyn ScopeRegistry> = scope.clone();

    let dispatcher =
        ActionDispatcher::new(counter, provider, tool_sink, triage_sink, scope_registry);
    let report = dispatcher.dispatch(action, &selection);

    let output = serde_json::json!({
        "action": action,
        "attempted": report.attempted,
        "delivered": report.delivered(),
        "tool": tool.opened(),
        "triage": triage.entries(),
        "scope": {
            "included": scope.included(),
            "excluded": scope.excluded(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
