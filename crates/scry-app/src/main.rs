//! scry - mirror and drive a remote code-analysis server
//!
//! Keeps a local mirror of the server's project -> snapshot -> analysis
//! hierarchy, starts analyses, and renders their output tables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scry_adapters::{Config, HttpRemote, OutputPage};
use scry_core::{HierarchyNode, Selection};
use scry_engine::{Session, SyncObserver};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scry",
    about = "Client for a remote code-analysis server",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mirror the server's project/snapshot/analysis hierarchy
    Sync,
    /// Show or update the stored configuration
    Config(ConfigArgs),
    /// Start an analysis on the selected project and snapshot
    Analyze(AnalyzeArgs),
    /// Fetch one page of an analysis output table
    Results(ResultsArgs),
    /// Look up analysis results for one source line
    Lookup(LookupArgs),
    /// Post a directory as a new code snapshot, then re-sync
    Post(PostArgs),
    /// Print the server's web UI address for the current selection
    Web,
}

#[derive(clap::Args, Debug)]
struct ConfigArgs {
    /// Server address, e.g. "localhost:8080" or "https://host/path"
    #[arg(long)]
    server: Option<String>,

    /// User name on the server
    #[arg(long)]
    user: Option<String>,

    /// API key / password
    #[arg(long)]
    token: Option<String>,

    /// Remember this project as selected
    #[arg(long)]
    project: Option<String>,

    /// Remember this snapshot as selected
    #[arg(long)]
    snapshot: Option<String>,
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Analysis type display name, e.g. "Taint Analysis"
    analysis: String,

    /// Option values, repeatable: -o key=value
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// List the analysis type's options instead of starting a run
    #[arg(long)]
    show_options: bool,
}

#[derive(clap::Args, Debug)]
struct ResultsArgs {
    /// Analysis display name under the selected snapshot
    analysis: String,

    /// Output (dataset) id; omit to list the available ids
    output: Option<String>,

    /// First result index
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Page size
    #[arg(long, default_value_t = 50)]
    count: u32,

    /// Only results about the application code
    #[arg(long)]
    app_only: bool,
}

#[derive(clap::Args, Debug)]
struct LookupArgs {
    /// Source file path, relative to the posted snapshot
    file: String,

    /// 1-based line number
    line: u32,
}

#[derive(clap::Args, Debug)]
struct PostArgs {
    /// Directory with the code to post (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Project to post into (defaults to the selected project, then to
    /// the directory name)
    #[arg(long)]
    name: Option<String>,
}

/// Prints presentation hints as plain terminal output.
struct TextObserver;

impl SyncObserver for TextObserver {
    fn select_path(&mut self, path: &[String]) {
        println!("  Current project: {}", path.join("/"));
    }

    fn notice(&mut self, message: &str) {
        eprintln!("  ! {message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Sync => sync().await,
        Command::Config(args) => configure(args),
        Command::Analyze(args) => analyze(args).await,
        Command::Results(args) => results(args).await,
        Command::Lookup(args) => lookup(args).await,
        Command::Post(args) => post(args).await,
        Command::Web => web(),
    }
}

fn remote(config: &Config) -> Result<HttpRemote> {
    HttpRemote::new(config.http_url(), config.token.clone())
}

/// Mirror the hierarchy and print it as an indented tree.
async fn sync() -> Result<()> {
    let mut session = Session::new(Config::load());
    let remote = remote(&session.config)?;

    let report = scry_engine::full_sync(&mut session, &remote, &mut TextObserver).await?;

    for project in session.tree.projects() {
        print_node(project, 0);
    }
    println!(
        "  {} projects, {} snapshots, {} analyses",
        report.projects, report.snapshots, report.analyses
    );
    if report.skipped > 0 {
        eprintln!("  ! {} branches could not be loaded", report.skipped);
    }
    Ok(())
}

fn print_node(node: &HierarchyNode, depth: usize) {
    println!("{}{}", "  ".repeat(depth + 1), node.label());
    for child in node.children() {
        print_node(child, depth + 1);
    }
}

fn configure(args: ConfigArgs) -> Result<()> {
    let mut config = Config::load();
    let updating = args.server.is_some()
        || args.user.is_some()
        || args.token.is_some()
        || args.project.is_some()
        || args.snapshot.is_some();

    if let Some(server) = args.server {
        config.server = server;
    }
    if let Some(user) = args.user {
        config.user = user;
    }
    if let Some(token) = args.token {
        config.token = token;
    }
    if let Some(project) = args.project {
        config.project_name = Some(project);
    }
    if let Some(snapshot) = args.snapshot {
        config.snapshot_name = Some(snapshot);
    }

    if updating {
        config.save().map_err(|e| anyhow::anyhow!(e))?;
        println!("  Saved {}", Config::config_location());
    } else {
        println!("  Config file: {}", Config::config_location());
        println!("  Server:  {}", config.server);
        println!("  User:    {}", config.user);
        println!(
            "  Token:   {}",
            if config.token.is_empty() { "(unset)" } else { "(set)" }
        );
        println!(
            "  Project: {}",
            config.project_name.as_deref().unwrap_or("(none)")
        );
        println!(
            "  Snapshot: {}",
            config.snapshot_name.as_deref().unwrap_or("(none)")
        );
    }
    Ok(())
}

/// Each one-shot invocation starts with an empty session, so commands
/// that need run metadata sync first to populate the registry.
async fn synced_session(remote: &HttpRemote) -> Result<Session> {
    let mut session = Session::new(Config::load());
    scry_engine::full_sync(&mut session, remote, &mut TextObserver).await?;
    Ok(session)
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = Config::load();
    let remote = remote(&config)?;
    let session = synced_session(&remote).await?;

    let mut form = scry_engine::analysis_form(&session, &args.analysis)?;
    for warning in &form.warnings {
        eprintln!("  ! {warning}");
    }

    if args.show_options {
        for field in &form.fields {
            println!("  {} ({})", field.id, field.name);
        }
        return Ok(());
    }

    for option in &args.options {
        let (key, value) = option
            .split_once('=')
            .with_context(|| format!("Option '{option}' is not of the form key=value"))?;
        if !form.apply_option(key, value) {
            anyhow::bail!("'{key}={value}' does not match any option of {}", args.analysis);
        }
    }

    scry_engine::start_analysis(&session, &remote, &args.analysis, &form).await?;
    println!("  Started {} on the selected snapshot.", args.analysis);
    Ok(())
}

async fn results(args: ResultsArgs) -> Result<()> {
    let config = Config::load();
    let remote = remote(&config)?;
    let session = synced_session(&remote).await?;

    let mut selection = session.selection();
    selection.analysis = Some(args.analysis.clone());

    let Some(output) = args.output else {
        return list_outputs(&session, &selection, &args.analysis);
    };

    let page = OutputPage {
        start: args.start,
        count: args.count,
        app_only: args.app_only,
    };
    let table = scry_engine::refresh_dataset(&session, &remote, &selection, &output, &page).await?;
    if table.columns.is_empty() {
        println!("  No results for output '{output}'.");
        return Ok(());
    }

    println!("  {}", table.columns.join(" | "));
    for row in &table.rows {
        println!("  {}", row.join(" | "));
    }
    println!("  ({} rows, starting at {})", table.rows.len(), args.start);
    Ok(())
}

fn list_outputs(session: &Session, selection: &Selection, analysis: &str) -> Result<()> {
    let (Some(project), Some(snapshot)) =
        (selection.project.as_deref(), selection.snapshot.as_deref())
    else {
        anyhow::bail!("Select a project and snapshot first (scry config --project --snapshot).");
    };
    let info = session.registry.lookup(project, snapshot, analysis);
    let profile = info
        .profile_id
        .with_context(|| format!("No known run of '{analysis}' on {project}/{snapshot}"))?;
    let descriptor = session
        .registry
        .descriptor(&profile)
        .with_context(|| format!("No profile info for profile: {profile}"))?;

    for id in scry_core::dataset::output_ids(descriptor) {
        println!("  {id}");
    }
    Ok(())
}

async fn lookup(args: LookupArgs) -> Result<()> {
    let config = Config::load();
    let remote = remote(&config)?;
    let session = synced_session(&remote).await?;

    let results = scry_engine::lookup_line(&session, &remote, &args.file, args.line).await?;
    if results.is_empty() {
        println!("  No results for {}:{}.", args.file, args.line);
        return Ok(());
    }
    for result in results {
        println!("  {} [{}] {}", result.symbol_id, result.kind, result.description);
    }
    Ok(())
}

async fn post(args: PostArgs) -> Result<()> {
    let config = Config::load();
    config.require_credentials()?;
    let remote = remote(&config)?;

    let path = args.path.canonicalize().with_context(|| {
        format!("Could not resolve project directory {}", args.path.display())
    })?;
    let name = args
        .name
        .or_else(|| config.project_name.clone())
        .or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .context("Could not infer a project name, pass --name")?;
    let archive = config
        .cli_bundle
        .clone()
        .or_else(scry_adapters::poster::default_bundle_path)
        .context("No bundled CLI tool found, set cli_bundle in the config")?;

    let mut session = Session::new(config);
    let report = scry_engine::post_snapshot(
        &mut session,
        &remote,
        &mut TextObserver,
        &archive,
        &path,
        &name,
    )
    .await?;
    println!(
        "  Posted {} to {}; {} snapshots now known.",
        path.display(),
        name,
        report.snapshots
    );
    Ok(())
}

fn web() -> Result<()> {
    let config = Config::load();
    config.require_credentials()?;
    println!("{}", config.web_path());
    Ok(())
}
