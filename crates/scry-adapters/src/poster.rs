//! Posting a code snapshot to the server via the bundled CLI tool.
//!
//! The CLI ships as a zip archive next to the scry binary (or wherever
//! `cli_bundle` points). It is extracted to a temp directory and invoked
//! against the project directory; its stdout is streamed line-by-line to
//! the caller.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Version-pinned top-level directory inside the bundled CLI archive.
const CLI_ID: &str = "cli-4.0.69";

/// Where the bundle lives when the config does not override it: next to
/// the running executable.
pub fn default_bundle_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(format!("{CLI_ID}.zip")))
}

/// The argument list the CLI is invoked with.
pub fn cli_args(project_dir: &Path, project_name: &str, config: &Config) -> Vec<String> {
    let endpoint = config.endpoint();
    vec![
        "--dir".into(),
        project_dir.display().to_string(),
        "--host".into(),
        endpoint.host,
        "--port".into(),
        endpoint.port.to_string(),
        "--server-base-path".into(),
        endpoint.base_path,
        "--user".into(),
        config.user.clone(),
        "--api-key".into(),
        config.token.clone(),
        "--project".into(),
        project_name.into(),
    ]
}

/// Extract the bundled CLI and post the code under `project_dir` as a
/// snapshot of `project_name`.
///
/// Blocks on subprocess I/O; run it off the async runtime. A non-zero
/// exit status is an error, not a silent "done".
pub fn post_with_cli(
    archive: &Path,
    project_dir: &Path,
    project_name: &str,
    config: &Config,
    mut on_line: impl FnMut(&str),
) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("Could not find bundled CLI tool at {}", archive.display()))?;
    let mut bundle = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read CLI bundle {}", archive.display()))?;

    // The temp dir must outlive the subprocess, hence the named binding.
    let extract_dir = tempfile::tempdir().context("Failed to create temp directory")?;
    bundle
        .extract(extract_dir.path())
        .context("Failed to extract CLI bundle")?;
    tracing::debug!(
        from = %archive.display(),
        to = %extract_dir.path().display(),
        "extracted bundled CLI"
    );

    let mut cli = extract_dir.path().join(CLI_ID).join("bin").join("cli");
    if cfg!(windows) {
        cli.set_extension("bat");
    }

    let mut child = Command::new(&cli)
        .args(cli_args(project_dir, project_name, config))
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run CLI {}", cli.display()))?;

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line.context("Failed to read CLI output")?;
            on_line(&line);
        }
    }

    let status = child.wait().context("Failed to wait for CLI")?;
    if !status.success() {
        anyhow::bail!("Snapshot CLI exited with {status}");
    }
    Ok(())
}
