//! Configuration management for scry
//!
//! Stores settings in ~/.config/scry/config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// The default server to use.
pub const DEFAULT_SERVER: &str = "localhost:8080";

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

/// Server connection settings plus the remembered tree selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default)]
    pub user: String,
    /// API key / password; carried as an opaque token.
    #[serde(default)]
    pub token: String,
    /// Project currently selected in the mirrored tree, if any.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Snapshot currently selected in the mirrored tree, if any.
    #[serde(default)]
    pub snapshot_name: Option<String>,
    /// Override for the bundled snapshot-poster CLI archive.
    #[serde(default)]
    pub cli_bundle: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            user: String::new(),
            token: String::new(),
            project_name: None,
            snapshot_name: None,
            cli_bundle: None,
        }
    }
}

/// The (host, port, base path) split of a server address, as the poster
/// CLI wants it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub base_path: String,
}

impl Config {
    fn sanitize(&mut self) {
        self.server = self.server.trim().to_string();
        self.user = self.user.trim().to_string();
        self.token = self.token.trim().to_string();
        if self.server.is_empty() {
            self.server = default_server();
        }
    }

    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scry"))
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from disk, or return default
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(content) = fs::read_to_string(&path) {
                match serde_json::from_str::<Config>(&content) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(err) => {
                        preserve_corrupt_config(&path, &content);
                        tracing::warn!(
                            %err,
                            "config file was corrupted; a backup was saved and defaults loaded"
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), String> {
        let mut sanitized = self.clone();
        sanitized.sanitize();
        let dir =
            Self::config_dir().ok_or_else(|| "Could not determine config directory".to_string())?;

        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config directory: {}", e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!(%e, "failed to set config directory permissions");
            }
        }

        let path = dir.join("config.json");
        let content = serde_json::to_string_pretty(&sanitized)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        #[cfg(unix)]
        {
            write_config_atomic(&path, &content)
                .map_err(|e| format!("Failed to write config: {}", e))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&path, content).map_err(|e| format!("Failed to write config: {}", e))?;
        }

        Ok(())
    }

    /// Get the config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/scry/config.json".to_string())
    }

    /// Check that everything a sync needs is present. Each missing piece
    /// gets its own message so the user knows what to fix.
    pub fn require_credentials(&self) -> anyhow::Result<()> {
        if self.user.is_empty() {
            anyhow::bail!("No user found, run `scry config --user <name>` to fix this.");
        }
        if self.token.is_empty() {
            anyhow::bail!("No API key / password found, run `scry config --token <key>` to fix this.");
        }
        if self.server.is_empty() {
            anyhow::bail!("No server configured, run `scry config --server <addr>` to fix this.");
        }
        Ok(())
    }

    fn scheme_and_rest(&self) -> (&str, &str) {
        if let Some(rest) = self.server.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = self.server.strip_prefix("http://") {
            ("http", rest)
        } else {
            ("http", self.server.as_str())
        }
    }

    /// Base URL for API calls, scheme included, no trailing slash.
    pub fn http_url(&self) -> String {
        let (scheme, rest) = self.scheme_and_rest();
        format!("{}://{}", scheme, rest.trim_end_matches('/'))
    }

    /// Split the server address into host, port and base path.
    pub fn endpoint(&self) -> Endpoint {
        let (scheme, rest) = self.scheme_and_rest();
        let (authority, base_path) = match rest.find('/') {
            Some(i) => (&rest[..i], rest[i..].trim_end_matches('/')),
            None => (rest, ""),
        };
        let default_port = if scheme == "https" { 443 } else { 80 };
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse().unwrap_or(default_port)),
            None => (authority, default_port),
        };
        Endpoint {
            host: host.to_string(),
            port,
            base_path: if base_path.is_empty() {
                "/".to_string()
            } else {
                base_path.to_string()
            },
        }
    }

    /// Returns a URL that can be opened in a Web browser to land the user
    /// at an appropriate location in the Web UI.
    pub fn web_path(&self) -> String {
        let (scheme, rest) = self.scheme_and_rest();
        let mut path = format!("{}://{}", scheme, rest.trim_end_matches('/'));
        if !self.user.is_empty() {
            path.push_str(&format!("/#/u/{}", self.user));
            if let Some(project) = &self.project_name {
                path.push_str(&format!("/projects/{}", project));
                if let Some(snapshot) = &self.snapshot_name {
                    path.push_str(&format!("/snapshots/{}", snapshot));
                }
            }
        }
        path
    }
}

fn preserve_corrupt_config(path: &std::path::Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

#[cfg(unix)]
fn write_config_atomic(path: &std::path::Path, content: &str) -> Result<(), String> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::PermissionsExt;

    let tmp_path = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .map_err(|e| e.to_string())?;

    if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
        tracing::warn!(%e, "failed to set temp config file permissions");
    }

    file.write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.to_string());
    }
    Ok(())
}
