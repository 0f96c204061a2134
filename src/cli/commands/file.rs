//! File command implementation
//!
//! This module implements the `file` command for downloading plain-text
//! files that the config server serves alongside the environment document.

use super::ServerOverrides;
use crate::adapters::server::{ConfigServer, HttpConfigServer};
use crate::config::load_config_or_default;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the file command
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Connection and request overrides
    #[command(flatten)]
    pub overrides: ServerOverrides,

    /// Files to fetch from the config server
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Print file contents to stdout instead of writing them to disk
    #[arg(long)]
    pub print: bool,

    /// Directory to write fetched files into
    #[arg(long, default_value = ".")]
    pub output_dir: String,
}

impl FileArgs {
    /// Execute the file command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };
        self.overrides.apply(&mut config);

        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let client = match HttpConfigServer::new(config.server.clone(), config.request.clone()) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        for file_name in &self.files {
            let contents = match client.fetch_file(file_name).await {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::error!(file = %file_name, error = %e, "Fetching file failed");
                    eprintln!("Error: {e}");
                    return Ok(3);
                }
            };

            if self.print {
                println!("{}", String::from_utf8_lossy(&contents));
            } else {
                let target = target_path(&self.output_dir, file_name);
                if let Err(e) = write_file(&target, &contents).await {
                    eprintln!("Error: {e}");
                    return Ok(5);
                }
                println!("Wrote {}", target.display());
            }
        }

        Ok(0)
    }
}

/// Destination path for one fetched file
///
/// Only the file's base name is used, so a server-side path like
/// `nested/dir/app.properties` can't escape the output directory.
fn target_path(output_dir: &str, file_name: &str) -> PathBuf {
    let base_name = Path::new(file_name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(file_name));
    Path::new(output_dir).join(base_name)
}

async fn write_file(target: &Path, contents: &[u8]) -> crate::domain::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(target, contents).await?;
    Ok(())
}
