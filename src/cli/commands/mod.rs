//! Command implementations
//!
//! Each submodule implements one CLI command. The connection-related flags
//! are shared between the `env` and `file` commands via [`ServerOverrides`].

pub mod env;
pub mod file;
pub mod init;
pub mod validate;

use crate::config::{secret_string, CloudEnvConfig};
use clap::Args;

/// Connection and request flags that override the configuration file
#[derive(Args, Debug)]
pub struct ServerOverrides {
    /// Config server host
    #[arg(long)]
    pub host: Option<String>,

    /// Config server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Application name to request configuration for
    #[arg(short, long)]
    pub name: Option<String>,

    /// Profiles to request, comma-separated
    #[arg(short, long)]
    pub profiles: Option<String>,

    /// Branch or tag to read configuration from
    #[arg(short, long)]
    pub label: Option<String>,

    /// Username for basic authentication
    #[arg(long)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(long, env = "CLOUDENV_SERVER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl ServerOverrides {
    /// Applies the flags onto a loaded configuration
    pub fn apply(&self, config: &mut CloudEnvConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(name) = &self.name {
            config.request.name = name.clone();
        }
        if let Some(profiles) = &self.profiles {
            let profiles: Vec<String> = profiles
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            if !profiles.is_empty() {
                config.request.profiles = profiles;
            }
        }
        if let Some(label) = &self.label {
            config.request.label = label.clone();
        }
        if let Some(username) = &self.username {
            config.server.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            config.server.password = Some(secret_string(password.clone()));
        }
    }
}
