use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use doctext_core::config_file::ConfigFile;

pub const DEFAULT_BIND: &str = "0.0.0.0:5002";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 200;

/// Resolved server settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub max_upload_bytes: usize,
    pub temp_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings: env vars > config file > defaults.
    ///
    /// `env` looks up a variable by name; `main` passes `std::env::var`.
    pub fn resolve(file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_str = env("DOCTEXT_BIND")
            .or_else(|| file.bind().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .with_context(|| format!("invalid listen address {bind_str:?}"))?;

        let max_upload_mb = match env("DOCTEXT_MAX_UPLOAD_MB") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DOCTEXT_MAX_UPLOAD_MB is not a number: {v:?}"))?,
            None => file.max_upload_mb().unwrap_or(DEFAULT_MAX_UPLOAD_MB),
        };

        let temp_dir = env("DOCTEXT_TEMP_DIR")
            .map(PathBuf::from)
            .or_else(|| file.temp_dir());

        Ok(Self {
            bind,
            max_upload_bytes: (max_upload_mb as usize).saturating_mul(1024 * 1024),
            temp_dir,
        })
    }
}
