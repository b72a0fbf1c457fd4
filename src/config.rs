//! Server configuration.
//!
//! Values come from built-in defaults, then an optional YAML file named by
//! `SERVER_CONFIG`, then individual `SERVER_*` environment overrides.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const CONFIG_FILE_VAR: &str = "SERVER_CONFIG";
pub const HOST_VAR: &str = "SERVER_HOST";
pub const PORT_VAR: &str = "SERVER_PORT";
pub const WEB_ROOT_VAR: &str = "SERVER_WEB_ROOT";
pub const MAX_REQUEST_BYTES_VAR: &str = "SERVER_MAX_REQUEST_BYTES";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_web_root")]
    pub web_root: PathBuf,
    /// Upper bound on buffered request bytes; anything past it is dropped.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8008
}

fn default_web_root() -> PathBuf {
    PathBuf::from("www")
}

fn default_max_request_bytes() -> usize {
    8192
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_root: default_web_root(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = lookup(HOST_VAR) {
            cfg.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            cfg.port = port
                .parse()
                .with_context(|| format!("invalid {PORT_VAR} value {port:?}"))?;
        }
        if let Some(root) = lookup(WEB_ROOT_VAR) {
            cfg.web_root = PathBuf::from(root);
        }
        if let Some(max) = lookup(MAX_REQUEST_BYTES_VAR) {
            cfg.max_request_bytes = max
                .parse()
                .with_context(|| format!("invalid {MAX_REQUEST_BYTES_VAR} value {max:?}"))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    /// The IPv4 socket address the listener binds to.
    pub fn listen_addr(&self) -> Result<SocketAddrV4> {
        let ip: Ipv4Addr = self
            .host
            .parse()
            .with_context(|| format!("host {:?} is not an IPv4 address", self.host))?;
        Ok(SocketAddrV4::new(ip, self.port))
    }

    fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.max_request_bytes == 0 {
            bail!("max_request_bytes must be greater than zero");
        }
        Ok(())
    }
}
