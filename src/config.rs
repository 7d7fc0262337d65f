use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Token presented to the inverter bridge, both as a `token` query
/// parameter and as a bearer header.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig { pub token: String }

/// Which reading source the dashboard is wired to. Picked once at
/// startup, never swapped afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Poll the inverter bridge over HTTP.
    Http,
    /// Serve an editable in-memory reading (bench / demo setups).
    Test,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub mode: SourceMode,
    pub base_url: String,
    pub http_timeout_seconds: u64,
    pub poll_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("EFD__").split("__"));
        Ok(figment.extract()?)
    }
}
