use clap::{Parser, builder::BoolishValueParser};
use monumenten_core::vocab::KADASTER_SPARQL_ENDPOINT;
use std::error::Error;
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;
use tracing::Level;

const DEFAULT_SERVER_NAME: &str = "Monumenten MCP";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(
    name = "monumenten-mcpd",
    version,
    about = "MCP server for Dutch verblijfsobject and monument status lookups."
)]
struct CliArgs {
    /// Display name reported to MCP clients.
    #[arg(long, env = "MONUMENTEN_SERVER_NAME", default_value = DEFAULT_SERVER_NAME)]
    name: String,

    /// Serve streamable HTTP instead of stdio.
    #[arg(
        long,
        env = "MONUMENTEN_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http: bool,

    /// Host name or IP address for the HTTP listener.
    #[arg(long, env = "MONUMENTEN_HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, env = "MONUMENTEN_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Disable MCP session tracking on the HTTP transport.
    #[arg(
        long,
        env = "MONUMENTEN_STATELESS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    stateless: bool,

    #[arg(long, env = "MCP_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[arg(long, env = "MONUMENTEN_SPARQL_ENDPOINT", default_value = KADASTER_SPARQL_ENDPOINT)]
    sparql_endpoint: String,

    #[arg(
        long,
        env = "MONUMENTEN_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,
}

/// MCP transport the daemon serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("streamable-http"),
        }
    }
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct MonumentenConfig {
    pub name: String,
    pub transport: Transport,
    pub http_addr: SocketAddr,
    pub stateless: bool,
    pub log_level: Level,
    pub sparql_endpoint: String,
    pub request_timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl MonumentenConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for MonumentenConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let name = args.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::MissingSetting("MONUMENTEN_SERVER_NAME"));
        }

        let sparql_endpoint = args.sparql_endpoint.trim().to_string();
        if !(sparql_endpoint.starts_with("http://") || sparql_endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidSetting {
                name: "MONUMENTEN_SPARQL_ENDPOINT",
                value: args.sparql_endpoint,
            });
        }

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "MONUMENTEN_REQUEST_TIMEOUT_SECS",
                value: args.request_timeout_secs.to_string(),
            });
        }

        let log_level = parse_log_level(&args.log_level).ok_or(ConfigError::InvalidSetting {
            name: "MCP_LOG_LEVEL",
            value: args.log_level,
        })?;

        let http_addr = resolve_http_addr(&args.host, args.port).ok_or(
            ConfigError::InvalidSetting {
                name: "MONUMENTEN_HOST",
                value: args.host,
            },
        )?;

        Ok(Self {
            name,
            transport: if args.http {
                Transport::Http
            } else {
                Transport::Stdio
            },
            http_addr,
            stateless: args.stateless,
            log_level,
            sparql_endpoint,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }
}

/// First address the host name resolves to, IPv4 preferred.
fn resolve_http_addr(host: &str, port: u16) -> Option<SocketAddr> {
    let addrs: Vec<SocketAddr> = (host.trim(), port).to_socket_addrs().ok()?.collect();
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

/// Accepts the usual level names plus `warning` and `critical`.
fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" | "critical" => Some(Level::ERROR),
        _ => None,
    }
}
