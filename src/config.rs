//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Numeric settings fall back to their
//! defaults when unset or unparseable; the listen address and the CORS
//! origin list must parse when set.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;

/// Origins allowed by CORS when `ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Browser origins allowed to call the HTTP endpoints.
    pub allowed_origins: Vec<HeaderValue>,

    /// Upper bound on a single write to a client, both when queuing a
    /// broadcast frame and when flushing it to the socket.
    pub write_timeout: Duration,

    /// Number of frames a client may have queued before writes block.
    pub outbound_queue_capacity: usize,

    /// Maximum accepted command length in bytes.
    pub max_command_len: usize,

    /// Upper bound on handling one HTTP request.
    pub request_timeout: Duration,

    /// Tracing output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS).unwrap_or_default(),
            write_timeout: Duration::from_millis(5_000),
            outbound_queue_capacity: 64,
            max_command_len: 4_096,
            request_timeout: Duration::from_secs(30),
            log_format: LogFormat::Text,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`RelayConfig::default`] values when a variable is not
    /// set. Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`] or an entry of `ALLOWED_ORIGINS` is not a valid
    /// header value.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let allowed_origins = match std::env::var("ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw)?,
            Err(_) => defaults.allowed_origins,
        };

        let write_timeout = Duration::from_millis(parse_env(
            "WRITE_TIMEOUT_MS",
            duration_millis(defaults.write_timeout),
        ));
        let outbound_queue_capacity =
            parse_env("OUTBOUND_QUEUE_CAPACITY", defaults.outbound_queue_capacity).max(1);
        let max_command_len = parse_env("MAX_COMMAND_LEN", defaults.max_command_len);
        let request_timeout = Duration::from_secs(parse_env(
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        ));
        let log_format = std::env::var("LOG_FORMAT")
            .ok()
            .map_or(defaults.log_format, |raw| parse_log_format(&raw));

        Ok(Self {
            listen_addr,
            allowed_origins,
            write_timeout,
            outbound_queue_capacity,
            max_command_len,
            request_timeout,
            log_format,
        })
    }
}

/// Splits a comma-separated origin list, skipping blank entries.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] if an origin contains characters that are
/// not allowed in a header value.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

/// Maps `"json"` (case-insensitive) to [`LogFormat::Json`]; anything else
/// is text.
#[must_use]
pub fn parse_log_format(raw: &str) -> LogFormat {
    if raw.trim().eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
