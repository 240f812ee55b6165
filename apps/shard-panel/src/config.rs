//! Panel configuration module
//!
//! Layers built-in defaults under `PANEL_*` environment variables (a `.env`
//! file is loaded first when present).

use crate::error::PanelError;
use crate::pagination::ListSpec;
use crate::poller::{ApplyOrder, RefreshSchedule, MAX_REFRESH_INTERVAL};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment};
use std::collections::BTreeSet;
use std::time::Duration;

/// Default backend resource for shard metadata
pub const DEFAULT_META_URL: &str = "http://127.0.0.1:8080/api/shard/meta";

/// Upper bound for any millisecond setting
const MAX_MILLIS: u64 = 24 * 60 * 60 * 1000;

/// Panel configuration
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Shard metadata resource
    pub meta_url: String,

    /// When refreshes are issued
    pub schedule: RefreshSchedule,

    /// How out-of-order responses are applied
    pub apply_order: ApplyOrder,

    /// Lists shown, in display order
    pub lists: Vec<ListSpec>,

    /// Per-request timeout for metadata reads
    pub request_timeout: Duration,

    /// Render surface / health / metrics HTTP port
    pub http_port: u16,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl PanelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, PanelError> {
        dotenvy::dotenv().ok();

        let settings = Self::defaults()?
            .add_source(Environment::with_prefix("PANEL"))
            .build()?;

        Self::from_settings(&settings)
    }

    /// Built-in defaults for every key
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, PanelError> {
        Ok(Config::builder()
            .set_default("meta_url", DEFAULT_META_URL)?
            .set_default("refresh", "periodic")?
            .set_default("refresh_interval_ms", 1000_i64)?
            .set_default("refresh_immediate", false)?
            .set_default("apply_order", "sequenced")?
            .set_default("lists", "files:10,fingerprints:50")?
            .set_default("request_timeout_ms", 5000_i64)?
            .set_default("http_port", 9090_i64)?
            .set_default("log_level", "info")?)
    }

    /// Read and validate a layered configuration
    pub fn from_settings(settings: &Config) -> Result<Self, PanelError> {
        let meta_url = settings.get_string("meta_url")?;
        if meta_url.trim().is_empty() {
            return Err(PanelError::Config("PANEL_META_URL must not be empty".to_string()));
        }

        let interval_ms = positive_millis(settings, "refresh_interval_ms", "PANEL_REFRESH_INTERVAL_MS")?;
        let immediate = settings.get_bool("refresh_immediate")?;

        let schedule = match settings.get_string("refresh")?.trim() {
            "periodic" => RefreshSchedule::Periodic {
                interval: Duration::from_millis(interval_ms),
                immediate,
            },
            "on-load" => RefreshSchedule::OnLoad,
            "manual" => RefreshSchedule::Manual,
            other => {
                return Err(PanelError::Config(format!(
                    "PANEL_REFRESH must be periodic, on-load or manual, got '{other}'"
                )))
            }
        };

        let apply_order = settings
            .get_string("apply_order")?
            .parse::<ApplyOrder>()
            .map_err(|other| {
                PanelError::Config(format!(
                    "PANEL_APPLY_ORDER must be sequenced or completion, got '{other}'"
                ))
            })?;

        let lists = parse_lists(&settings.get_string("lists")?)?;

        let request_timeout = Duration::from_millis(positive_millis(
            settings,
            "request_timeout_ms",
            "PANEL_REQUEST_TIMEOUT_MS",
        )?);

        let http_port = u16::try_from(settings.get_int("http_port")?)
            .map_err(|e| PanelError::Config(format!("PANEL_HTTP_PORT must be a valid port number: {e}")))?;

        let log_level = settings.get_string("log_level")?;

        Ok(Self {
            meta_url,
            schedule,
            apply_order,
            lists,
            request_timeout,
            http_port,
            log_level,
        })
    }
}

fn positive_millis(settings: &Config, key: &str, var: &str) -> Result<u64, PanelError> {
    let value = settings.get_int(key)?;
    u64::try_from(value)
        .ok()
        .filter(|ms| (1..=MAX_MILLIS).contains(ms))
        .ok_or_else(|| {
            PanelError::Config(format!(
                "{var} must be between 1 and {MAX_MILLIS} milliseconds, got {value}"
            ))
        })
}

/// Parse `files:10,fingerprints:50`; an empty string shows no lists
pub fn parse_lists(raw: &str) -> Result<Vec<ListSpec>, PanelError> {
    let mut seen = BTreeSet::new();
    let mut lists = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let spec = entry
            .parse::<ListSpec>()
            .map_err(|e| PanelError::Config(format!("PANEL_LISTS: {e}")))?;
        if !seen.insert(spec.kind) {
            return Err(PanelError::Config(format!(
                "PANEL_LISTS: list '{}' configured twice",
                spec.kind
            )));
        }
        lists.push(spec);
    }

    Ok(lists)
}
