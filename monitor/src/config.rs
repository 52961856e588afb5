use std::str::FromStr;
use std::time::Duration;

use corelib::{Quantity, TargetId};
use engine::DetectorConfig;
use engine::config::DEFAULT_THRESHOLD_MILLI_PERCENT;

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Ethereum JSON-RPC endpoint the balance is read from.
    pub rpc_url: String,

    /// Account whose native balance is monitored.
    ///
    /// Required: there is no sensible default target.
    pub target: TargetId,

    // =========================
    // Detection
    // =========================
    /// Threshold and noise guards. See [`DetectorConfig`].
    pub detector: DetectorConfig,

    // =========================
    // Sampling
    // =========================
    /// Delay between two snapshots.
    ///
    /// Defaults to 12s, one mainnet slot. Sampling faster than blocks are
    /// produced only compares a block with itself.
    pub poll_interval: Duration,

    /// Number of encoded snapshots kept in memory, newest first.
    /// Only the two newest are ever compared. Must be at least 2.
    pub history_len: usize,

    // =========================
    // Delivery
    // =========================
    /// Optional webhook that receives every alert as JSON, in addition to
    /// the log sink.
    pub webhook_url: Option<String>,

    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Unset keys fall back to
    /// defaults; set-but-invalid keys are errors.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = get("RPC_URL").unwrap_or_else(|| "http://127.0.0.1:8545".to_string());

        let target: TargetId = get("TARGET_ADDRESS")
            .ok_or(ConfigError::Missing("TARGET_ADDRESS"))
            .and_then(|v| parse("TARGET_ADDRESS", &v))?;

        let detector = DetectorConfig {
            threshold_milli_percent: parse_or(
                &get,
                "THRESHOLD_MILLI_PERCENT",
                DEFAULT_THRESHOLD_MILLI_PERCENT,
            )?,
            min_previous_quantity: parse_or(&get, "MIN_PREVIOUS_QUANTITY", Quantity::ZERO)?,
            min_absolute_diff: parse_or(&get, "MIN_ABSOLUTE_DIFF", Quantity::ZERO)?,
        };

        let poll_interval = Duration::from_millis(parse_or(&get, "POLL_INTERVAL_MS", 12_000u64)?);
        if poll_interval.is_zero() {
            return Err(invalid("POLL_INTERVAL_MS", "0", "must be positive"));
        }

        let history_len: usize = parse_or(&get, "HISTORY_LEN", 2)?;
        if history_len < 2 {
            return Err(invalid(
                "HISTORY_LEN",
                &history_len.to_string(),
                "at least two snapshots are needed for a comparison",
            ));
        }

        let webhook_url = get("WEBHOOK_URL").filter(|v| !v.trim().is_empty());
        let json_logs = get("APP_ENV").is_some_and(|v| v == "production");

        Ok(Self {
            rpc_url,
            target,
            detector,
            poll_interval,
            history_len,
            webhook_url,
            json_logs,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, raw, &e.to_string()))
}

fn parse_or<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => parse(key, &raw),
        None => Ok(default),
    }
}
