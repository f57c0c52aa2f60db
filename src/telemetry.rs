use serde::Deserialize;
use std::cmp::Ordering;

use crate::config::SiteConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

/// Builds the one-line JSON record for an event, or `None` when `level` is
/// below the configured threshold.
pub fn format_event(
    config: &SiteConfig,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> Option<String> {
    if level < config.log_level {
        return None;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::from(now_unix_millis()),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Some(serde_json::Value::Object(payload).to_string())
}

pub fn log_event(config: &SiteConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    let Some(line) = format_event(config, level, event, fields) else {
        return;
    };

    emit(level, line);
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: String) {
    match level {
        LogLevel::Debug => gloo::console::debug!(line),
        LogLevel::Info => gloo::console::info!(line),
        LogLevel::Warn => gloo::console::warn!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: String) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_below_threshold_are_dropped() {
        let config = SiteConfig::default();

        assert!(format_event(&config, LogLevel::Debug, "noise", json!({})).is_none());
        assert!(format_event(&config, LogLevel::Warn, "loud", json!({})).is_some());
    }

    #[test]
    fn event_record_merges_extra_fields() {
        let config = SiteConfig {
            log_level: LogLevel::Debug,
            ..SiteConfig::default()
        };

        let line = format_event(
            &config,
            LogLevel::Info,
            "loader_hidden",
            json!({ "trigger": "fallback" }),
        )
        .expect("info passes a debug threshold");
        let record: serde_json::Value = serde_json::from_str(&line).expect("record is JSON");

        assert_eq!(record["level"], "info");
        assert_eq!(record["event"], "loader_hidden");
        assert_eq!(record["trigger"], "fallback");
        assert!(record["ts"].is_u64());
    }
}
