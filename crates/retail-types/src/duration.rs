//! Duration parsing utilities.

use crate::config::ConfigError;
use std::time::Duration;

/// Parse a duration string like "1h", "30m", "60s", "500ms" or "60".
/// Supports:
/// - Plain numbers (interpreted as seconds): "60"
/// - Milliseconds suffix: "500ms"
/// - Seconds suffix: "60s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConfigError::InvalidDuration(s.to_string()));
    }

    let invalid = || ConfigError::InvalidDuration(s.to_string());

    // "ms" must be checked before "m" and "s"
    if let Some(num_str) = s.strip_suffix("ms") {
        let millis: u64 = num_str.trim().parse().map_err(|_| invalid())?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(num_str) = s.strip_suffix('h') {
        let hours: u64 = num_str.trim().parse().map_err(|_| invalid())?;
        let secs = hours.checked_mul(3600).ok_or_else(invalid)?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(num_str) = s.strip_suffix('m') {
        let minutes: u64 = num_str.trim().parse().map_err(|_| invalid())?;
        let secs = minutes.checked_mul(60).ok_or_else(invalid)?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(num_str) = s.strip_suffix('s') {
        let secs: u64 = num_str.trim().parse().map_err(|_| invalid())?;
        return Ok(Duration::from_secs(secs));
    }

    // No suffix - treat as seconds
    s.parse::<u64>().map(Duration::from_secs).map_err(|_| invalid())
}
