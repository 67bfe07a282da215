use chrono::NaiveDate;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("HNINTEL_LOG_LEVEL", "info");
    let snapshot_path = PathBuf::from(or_default("HNINTEL_SNAPSHOT_PATH", "./data/snapshot.json"));
    let max_features = parse_usize("HNINTEL_MAX_FEATURES", "500")?;
    let top_n = parse_usize("HNINTEL_TOP_N", "20")?;

    let threshold_raw = or_default("HNINTEL_SIMILARITY_THRESHOLD", "0.3");
    let similarity_threshold = parse_similarity_threshold(&threshold_raw)
        .map_err(|reason| invalid("HNINTEL_SIMILARITY_THRESHOLD", reason))?;

    let output_dir = lookup("HNINTEL_OUTPUT_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let reference_date = match lookup("HNINTEL_REFERENCE_DATE") {
        Ok(raw) if !raw.trim().is_empty() => Some(
            parse_reference_date(&raw).map_err(|reason| invalid("HNINTEL_REFERENCE_DATE", reason))?,
        ),
        _ => None,
    };

    Ok(AppConfig {
        log_level,
        snapshot_path,
        max_features,
        top_n,
        similarity_threshold,
        output_dir,
        reference_date,
    })
}

/// Parse a cosine-similarity threshold, which must lie in `[0.0, 1.0]`.
///
/// # Errors
///
/// Returns a human-readable reason when the value is not a number or is out of range.
pub fn parse_similarity_threshold(raw: &str) -> Result<f64, String> {
    let value = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is outside [0.0, 1.0]"));
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a human-readable reason when the value is not a calendar date.
pub fn parse_reference_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
