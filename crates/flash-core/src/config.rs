use crate::app_config::{AppConfig, Environment, KpiThresholds};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a non-negative number, got {raw}"),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("FLASH_ENV", "development"))?;
    let log_level = or_default("FLASH_LOG_LEVEL", "info");
    let data_path = PathBuf::from(or_default("FLASH_DATA_PATH", "./demo_data.csv"));
    let profile_path = PathBuf::from(or_default(
        "FLASH_PROFILE_PATH",
        "./config/monitoring.yaml",
    ));
    let default_reach = parse_u64("FLASH_DEFAULT_REACH", "1000")?;

    let negative_alert_pct = parse_f64("FLASH_NEGATIVE_ALERT_PCT", "30")?;
    if negative_alert_pct > 100.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FLASH_NEGATIVE_ALERT_PCT".to_string(),
            reason: format!("must be within 0..=100, got {negative_alert_pct}"),
        });
    }

    let thresholds = KpiThresholds {
        mis_good: parse_u64("FLASH_MIS_GOOD", "100")?,
        mpi_good: parse_f64("FLASH_MPI_GOOD", "30")?,
        engagement_good: parse_f64("FLASH_ENGAGEMENT_GOOD", "1000")?,
        reach_good: parse_u64("FLASH_REACH_GOOD", "10000000")?,
    };

    let alert_email = lookup("FLASH_ALERT_EMAIL")
        .ok()
        .filter(|v| !v.trim().is_empty());

    Ok(AppConfig {
        env,
        log_level,
        data_path,
        profile_path,
        default_reach,
        negative_alert_pct,
        thresholds,
        alert_email,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FLASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
