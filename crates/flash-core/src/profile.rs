use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Who is being monitored: the brand, its competitors, and the campaign
/// messages whose penetration is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringProfile {
    pub brand: String,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub campaign_messages: Vec<String>,
    /// Additional words to drop from keyword extraction.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

/// Market names that dominate keyword rankings without being tracked brands.
const DEFAULT_EXTRA_STOPWORDS: &[&str] = &["zenith", "access", "gtco", "first", "cbn"];

impl Default for MonitoringProfile {
    fn default() -> Self {
        Self {
            brand: "Zenith Bank".to_string(),
            competitors: vec![
                "Fidelity Bank".to_string(),
                "GT Bank".to_string(),
                "Opay".to_string(),
            ],
            campaign_messages: vec!["Zecathon".to_string(), "Zecathon 5.0".to_string()],
            extra_stopwords: DEFAULT_EXTRA_STOPWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Load and validate a monitoring profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<MonitoringProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_profile(&content)
}

/// Parse and validate a monitoring profile from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_profile(content: &str) -> Result<MonitoringProfile, ConfigError> {
    let profile: MonitoringProfile =
        serde_yaml::from_str(content).map_err(ConfigError::ProfileFileParse)?;

    validate_profile(&profile)?;

    Ok(profile)
}

/// Check a profile built from YAML or from command-line overrides.
///
/// # Errors
///
/// Returns `ConfigError::Validation` describing the first problem found.
pub fn validate_profile(profile: &MonitoringProfile) -> Result<(), ConfigError> {
    if profile.brand.trim().is_empty() {
        return Err(ConfigError::Validation(
            "brand name must be non-empty".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    seen_names.insert(profile.brand.trim().to_lowercase());

    for competitor in &profile.competitors {
        if competitor.trim().is_empty() {
            return Err(ConfigError::Validation(
                "competitor names must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(competitor.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand or competitor name: '{competitor}'"
            )));
        }
    }

    if profile.campaign_messages.iter().any(|m| m.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "campaign messages must be non-blank".to_string(),
        ));
    }

    Ok(())
}
