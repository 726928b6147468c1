use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// "Good if at least" thresholds used when grading the headline KPIs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiThresholds {
    pub mis_good: u64,
    pub mpi_good: f64,
    pub engagement_good: f64,
    pub reach_good: u64,
}

impl Default for KpiThresholds {
    fn default() -> Self {
        Self {
            mis_good: 100,
            mpi_good: 30.0,
            engagement_good: 1000.0,
            reach_good: 10_000_000,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_path: PathBuf,
    pub profile_path: PathBuf,
    pub default_reach: u64,
    pub negative_alert_pct: f64,
    pub thresholds: KpiThresholds,
    pub alert_email: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_path", &self.data_path)
            .field("profile_path", &self.profile_path)
            .field("default_reach", &self.default_reach)
            .field("negative_alert_pct", &self.negative_alert_pct)
            .field("thresholds", &self.thresholds)
            .field(
                "alert_email",
                &self.alert_email.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
