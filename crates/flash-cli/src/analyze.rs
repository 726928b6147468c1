//! `analyze`, `keywords` and `classify` command handlers.

use anyhow::Context;
use chrono::Utc;
use flash_core::{AppConfig, Mention, MonitoringProfile};
use flash_engine::AnalysisRequest;

use crate::notify::Notifier;
use crate::{OutputFormat, SourceArgs};

/// Resolve the monitoring profile for a run.
///
/// Reads the profile file when it exists, otherwise starts from the default
/// profile, then applies the command-line overrides and validates the result.
///
/// # Errors
///
/// Returns an error if the profile file cannot be read or parsed, or if the
/// merged profile fails validation.
pub(crate) fn resolve_profile(
    config: &AppConfig,
    source: &SourceArgs,
) -> anyhow::Result<MonitoringProfile> {
    let path = source.profile.as_ref().unwrap_or(&config.profile_path);
    let mut profile = if path.exists() {
        flash_core::load_profile(path)?
    } else if source.profile.is_some() {
        anyhow::bail!("profile file {} not found", path.display());
    } else {
        tracing::debug!(path = %path.display(), "no profile file; using built-in default");
        MonitoringProfile::default()
    };

    if let Some(brand) = &source.brand {
        profile.brand.clone_from(brand);
    }
    if !source.competitors.is_empty() {
        profile.competitors.clone_from(&source.competitors);
    }
    if !source.campaigns.is_empty() {
        profile.campaign_messages.clone_from(&source.campaigns);
    }

    flash_core::validate_profile(&profile)?;
    Ok(profile)
}

/// Load the mention records named by `--data` or `FLASH_DATA_PATH`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub(crate) fn load_records(config: &AppConfig, source: &SourceArgs) -> anyhow::Result<Vec<Mention>> {
    let path = source.data.as_ref().unwrap_or(&config.data_path);
    flash_core::load_mentions(path, config.default_reach)
        .with_context(|| format!("failed to load mentions from {}", path.display()))
}

/// Run the engine and print the outcome, then evaluate the alert.
///
/// # Errors
///
/// Returns an error if the profile or the mentions cannot be loaded, or the
/// outcome cannot be serialized.
pub(crate) fn run_analyze(
    config: &AppConfig,
    source: &SourceArgs,
    format: OutputFormat,
    period: &str,
    notifier: &dyn Notifier,
) -> anyhow::Result<()> {
    let request = AnalysisRequest::from(resolve_profile(config, source)?);
    let mentions = load_records(config, source)?;
    let outcome = flash_engine::run_analysis(mentions, &request);
    let grades = flash_engine::grade(&outcome.kpis, &config.thresholds);

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "brand": request.brand,
                "period": period,
                "kpis": outcome.kpis,
                "grades": grades,
                "top_keywords": outcome.top_keywords,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Markdown => {
            print!(
                "{}",
                flash_engine::render_markdown(&outcome, &request, &grades, period, Utc::now())
            );
        }
    }

    if let Some(alert) =
        flash_engine::evaluate_alert(&outcome.kpis, &request.brand, config.negative_alert_pct)
    {
        notifier.notify(&alert, config.alert_email.as_deref());
    }

    Ok(())
}

/// Print the top keywords and phrases of the loaded mentions.
///
/// # Errors
///
/// Returns an error if the profile or the mentions cannot be loaded.
pub(crate) fn run_keywords(config: &AppConfig, source: &SourceArgs) -> anyhow::Result<()> {
    let request = AnalysisRequest::from(resolve_profile(config, source)?);
    let mentions = load_records(config, source)?;
    let keywords =
        flash_engine::corpus_keywords(mentions.iter().map(|m| m.text.as_str()), &request);

    if keywords.is_empty() {
        println!("no keywords identified in {} mentions", mentions.len());
        return Ok(());
    }

    println!("{:<40}FREQUENCY", "KEYWORD/PHRASE");
    for kw in &keywords {
        println!("{:<40}{}", kw.term, kw.frequency);
    }
    Ok(())
}

pub(crate) fn run_classify(text: &str) {
    let sentiment = flash_engine::classify_sentiment(text);
    let theme = flash_engine::classify_theme(text);
    println!("sentiment: {sentiment}");
    println!("theme:     {theme}");
}
