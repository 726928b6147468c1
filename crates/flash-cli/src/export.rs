//! `export` command: enriched mentions as CSV.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use flash_core::{AppConfig, RawCount};
use flash_engine::{AnalysisRequest, AnalyzedMention};

use crate::analyze::{load_records, resolve_profile};
use crate::SourceArgs;

pub(crate) const EXPORT_HEADERS: [&str; 9] = [
    "Date",
    "Sentiment",
    "Theme",
    "Source",
    "Mention Text",
    "Link",
    "Likes",
    "Comments",
    "Reach",
];

fn raw_cell(raw: Option<&RawCount>) -> String {
    raw.map(ToString::to_string).unwrap_or_default()
}

/// Write one header row and one row per enriched mention.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub(crate) fn write_mentions_csv<W: Write>(
    writer: W,
    analyzed: &[AnalyzedMention],
) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADERS)?;
    for item in analyzed {
        let m = &item.mention;
        let likes = raw_cell(m.likes.as_ref());
        let comments = raw_cell(m.comments.as_ref());
        let reach = raw_cell(m.reach.as_ref());
        csv.write_record([
            m.date.as_str(),
            item.sentiment.as_str(),
            item.theme.as_str(),
            m.source.as_str(),
            m.text.as_str(),
            m.link.as_deref().unwrap_or_default(),
            likes.as_str(),
            comments.as_str(),
            reach.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Analyze the mentions and export them to `out`.
///
/// # Errors
///
/// Returns an error if loading fails or `out` cannot be written.
pub(crate) fn run_export(config: &AppConfig, source: &SourceArgs, out: &Path) -> anyhow::Result<()> {
    let request = AnalysisRequest::from(resolve_profile(config, source)?);
    let mentions = load_records(config, source)?;
    let summary = flash_engine::compute_kpis(mentions, &request);

    let file = std::fs::File::create(out)
        .with_context(|| format!("failed to create {}", out.display()))?;
    write_mentions_csv(file, &summary.analyzed)?;

    tracing::info!(path = %out.display(), rows = summary.analyzed.len(), "exported mentions");
    println!("wrote {} mentions to {}", summary.analyzed.len(), out.display());
    Ok(())
}
