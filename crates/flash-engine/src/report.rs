//! Markdown rendering of an analysis outcome.
//!
//! Read-only: nothing here changes the summary or the enriched records.

use chrono::{DateTime, Utc};

use crate::alert::KpiGrades;
use crate::types::{AnalysisOutcome, AnalysisRequest, AnalyzedMention, Sentiment};

/// Entries listed per mention section.
const MENTIONS_PER_SECTION: usize = 10;

/// Enriched mentions split by which tracked names they contain.
#[derive(Debug, Default)]
pub struct MentionSections<'a> {
    /// The brand and no competitor.
    pub brand_only: Vec<&'a AnalyzedMention>,
    /// At least one competitor and not the brand.
    pub competitor_only: Vec<&'a AnalyzedMention>,
    /// Both, or neither.
    pub related: Vec<&'a AnalyzedMention>,
}

#[must_use]
pub fn categorize_mentions<'a>(
    analyzed: &'a [AnalyzedMention],
    request: &AnalysisRequest,
) -> MentionSections<'a> {
    let brand = request.brand.to_lowercase();
    let competitors: Vec<String> = request
        .competitors
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut sections = MentionSections::default();
    for item in analyzed {
        let mentioned: Vec<String> = item
            .mentioned_brands
            .iter()
            .map(|b| b.to_lowercase())
            .collect();
        let has_brand = mentioned.contains(&brand);
        let has_competitor = mentioned.iter().any(|m| competitors.contains(m));

        match (has_brand, has_competitor) {
            (true, false) => sections.brand_only.push(item),
            (false, true) => sections.competitor_only.push(item),
            _ => sections.related.push(item),
        }
    }
    sections
}

fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn capitalize(label: Sentiment) -> String {
    let s = label.as_str();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn mention_section(lines: &mut Vec<String>, title: &str, mentions: &[&AnalyzedMention]) {
    lines.push(String::new());
    lines.push(format!("### {title}"));
    if mentions.is_empty() {
        lines.push("_No mentions._".to_string());
        return;
    }
    lines.push("| Source | Sentiment | Theme | Mention | Link |".to_string());
    lines.push("|---|---|---|---|---|".to_string());
    for item in mentions.iter().take(MENTIONS_PER_SECTION) {
        let text: String = item.mention.text.chars().take(150).collect();
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            escape_cell(&item.mention.source),
            item.sentiment,
            item.theme,
            escape_cell(&text),
            item.mention.link.as_deref().unwrap_or("-"),
        ));
    }
    if mentions.len() > MENTIONS_PER_SECTION {
        lines.push(format!(
            "_…and {} more._",
            mentions.len() - MENTIONS_PER_SECTION
        ));
    }
}

/// Render the report body used for downloads and email.
#[must_use]
pub fn render_markdown(
    outcome: &AnalysisOutcome,
    request: &AnalysisRequest,
    grades: &KpiGrades,
    period: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let kpis = &outcome.kpis;
    let mut lines = vec![
        format!("# Flash Narrative Report: {}", request.brand),
        String::new(),
        format!("**Period:** {period}"),
        format!(
            "**Generated:** {}",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        format!("**Mentions analyzed:** {}", kpis.analyzed.len()),
        String::new(),
        "## Key Performance Indicators".to_string(),
        String::new(),
        format!("- **Media Impact Score (MIS):** {} ({})", kpis.mis, grades.mis),
        format!(
            "- **Message Penetration (MPI):** {:.1}% ({})",
            kpis.mpi, grades.mpi
        ),
        format!(
            "- **Avg. Social Engagement:** {:.1} ({})",
            kpis.engagement_rate, grades.engagement
        ),
        format!(
            "- **Total Reach:** {} ({})",
            thousands(kpis.reach),
            grades.reach
        ),
    ];

    let sentiment_line = kpis
        .sentiment_ratio
        .iter()
        .map(|(label, pct)| format!("{}: {pct:.1}%", capitalize(*label)))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("- **Sentiment Ratio:** {sentiment_line}"));

    lines.push(String::new());
    lines.push("### Share of Voice (SOV)".to_string());
    lines.push("| Brand | SOV (%) |".to_string());
    lines.push("|---|---|".to_string());
    for (idx, brand) in kpis.all_brands.iter().enumerate() {
        let sov = kpis.sov.get(idx).copied().unwrap_or(0.0);
        lines.push(format!("| {} | {sov:.1} |", escape_cell(brand)));
    }

    lines.push(String::new());
    lines.push("### Themes".to_string());
    for (theme, pct) in &kpis.theme_ratio {
        lines.push(format!("- {theme}: {pct:.1}%"));
    }

    lines.push(String::new());
    lines.push("### Top Keywords & Phrases".to_string());
    if outcome.top_keywords.is_empty() {
        lines.push("_No keywords identified._".to_string());
    } else {
        lines.push("| Keyword/Phrase | Frequency |".to_string());
        lines.push("|---|---|".to_string());
        for kw in &outcome.top_keywords {
            lines.push(format!("| {} | {} |", kw.term, kw.frequency));
        }
    }

    let sections = categorize_mentions(&kpis.analyzed, request);
    mention_section(
        &mut lines,
        &format!("{} News Mentions", request.brand),
        &sections.brand_only,
    );
    mention_section(&mut lines, "Competition News Mentions", &sections.competitor_only);
    mention_section(
        &mut lines,
        "Related News / Passive Mentions",
        &sections.related,
    );

    let mut md = lines.join("\n");
    md.push('\n');
    md
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use flash_core::{KpiThresholds, Mention};

    use super::*;
    use crate::alert::grade;
    use crate::pipeline::run_analysis;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(
            "Zenith",
            vec!["Opay".to_string(), "Fidelity".to_string()],
            vec!["Zecathon".to_string()],
        )
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn categorizes_by_mentioned_brands() {
        let mentions = vec![
            Mention::new("Zenith only", "d", "Punch"),
            Mention::new("Opay only", "d", "Punch"),
            Mention::new("Zenith versus Fidelity", "d", "Punch"),
            Mention::new("nobody at all", "d", "Punch"),
        ];
        let outcome = run_analysis(mentions, &request());
        let sections = categorize_mentions(&outcome.kpis.analyzed, &request());
        assert_eq!(sections.brand_only.len(), 1);
        assert_eq!(sections.competitor_only.len(), 1);
        assert_eq!(sections.related.len(), 2);
    }

    #[test]
    fn renders_headline_sections() {
        let mut mention = Mention::new("Zenith Zecathon is great", "d", "twitter");
        mention.link = Some("https://example.com/a".to_string());
        let outcome = run_analysis(vec![mention], &request());
        let grades = grade(&outcome.kpis, &KpiThresholds::default());
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

        let md = render_markdown(&outcome, &request(), &grades, "Last 30 days", generated_at);

        assert!(md.starts_with("# Flash Narrative Report: Zenith\n"));
        assert!(md.contains("**Generated:** 2024-05-01 09:30 UTC"));
        assert!(md.contains("- **Message Penetration (MPI):** 100.0% (good)"));
        assert!(md.contains("- **Sentiment Ratio:** Positive: 100.0%"));
        assert!(md.contains("| Zenith | 100.0 |"));
        assert!(md.contains("| Opay | 0.0 |"));
        assert!(md.contains("### Zenith News Mentions"));
        assert!(md.contains("https://example.com/a"));
    }
}
