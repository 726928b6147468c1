//! KPI aggregation over an annotated record set.
//!
//! Numeric record fields go through [`flash_core::coerce_count`]; a field that
//! cannot be coerced is downgraded, never propagated as an error.

use std::collections::BTreeMap;

use flash_core::coerce_count;

use crate::types::{AnalysisRequest, AnalyzedMention, KpiSummary, Sentiment, Theme};

/// Source markers that identify social-platform records.
pub const SOCIAL_SOURCES: &[&str] = &["reddit.com", "fb", "ig", "threads", "twitter", "x"];

/// Authority assumed for records that carry none.
pub const DEFAULT_AUTHORITY: u64 = 5;

/// Running per-label and per-brand counters filled during the per-record pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub records: usize,
    pub sentiments: BTreeMap<Sentiment, usize>,
    pub themes: BTreeMap<Theme, usize>,
    /// Mention counts aligned with `[brand] + competitors`.
    pub brand_mentions: Vec<usize>,
}

impl Tally {
    #[must_use]
    pub fn new(brand_count: usize) -> Self {
        Self {
            brand_mentions: vec![0; brand_count],
            ..Self::default()
        }
    }

    /// Fold one annotated record into the counters.
    pub fn record(&mut self, sentiment: Sentiment, theme: Theme, brand_indices: &[usize]) {
        self.records += 1;
        *self.sentiments.entry(sentiment).or_default() += 1;
        *self.themes.entry(theme).or_default() += 1;
        for &idx in brand_indices {
            if let Some(count) = self.brand_mentions.get_mut(idx) {
                *count += 1;
            }
        }
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn ratio_map<K: Ord + Copy>(counts: &BTreeMap<K, usize>, total: usize) -> BTreeMap<K, f64> {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(&label, &count)| (label, percentage(count, total)))
        .collect()
}

/// Share of voice per brand; all zeros when no brand was mentioned anywhere.
#[must_use]
pub fn share_of_voice(brand_mentions: &[usize]) -> Vec<f64> {
    let total: usize = brand_mentions.iter().sum();
    brand_mentions
        .iter()
        .map(|&count| percentage(count, total))
        .collect()
}

/// Summed authority of `positive` and `appreciation` records.
#[must_use]
pub fn media_impact_score(analyzed: &[AnalyzedMention]) -> u64 {
    analyzed
        .iter()
        .filter(|a| a.sentiment.is_favorable())
        .map(|a| {
            coerce_count(a.mention.authority.as_ref(), DEFAULT_AUTHORITY).unwrap_or_else(|| {
                tracing::debug!(source = %a.mention.source, "unparseable authority treated as 0");
                0
            })
        })
        .fold(0_u64, u64::saturating_add)
}

/// Percent of records whose text contains any campaign message.
///
/// Blank messages are ignored; with no usable message the index is 0.
#[must_use]
pub fn message_penetration(analyzed: &[AnalyzedMention], campaign_messages: &[String]) -> f64 {
    let messages: Vec<String> = campaign_messages
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();
    if messages.is_empty() {
        return 0.0;
    }

    let matches = analyzed
        .iter()
        .filter(|a| {
            let text = a.mention.text.to_lowercase();
            messages.iter().any(|m| text.contains(m.as_str()))
        })
        .count();
    percentage(matches, analyzed.len())
}

#[must_use]
pub fn is_social_source(source: &str) -> bool {
    let lower = source.to_lowercase();
    SOCIAL_SOURCES.iter().any(|marker| lower.contains(marker))
}

/// Mean of likes + comments over social records.
///
/// A record whose likes or comments cannot be parsed is left out of both
/// the sum and the record count.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn engagement_rate(analyzed: &[AnalyzedMention]) -> f64 {
    let mut total_engagement: u64 = 0;
    let mut social_records: usize = 0;

    for a in analyzed.iter().filter(|a| is_social_source(&a.mention.source)) {
        let likes = coerce_count(a.mention.likes.as_ref(), 0);
        let comments = coerce_count(a.mention.comments.as_ref(), 0);
        match (likes, comments) {
            (Some(likes), Some(comments)) => {
                total_engagement = total_engagement
                    .saturating_add(likes)
                    .saturating_add(comments);
                social_records += 1;
            }
            _ => {
                tracing::debug!(
                    source = %a.mention.source,
                    date = %a.mention.date,
                    "excluding record with unparseable likes/comments from engagement"
                );
            }
        }
    }

    if social_records == 0 {
        0.0
    } else {
        total_engagement as f64 / social_records as f64
    }
}

/// Sum of reach; missing or unparseable values count as 0.
#[must_use]
pub fn total_reach(analyzed: &[AnalyzedMention]) -> u64 {
    analyzed
        .iter()
        .map(|a| {
            coerce_count(a.mention.reach.as_ref(), 0).unwrap_or_else(|| {
                tracing::debug!(source = %a.mention.source, "unparseable reach treated as 0");
                0
            })
        })
        .fold(0_u64, u64::saturating_add)
}

/// Combine the per-record tallies and the annotated records into a summary.
#[must_use]
pub fn aggregate(
    analyzed: Vec<AnalyzedMention>,
    tally: &Tally,
    request: &AnalysisRequest,
) -> KpiSummary {
    let all_brands = request.all_brands();
    if analyzed.is_empty() {
        return KpiSummary::empty(all_brands);
    }

    let mut brand_mentions = tally.brand_mentions.clone();
    brand_mentions.resize(all_brands.len(), 0);

    KpiSummary {
        sentiment_ratio: ratio_map(&tally.sentiments, tally.records),
        theme_ratio: ratio_map(&tally.themes, tally.records),
        sov: share_of_voice(&brand_mentions),
        mis: media_impact_score(&analyzed),
        mpi: message_penetration(&analyzed, &request.campaign_messages),
        engagement_rate: engagement_rate(&analyzed),
        reach: total_reach(&analyzed),
        all_brands,
        analyzed,
    }
}
