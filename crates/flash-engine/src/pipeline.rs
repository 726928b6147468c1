//! KPI engine orchestration.

use flash_core::Mention;

use crate::brands::BrandDetector;
use crate::keywords::KeywordExtractor;
use crate::lexicon::{classify_sentiment, classify_theme};
use crate::metrics::{aggregate, Tally};
use crate::types::{AnalysisOutcome, AnalysisRequest, AnalyzedMention, KeywordCount, KpiSummary};

/// Classify one mention, detect brands in it, and fold it into `tally`.
fn annotate(mention: Mention, detector: &BrandDetector, tally: &mut Tally) -> AnalyzedMention {
    let sentiment = classify_sentiment(&mention.text);
    let theme = classify_theme(&mention.text);
    let brand_indices = detector.detect_indices(&mention.text);
    tally.record(sentiment, theme, &brand_indices);

    let mentioned_brands = brand_indices
        .into_iter()
        .map(|idx| detector.names()[idx].clone())
        .collect();

    AnalyzedMention {
        mention,
        sentiment,
        theme,
        mentioned_brands,
    }
}

/// Enrich every mention and compute the KPI summary.
///
/// 1. Per record: sentiment, theme and brand detection, tallied as it goes.
/// 2. One aggregation pass over the tallies and enriched records.
///
/// An empty collection produces [`KpiSummary::empty`]. The same input always
/// produces the same summary.
#[must_use]
pub fn compute_kpis(mentions: Vec<Mention>, request: &AnalysisRequest) -> KpiSummary {
    let all_brands = request.all_brands();
    if mentions.is_empty() {
        tracing::info!(brand = %request.brand, "no mentions supplied; returning empty summary");
        return KpiSummary::empty(all_brands);
    }

    let detector = BrandDetector::new(&all_brands);
    let mut tally = Tally::new(all_brands.len());
    let analyzed: Vec<AnalyzedMention> = mentions
        .into_iter()
        .map(|m| annotate(m, &detector, &mut tally))
        .collect();

    aggregate(analyzed, &tally, request)
}

/// Top keywords of `texts` joined into one corpus, ignoring the request's
/// brands, competitors and extra stopwords.
#[must_use]
pub fn corpus_keywords<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    request: &AnalysisRequest,
) -> Vec<KeywordCount> {
    let corpus = texts.into_iter().collect::<Vec<_>>().join(" ");
    KeywordExtractor::new(
        &request.brand,
        &request.competitors,
        &request.extra_stopwords,
    )
    .extract(&corpus)
}

/// Run one full analysis request: KPIs plus the top keywords of all texts.
#[must_use]
pub fn run_analysis(mentions: Vec<Mention>, request: &AnalysisRequest) -> AnalysisOutcome {
    let record_count = mentions.len();
    let kpis = compute_kpis(mentions, request);

    let top_keywords = corpus_keywords(
        kpis.analyzed.iter().map(|a| a.mention.text.as_str()),
        request,
    );

    tracing::info!(
        brand = %request.brand,
        records = record_count,
        brands = kpis.all_brands.len(),
        keywords = top_keywords.len(),
        "analysis complete"
    );

    AnalysisOutcome { kpis, top_keywords }
}
