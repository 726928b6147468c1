//! Brand-monitoring KPI engine.
//!
//! Classifies each mention's sentiment and theme from fixed lexicons, detects
//! which tracked brands it names, and aggregates the run into a [`KpiSummary`]
//! (sentiment and theme ratios, share of voice, media impact, message
//! penetration, engagement and reach). [`run_analysis`] adds the top keywords
//! of the corpus. Alerting, grading and report rendering read the summary and
//! never change it.

pub mod alert;
pub mod brands;
pub mod keywords;
pub mod lexicon;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod types;

pub use alert::{evaluate_alert, grade, Alert, Grade, KpiGrades};
pub use brands::BrandDetector;
pub use keywords::{extract_keywords, KeywordExtractor};
pub use lexicon::{classify_sentiment, classify_theme};
pub use pipeline::{compute_kpis, corpus_keywords, run_analysis};
pub use report::{categorize_mentions, render_markdown, MentionSections};
pub use types::{
    AnalysisOutcome, AnalysisRequest, AnalyzedMention, KeywordCount, KpiSummary, Sentiment, Theme,
};
