use std::collections::BTreeMap;

use flash_core::{Mention, MonitoringProfile};
use serde::{Deserialize, Serialize};

/// Sentiment label, declared in rule precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Anger,
    Mixed,
    Negative,
    Positive,
    Appreciation,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Anger => "anger",
            Sentiment::Mixed => "mixed",
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
            Sentiment::Appreciation => "appreciation",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Labels that count towards the media impact score.
    #[must_use]
    pub fn is_favorable(self) -> bool {
        matches!(self, Sentiment::Positive | Sentiment::Appreciation)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topical category of a mention, declared in rule precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "CSR/ESG")]
    CsrEsg,
    #[serde(rename = "Corporate")]
    Corporate,
    #[serde(rename = "Partnership/Sponsorship")]
    PartnershipSponsorship,
    #[serde(rename = "Product/Service")]
    ProductService,
    #[serde(rename = "Legal/Risk")]
    LegalRisk,
    #[serde(rename = "General News")]
    GeneralNews,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::CsrEsg => "CSR/ESG",
            Theme::Corporate => "Corporate",
            Theme::PartnershipSponsorship => "Partnership/Sponsorship",
            Theme::ProductService => "Product/Service",
            Theme::LegalRisk => "Legal/Risk",
            Theme::GeneralNews => "General News",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub brand: String,
    pub competitors: Vec<String>,
    pub campaign_messages: Vec<String>,
    pub extra_stopwords: Vec<String>,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(brand: impl Into<String>, competitors: Vec<String>, campaign_messages: Vec<String>) -> Self {
        Self {
            brand: brand.into(),
            competitors,
            campaign_messages,
            extra_stopwords: Vec::new(),
        }
    }

    /// `[brand] + competitors`, the order share of voice is reported in.
    #[must_use]
    pub fn all_brands(&self) -> Vec<String> {
        std::iter::once(self.brand.clone())
            .chain(self.competitors.iter().cloned())
            .collect()
    }
}

impl From<MonitoringProfile> for AnalysisRequest {
    fn from(profile: MonitoringProfile) -> Self {
        Self {
            brand: profile.brand,
            competitors: profile.competitors,
            campaign_messages: profile.campaign_messages,
            extra_stopwords: profile.extra_stopwords,
        }
    }
}

/// A mention after classification and brand detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedMention {
    #[serde(flatten)]
    pub mention: Mention,
    pub sentiment: Sentiment,
    pub theme: Theme,
    /// Tracked names found in the text, in `[brand] + competitors` order.
    pub mentioned_brands: Vec<String>,
}

/// Output of one engine run.
///
/// Every KPI field is always present; values that cannot be computed are 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Percent of records per sentiment label. Labels with no records are omitted.
    pub sentiment_ratio: BTreeMap<Sentiment, f64>,
    /// Percent of records per theme. Themes with no records are omitted.
    pub theme_ratio: BTreeMap<Theme, f64>,
    /// Share of voice, aligned with `all_brands`.
    pub sov: Vec<f64>,
    /// Media impact score: summed authority of favorable mentions.
    pub mis: u64,
    /// Message penetration index, percent.
    pub mpi: f64,
    pub engagement_rate: f64,
    pub reach: u64,
    pub all_brands: Vec<String>,
    pub analyzed: Vec<AnalyzedMention>,
}

impl KpiSummary {
    /// The zeroed summary for an empty record collection.
    #[must_use]
    pub fn empty(all_brands: Vec<String>) -> Self {
        Self {
            sentiment_ratio: BTreeMap::new(),
            theme_ratio: BTreeMap::new(),
            sov: vec![0.0; all_brands.len()],
            mis: 0,
            mpi: 0.0,
            engagement_rate: 0.0,
            reach: 0,
            all_brands,
            analyzed: Vec::new(),
        }
    }

    /// Percentage for one sentiment label, 0 when absent.
    #[must_use]
    pub fn sentiment_pct(&self, label: Sentiment) -> f64 {
        self.sentiment_ratio.get(&label).copied().unwrap_or(0.0)
    }

    /// Combined `negative` + `anger` percentage.
    #[must_use]
    pub fn negative_pct(&self) -> f64 {
        self.sentiment_pct(Sentiment::Negative) + self.sentiment_pct(Sentiment::Anger)
    }
}

/// A ranked keyword or two-word phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub term: String,
    pub frequency: usize,
}

/// Everything one analysis request produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub kpis: KpiSummary,
    pub top_keywords: Vec<KeywordCount>,
}
