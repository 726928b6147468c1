//! Rule-based sentiment and theme classification.
//!
//! Both classifiers walk an ordered rule table and return the label of the
//! first rule that matches, so precedence is the table order.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Sentiment, Theme};

pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "positive", "love", "awesome", "best", "happy", "like",
    "amazing", "superb", "fantastic", "recommend", "perfect", "honoured", "lauds", "empower",
    "support", "champions", "wins", "upgrades", "successful", "oversubscribed", "confidence",
];

pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "terrible", "negative", "hate", "awful", "worst", "sad", "dislike", "broken",
    "fail", "issue", "problem", "disappointed", "avoid", "scam", "fraud", "downtime", "glitches",
    "fume", "arrest", "rift", "vanished", "failed", "undersubscribed", "loss",
];

pub(crate) const ANGER_WORDS: &[&str] = &[
    "angry", "furious", "rage", "mad", "outrage", "pissed", "fuming", "livid", "worst!",
];

pub(crate) const APPRECIATION_WORDS: &[&str] = &[
    "thank", "appreciate", "grateful", "thanks", "kudos", "cheers", "props", "helpful",
    "honoured", "lauds", "legacy", "honoring",
];

/// Connectives that turn a single-polarity text into `mixed`.
pub(crate) const CONNECTIVE_WORDS: &[&str] =
    &["but", "however", "although", "yet", "still", "despite"];

/// Theme keywords, matched as plain substrings of the lowercased text.
pub(crate) const THEME_RULES: &[(Theme, &[&str])] = &[
    (
        Theme::CsrEsg,
        &["csr", "esg", "donation", "community", "foundation", "initiative"],
    ),
    (
        Theme::Corporate,
        &[
            "ceo", "gmd", "profit", "results", "acquisition", "corporate", "raise", "capital",
            "bond",
        ],
    ),
    (
        Theme::PartnershipSponsorship,
        &["partner", "sponsorship", "marathon"],
    ),
    (
        Theme::ProductService,
        &[
            "app", "loan", "card", "customer service", "downtime", "glitch", "e-channel",
            "transfer",
        ],
    ),
    (
        Theme::LegalRisk,
        &["fraud", "cbn", "efcc", "fine", "court", "scam", "allegation", "rift"],
    ),
];

/// Build one case-insensitive, whole-word alternation over `words`.
fn word_set(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid keyword regex")
}

static POSITIVE: LazyLock<Regex> = LazyLock::new(|| word_set(POSITIVE_WORDS));
static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| word_set(NEGATIVE_WORDS));
static ANGER: LazyLock<Regex> = LazyLock::new(|| word_set(ANGER_WORDS));
static APPRECIATION: LazyLock<Regex> = LazyLock::new(|| word_set(APPRECIATION_WORDS));
static CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| word_set(CONNECTIVE_WORDS));

/// Which keyword families occur in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub positive: bool,
    pub negative: bool,
    pub anger: bool,
    pub appreciation: bool,
    pub connective: bool,
}

impl Signals {
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            positive: POSITIVE.is_match(&lower),
            negative: NEGATIVE.is_match(&lower),
            anger: ANGER.is_match(&lower),
            appreciation: APPRECIATION.is_match(&lower),
            connective: CONNECTIVE.is_match(&lower),
        }
    }
}

fn is_anger(s: &Signals) -> bool {
    s.anger
}

// A connective next to a single polarity is enough; both polarities are not required.
fn is_mixed(s: &Signals) -> bool {
    (s.positive && s.negative) || (s.connective && (s.positive || s.negative))
}

fn is_negative(s: &Signals) -> bool {
    s.negative
}

fn is_positive(s: &Signals) -> bool {
    s.positive
}

fn is_appreciation(s: &Signals) -> bool {
    s.appreciation
}

/// Sentiment rules in evaluation order. No match means `neutral`.
pub const SENTIMENT_RULES: &[(Sentiment, fn(&Signals) -> bool)] = &[
    (Sentiment::Anger, is_anger),
    (Sentiment::Mixed, is_mixed),
    (Sentiment::Negative, is_negative),
    (Sentiment::Positive, is_positive),
    (Sentiment::Appreciation, is_appreciation),
];

/// Classify the sentiment of a text. Empty text is `neutral` without a scan.
#[must_use]
pub fn classify_sentiment(text: &str) -> Sentiment {
    if text.is_empty() {
        return Sentiment::Neutral;
    }
    let signals = Signals::scan(text);
    SENTIMENT_RULES
        .iter()
        .find(|(_, matches)| matches(&signals))
        .map_or(Sentiment::Neutral, |(label, _)| *label)
}

/// Classify the theme of a text. Falls back to `General News`.
#[must_use]
pub fn classify_theme(text: &str) -> Theme {
    let lower = text.to_lowercase();
    THEME_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(Theme::GeneralNews, |(theme, _)| *theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(classify_sentiment(""), Sentiment::Neutral);
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(classify_sentiment("the quick brown fox"), Sentiment::Neutral);
    }

    #[test]
    fn anger_beats_positive() {
        assert_eq!(
            classify_sentiment("I am furious and this is great"),
            Sentiment::Anger
        );
    }

    #[test]
    fn both_polarities_are_mixed() {
        assert_eq!(
            classify_sentiment("The service is good but the app is broken"),
            Sentiment::Mixed
        );
        assert_eq!(
            classify_sentiment("good service, broken app"),
            Sentiment::Mixed
        );
    }

    #[test]
    fn connective_with_single_polarity_is_mixed() {
        assert_eq!(
            classify_sentiment("The transfer failed yet again"),
            Sentiment::Mixed
        );
        assert_eq!(
            classify_sentiment("Still the best bank in town"),
            Sentiment::Mixed
        );
    }

    #[test]
    fn connective_alone_is_neutral() {
        assert_eq!(
            classify_sentiment("However, the branch opens at nine"),
            Sentiment::Neutral
        );
    }

    #[test]
    fn negative_only() {
        assert_eq!(
            classify_sentiment("Another downtime on the platform"),
            Sentiment::Negative
        );
    }

    #[test]
    fn positive_only() {
        assert_eq!(
            classify_sentiment("Awesome experience at the branch"),
            Sentiment::Positive
        );
    }

    #[test]
    fn appreciation_only() {
        assert_eq!(
            classify_sentiment("Kudos to the customer care team"),
            Sentiment::Appreciation
        );
    }

    #[test]
    fn shared_keyword_resolves_to_positive_first() {
        // "lauds" is in both the positive and appreciation lists.
        assert_eq!(
            classify_sentiment("Minister lauds the initiative"),
            Sentiment::Positive
        );
    }

    #[test]
    fn matching_is_whole_word_and_case_insensitive() {
        assert_eq!(classify_sentiment("GREAT job"), Sentiment::Positive);
        // "badge" must not match "bad", "madam" must not match "mad".
        assert_eq!(
            classify_sentiment("Madam received a badge"),
            Sentiment::Neutral
        );
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let order: Vec<Sentiment> = SENTIMENT_RULES.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            order,
            vec![
                Sentiment::Anger,
                Sentiment::Mixed,
                Sentiment::Negative,
                Sentiment::Positive,
                Sentiment::Appreciation,
            ]
        );
    }

    #[test]
    fn corporate_theme() {
        assert_eq!(
            classify_theme("Our CEO announced record profit results"),
            Theme::Corporate
        );
    }

    #[test]
    fn csr_theme_wins_over_later_rules() {
        assert_eq!(
            classify_theme("Foundation donation to fraud victims"),
            Theme::CsrEsg
        );
    }

    #[test]
    fn theme_matching_is_substring() {
        // "app" is found inside "happy".
        assert_eq!(classify_theme("Very happy today"), Theme::ProductService);
    }

    #[test]
    fn partnership_and_legal_themes() {
        assert_eq!(
            classify_theme("Lagos City Marathon returns"),
            Theme::PartnershipSponsorship
        );
        assert_eq!(
            classify_theme("EFCC files charges in court"),
            Theme::LegalRisk
        );
    }

    #[test]
    fn no_theme_keyword_is_general_news() {
        assert_eq!(classify_theme("Weather is cloudy"), Theme::GeneralNews);
        assert_eq!(classify_theme(""), Theme::GeneralNews);
    }
}
