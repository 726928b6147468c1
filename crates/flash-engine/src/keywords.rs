//! Frequency-ranked keyword and two-word phrase extraction.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::types::KeywordCount;

/// Number of terms returned by [`KeywordExtractor::extract`].
pub const TOP_KEYWORDS: usize = 10;

/// Phrases seen fewer times than this are dropped before ranking.
pub const MIN_PHRASE_FREQUENCY: usize = 2;

/// Standard English stopwords (the NLTK list).
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// URL fragments and social-media noise.
const WEB_NOISE: &[&str] = &["com", "www", "http", "https", "co", "uk", "amp", "rt", "via"];

/// Generic industry words that would otherwise dominate the ranking.
const INDUSTRY_WORDS: &[&str] = &["bank", "plc", "ltd", "group", "holdings"];

/// Suffixes split off a word before the letters-only check.
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

static BASE_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ENGLISH_STOPWORDS
        .iter()
        .chain(WEB_NOISE)
        .chain(INDUSTRY_WORDS)
        .copied()
        .collect()
});

/// Extracts the most frequent terms from a corpus, ignoring tracked brand names.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    dynamic_stopwords: HashSet<String>,
}

impl KeywordExtractor {
    /// Build an extractor that also ignores the brand, every competitor and
    /// `extra` words. Multi-word names are ignored whole and word by word.
    #[must_use]
    pub fn new(brand: &str, competitors: &[String], extra: &[String]) -> Self {
        let mut dynamic_stopwords = HashSet::new();
        for name in std::iter::once(brand)
            .chain(competitors.iter().map(String::as_str))
            .chain(extra.iter().map(String::as_str))
        {
            let lower = name.trim().to_lowercase();
            dynamic_stopwords.extend(lower.split_whitespace().map(ToString::to_string));
            dynamic_stopwords.insert(lower);
        }
        Self { dynamic_stopwords }
    }

    fn is_stopword(&self, token: &str) -> bool {
        BASE_STOPWORDS.contains(token) || self.dynamic_stopwords.contains(token)
    }

    /// Lowercase alphabetic tokens longer than two characters, stopwords removed.
    ///
    /// Possessive and contraction suffixes are split off first, so
    /// `customer's` contributes `customer`.
    #[must_use]
    pub fn tokenize(&self, corpus: &str) -> Vec<String> {
        corpus
            .to_lowercase()
            .replace('\u{2019}', "'")
            .split_whitespace()
            .map(|raw| strip_clitic(raw.trim_matches(|c: char| !c.is_alphanumeric())))
            .filter(|t| t.chars().count() > 2 && t.chars().all(char::is_alphabetic))
            .filter(|t| !self.is_stopword(t))
            .map(ToString::to_string)
            .collect()
    }

    /// Rank single words and repeated two-word phrases by frequency.
    ///
    /// Ties keep encounter order, words ahead of phrases.
    #[must_use]
    pub fn extract(&self, corpus: &str) -> Vec<KeywordCount> {
        let tokens = self.tokenize(corpus);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut ranked = count_in_order(tokens.iter().cloned());
        let phrases = count_in_order(tokens.windows(2).map(|pair| pair.join(" ")));
        ranked.extend(
            phrases
                .into_iter()
                .filter(|kw| kw.frequency >= MIN_PHRASE_FREQUENCY),
        );

        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        ranked.truncate(TOP_KEYWORDS);
        ranked
    }
}

/// Top keywords of `corpus`, ignoring the brand and its competitors.
#[must_use]
pub fn extract_keywords(corpus: &str, brand: &str, competitors: &[String]) -> Vec<KeywordCount> {
    KeywordExtractor::new(brand, competitors, &[]).extract(corpus)
}

/// Drop a trailing possessive or contraction (`'s`, `n't`, `'ll`, ...).
fn strip_clitic(token: &str) -> &str {
    CLITICS
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token)
}

/// Count occurrences, keeping terms in first-seen order.
fn count_in_order(terms: impl Iterator<Item = String>) -> Vec<KeywordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();
    for term in terms {
        if let Some(&i) = index.get(&term) {
            counts[i].frequency += 1;
        } else {
            index.insert(term.clone(), counts.len());
            counts.push(KeywordCount { term, frequency: 1 });
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequency_of(keywords: &[KeywordCount], term: &str) -> Option<usize> {
        keywords.iter().find(|k| k.term == term).map(|k| k.frequency)
    }

    #[test]
    fn empty_corpus_yields_nothing() {
        assert!(extract_keywords("", "Zenith", &[]).is_empty());
    }

    #[test]
    fn corpus_of_only_stopwords_yields_nothing() {
        assert!(extract_keywords("the and of it is to https www", "Zenith", &[]).is_empty());
    }

    #[test]
    fn brand_excluded_and_bigram_ranked() {
        let corpus = "Zenith mobile banking app is great. \
                      Zenith launches mobile banking app today. \
                      Love the mobile banking app from Zenith!";
        let keywords = extract_keywords(corpus, "Zenith", &[]);

        assert!(frequency_of(&keywords, "zenith").is_none());
        let phrase = frequency_of(&keywords, "mobile banking").expect("bigram present");
        assert!(phrase >= 2, "expected frequency >= 2, got {phrase}");
        assert_eq!(frequency_of(&keywords, "mobile"), Some(3));
    }

    #[test]
    fn competitors_and_their_words_excluded() {
        let competitors = vec!["GT Bank".to_string(), "Opay".to_string()];
        let keywords = extract_keywords("Opay and GT Bank loans loans", "Zenith", &competitors);
        assert!(frequency_of(&keywords, "opay").is_none());
        assert!(frequency_of(&keywords, "gt").is_none());
        assert_eq!(frequency_of(&keywords, "loans"), Some(2));
    }

    #[test]
    fn single_phrases_are_dropped() {
        let keywords = extract_keywords("loan approval", "Zenith", &[]);
        assert!(frequency_of(&keywords, "loan approval").is_none());
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn short_and_non_alphabetic_tokens_dropped() {
        let extractor = KeywordExtractor::new("Zenith", &[], &[]);
        let tokens = extractor.tokenize("ok #zecathon 2024 e-channel (savings).");
        assert_eq!(tokens, vec!["zecathon", "savings"]);
    }

    #[test]
    fn possessives_keep_the_base_word() {
        let extractor = KeywordExtractor::new("Zenith", &[], &[]);
        let tokens = extractor.tokenize("customer's complaints, the app\u{2019}s login didn't load");
        assert_eq!(tokens, vec!["customer", "complaints", "app", "login", "load"]);
    }

    #[test]
    fn possessive_words_form_phrases() {
        let keywords = extract_keywords(
            "customer's complaints rise. customer's complaints rise.",
            "Zenith",
            &[],
        );
        assert_eq!(frequency_of(&keywords, "customer"), Some(2));
        assert_eq!(frequency_of(&keywords, "customer complaints"), Some(2));
        assert_eq!(frequency_of(&keywords, "complaints rise"), Some(2));
    }

    #[test]
    fn extra_stopwords_apply() {
        let extractor = KeywordExtractor::new("Zenith", &[], &["naira".to_string()]);
        assert!(extractor.extract("naira naira naira").is_empty());
    }

    #[test]
    fn ties_keep_encounter_order_and_cap_at_ten() {
        let corpus = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let keywords = extract_keywords(corpus, "Zenith", &[]);
        assert_eq!(keywords.len(), TOP_KEYWORDS);
        assert_eq!(keywords[0].term, "alpha");
        assert_eq!(keywords[9].term, "juliet");
    }

    #[test]
    fn higher_frequency_ranks_first() {
        let keywords = extract_keywords("alpha bravo bravo", "Zenith", &[]);
        assert_eq!(keywords[0].term, "bravo");
        assert_eq!(keywords[0].frequency, 2);
    }
}
