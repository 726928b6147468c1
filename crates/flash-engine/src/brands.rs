//! Whole-word detection of tracked brand names in mention text.

use regex::Regex;

/// Matches the ordered `[brand] + competitors` list against mention text.
#[derive(Debug, Clone)]
pub struct BrandDetector {
    names: Vec<String>,
    patterns: Vec<Option<Regex>>,
}

impl BrandDetector {
    /// Compile one case-insensitive whole-word pattern per name.
    ///
    /// Blank names never match.
    #[must_use]
    pub fn new(names: &[String]) -> Self {
        let patterns = names
            .iter()
            .map(|name| {
                let lower = name.trim().to_lowercase();
                if lower.is_empty() {
                    return None;
                }
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&lower));
                Some(Regex::new(&pattern).expect("escaped brand name is a valid regex"))
            })
            .collect();
        Self {
            names: names.to_vec(),
            patterns,
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Positions (into the name list) of every name present in `text`.
    ///
    /// A name listed twice is reported once, at its first position.
    #[must_use]
    pub fn detect_indices(&self, text: &str) -> Vec<usize> {
        let lower = text.to_lowercase();
        let mut found: Vec<usize> = Vec::new();
        for (idx, pattern) in self.patterns.iter().enumerate() {
            let Some(pattern) = pattern else { continue };
            if found.iter().any(|&f| self.names[f] == self.names[idx]) {
                continue;
            }
            if pattern.is_match(&lower) {
                found.push(idx);
            }
        }
        found
    }

    /// Names present in `text`, in list order.
    #[must_use]
    pub fn detect(&self, text: &str) -> Vec<String> {
        self.detect_indices(text)
            .into_iter()
            .map(|idx| self.names[idx].clone())
            .collect()
    }
}
