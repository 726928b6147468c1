use serde::{Deserialize, Serialize};

use crate::count::RawCount;

/// One unit of monitored content, as handed over by the record loader.
///
/// `text`, `date` and `source` are guaranteed non-empty by the loader.
/// The numeric fields are kept raw; see [`crate::coerce_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub text: String,
    pub date: String,
    /// Platform or publication identifier, e.g. `twitter` or `BusinessDay`.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default)]
    pub likes: Option<RawCount>,
    #[serde(default)]
    pub comments: Option<RawCount>,
    #[serde(default)]
    pub reach: Option<RawCount>,
    /// Source credibility weight. Absent means the default of 5.
    #[serde(default)]
    pub authority: Option<RawCount>,
}

impl Mention {
    /// Build a mention with only the mandatory fields set.
    #[must_use]
    pub fn new(text: impl Into<String>, date: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            date: date.into(),
            source: source.into(),
            link: None,
            headline: None,
            likes: None,
            comments: None,
            reach: None,
            authority: None,
        }
    }
}
