//! Record source: turns a flat CSV (or JSON) export into [`Mention`]s.
//!
//! Shape problems (a missing mandatory column, or a blank date or source)
//! are hard failures here. A blank text is kept as empty text and later
//! classified neutral. Numeric cells are passed through raw and never fail
//! the load.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::count::RawCount;
use crate::mention::Mention;

/// Columns every source must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["text", "date", "source"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read mentions file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mentions source is missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: required field '{column}' is empty")]
    MissingValue { row: usize, column: String },
}

/// Load mentions from `path`, choosing JSON for `.json` files and CSV otherwise.
///
/// `default_reach` is applied to every record when the source has no reach
/// data at all.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened or parsed, or if a
/// mandatory column or value is missing.
pub fn load_mentions(path: &Path, default_reach: u64) -> Result<Vec<Mention>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mentions = if is_json {
        read_mentions_json(file, default_reach)?
    } else {
        read_mentions_csv(file, default_reach)?
    };

    tracing::info!(
        path = %path.display(),
        count = mentions.len(),
        "mentions loaded"
    );
    Ok(mentions)
}

/// Normalize a CSV header: lowercase, trimmed, with export aliases mapped.
fn normalize_header(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    match lower.as_str() {
        "mention text" => "text".to_string(),
        _ => lower,
    }
}

/// Read mentions from CSV. Header matching is case-insensitive.
///
/// # Errors
///
/// Returns [`LoadError`] on malformed CSV or missing mandatory data.
pub fn read_mentions_csv<R: Read>(reader: R, default_reach: u64) -> Result<Vec<Mention>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| (normalize_header(h), idx))
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }
    let has_reach_column = columns.contains_key("reach");

    let mut mentions = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;
        let cell = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };
        let required = |name: &str| -> Result<String, LoadError> {
            cell(name).ok_or_else(|| LoadError::MissingValue {
                row,
                column: name.to_string(),
            })
        };

        let text = cell("text").unwrap_or_default();
        if text.is_empty() {
            tracing::warn!(row, "mention has empty text; keeping it as neutral");
        }

        let reach = if has_reach_column {
            cell("reach").map(RawCount::Text)
        } else {
            Some(RawCount::from(default_reach))
        };

        mentions.push(Mention {
            text,
            date: required("date")?,
            source: required("source")?,
            link: cell("link"),
            headline: cell("headline"),
            likes: cell("likes").map(RawCount::Text),
            comments: cell("comments").map(RawCount::Text),
            reach,
            authority: cell("authority").map(RawCount::Text),
        });
    }

    Ok(mentions)
}

/// Read mentions from a JSON array of records.
///
/// # Errors
///
/// Returns [`LoadError`] on malformed JSON or an empty date or source.
pub fn read_mentions_json<R: Read>(reader: R, default_reach: u64) -> Result<Vec<Mention>, LoadError> {
    let mut mentions: Vec<Mention> = serde_json::from_reader(reader)?;

    for (idx, mention) in mentions.iter().enumerate() {
        if mention.text.trim().is_empty() {
            tracing::warn!(row = idx + 1, "mention has empty text; keeping it as neutral");
        }
        let fields = [("date", &mention.date), ("source", &mention.source)];
        if let Some((column, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(LoadError::MissingValue {
                row: idx + 1,
                column: (*column).to_string(),
            });
        }
    }

    if mentions.iter().all(|m| m.reach.is_none()) {
        for mention in &mut mentions {
            mention.reach = Some(RawCount::from(default_reach));
        }
    }

    Ok(mentions)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::coerce_count;

    #[test]
    fn maps_mention_text_header_case_insensitively() {
        let csv = "Date, Source ,Mention Text,Likes\n2024-05-01,twitter,Great app,12\n";
        let mentions = read_mentions_csv(csv.as_bytes(), 1000).unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].text, "Great app");
        assert_eq!(mentions[0].source, "twitter");
        assert_eq!(mentions[0].likes, Some(RawCount::Text("12".to_string())));
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "date,text\n2024-05-01,hello\n";
        let err = read_mentions_csv(csv.as_bytes(), 1000).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "source"));
    }

    #[test]
    fn empty_required_value_fails_with_row() {
        let csv = "date,source,text\n2024-05-01,punch,ok\n2024-05-02,,bad row\n";
        let err = read_mentions_csv(csv.as_bytes(), 1000).unwrap_err();
        assert!(
            matches!(err, LoadError::MissingValue { row: 2, ref column } if column == "source"),
            "got: {err:?}"
        );
    }

    #[test]
    fn blank_text_row_is_kept_with_empty_text() {
        let csv = "date,source,text\n2024-05-01,punch,\n2024-05-02,fb,hello\n";
        let mentions = read_mentions_csv(csv.as_bytes(), 1000).unwrap();
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].text, "");
        assert_eq!(mentions[1].text, "hello");
    }

    #[test]
    fn absent_reach_column_uses_default() {
        let csv = "date,source,text\n2024-05-01,punch,hello\n";
        let mentions = read_mentions_csv(csv.as_bytes(), 1000).unwrap();
        assert_eq!(coerce_count(mentions[0].reach.as_ref(), 0), Some(1000));
    }

    #[test]
    fn empty_reach_cell_stays_absent() {
        let csv = "date,source,text,reach\n2024-05-01,punch,hello,\n";
        let mentions = read_mentions_csv(csv.as_bytes(), 1000).unwrap();
        assert!(mentions[0].reach.is_none());
    }

    #[test]
    fn quoted_thousands_survive_until_coercion() {
        let csv = "date,source,text,reach\n2024-05-01,punch,hello,\"50,000\"\n";
        let mentions = read_mentions_csv(csv.as_bytes(), 1000).unwrap();
        assert_eq!(coerce_count(mentions[0].reach.as_ref(), 0), Some(50_000));
    }

    #[test]
    fn json_records_with_mixed_numeric_types() {
        let json = r#"[
            {"text": "a", "date": "d", "source": "fb", "likes": 3, "comments": "2"},
            {"text": "b", "date": "d", "source": "ig", "reach": 10}
        ]"#;
        let mentions = read_mentions_json(json.as_bytes(), 1000).unwrap();
        assert_eq!(mentions[0].likes, Some(RawCount::Integer(3)));
        assert_eq!(mentions[0].comments, Some(RawCount::Text("2".to_string())));
        assert!(mentions[0].reach.is_none());
        assert_eq!(mentions[1].reach, Some(RawCount::Integer(10)));
    }

    #[test]
    fn json_non_numeric_count_does_not_abort_load() {
        let json = r#"[
            {"text": "a", "date": "d", "source": "fb", "likes": true, "comments": 4},
            {"text": "b", "date": "d", "source": "ig", "reach": {"value": 9}}
        ]"#;
        let mentions = read_mentions_json(json.as_bytes(), 1000).unwrap();
        assert_eq!(mentions.len(), 2);
        assert_eq!(coerce_count(mentions[0].likes.as_ref(), 0), None);
        assert_eq!(coerce_count(mentions[0].comments.as_ref(), 0), Some(4));
        assert_eq!(coerce_count(mentions[1].reach.as_ref(), 0), None);
    }

    #[test]
    fn json_without_any_reach_gets_default() {
        let json = r#"[{"text": "a", "date": "d", "source": "fb"}]"#;
        let mentions = read_mentions_json(json.as_bytes(), 750).unwrap();
        assert_eq!(coerce_count(mentions[0].reach.as_ref(), 0), Some(750));
    }

    #[test]
    fn json_blank_text_is_kept() {
        let json = r#"[{"text": " ", "date": "d", "source": "fb"}]"#;
        let mentions = read_mentions_json(json.as_bytes(), 1000).unwrap();
        assert_eq!(mentions.len(), 1);
    }

    #[test]
    fn json_blank_source_fails() {
        let json = r#"[{"text": "a", "date": "d", "source": ""}]"#;
        let err = read_mentions_json(json.as_bytes(), 1000).unwrap_err();
        assert!(matches!(err, LoadError::MissingValue { row: 1, ref column } if column == "source"));
    }

    #[test]
    fn load_mentions_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"text": "a", "date": "d", "source": "fb"}}]"#).unwrap();
        let mentions = load_mentions(file.path(), 1000).unwrap();
        assert_eq!(mentions.len(), 1);

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date,source,text").unwrap();
        writeln!(file, "2024-05-01,punch,hello").unwrap();
        let mentions = load_mentions(file.path(), 1000).unwrap();
        assert_eq!(mentions[0].text, "hello");
    }

    #[test]
    fn load_mentions_missing_file_is_io_error() {
        let err = load_mentions(Path::new("/nonexistent/demo_data.csv"), 1000).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
