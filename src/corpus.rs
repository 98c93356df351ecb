use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One conference-abstract record.
///
/// The fields mirror the meeting data files: a session identifier, an event
/// code within the session, the 4-digit meeting year, the talk title and the
/// abstract body. Records are created once during ingestion and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractRecord {
    pub session: String,
    /// Event code. Some data files carry this as a bare number, so
    /// deserialization accepts either form and normalizes to a string.
    #[serde(deserialize_with = "string_or_number")]
    pub event: String,
    /// Meeting year as a 4-digit string, e.g. "2021".
    pub year: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl AbstractRecord {
    /// Composite identifier, unique within a meeting.
    pub fn id(&self) -> String {
        format!("{}.{}", self.session, self.event)
    }

    /// External link for this event.
    ///
    /// The URL scheme is fixed:
    /// `https://meetings.aps.org/Meeting/MAR{yy}/Session/{session}.{event}`
    /// where `yy` is the last two digits of the year.
    pub fn meeting_url(&self) -> String {
        let yy = &self.year[self.year.len() - 2..];
        format!(
            "https://meetings.aps.org/Meeting/MAR{}/Session/{}.{}",
            yy, self.session, self.event
        )
    }

    /// The text the vectorizer is fitted on: title and abstract concatenated.
    pub fn fit_text(&self) -> String {
        format!("{}{}", self.title, self.abstract_text)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.session.is_empty() {
            return Err("session is empty".to_string());
        }
        if self.event.is_empty() {
            return Err("event is empty".to_string());
        }
        if self.year.len() != 4 || !self.year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("year {:?} is not a 4-digit string", self.year));
        }
        Ok(())
    }
}

/// Shape of one corpus data file.
#[derive(Debug, Deserialize)]
struct CorpusFile {
    events: Vec<AbstractRecord>,
}

/// Load and merge corpus data files in the given order.
///
/// Each file holds `{"events": [...]}`. Records are validated as they are
/// ingested; a record with a missing or malformed required field aborts the
/// load (build-time fatal) rather than failing later at render time.
pub fn load_corpus_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<AbstractRecord>> {
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::CorpusIo {
            path: path.display().to_string(),
            source,
        })?;
        let file: CorpusFile =
            serde_json::from_str(&text).map_err(|source| Error::CorpusParse {
                path: path.display().to_string(),
                source,
            })?;
        info!("{}: {} events imported", path.display(), file.events.len());
        records.extend(file.events);
    }
    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|reason| Error::InvalidDocument { index, reason })?;
    }
    Ok(records)
}

/// Drop records whose abstract is shorter than `min_len` characters.
///
/// Relative order is preserved: the position of a record in the returned
/// vector is its canonical document index for the rest of the pipeline.
pub fn filter_by_abstract_len(
    records: Vec<AbstractRecord>,
    min_len: usize,
) -> Vec<AbstractRecord> {
    let total = records.len();
    let retained: Vec<AbstractRecord> = records
        .into_iter()
        .filter(|r| r.abstract_text.chars().count() >= min_len)
        .collect();
    info!("{}/{} documents retained after length filter", retained.len(), total);
    retained
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct EventCode;

    impl<'de> Visitor<'de> for EventCode {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or integer event code")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(EventCode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(abstract_text: &str) -> AbstractRecord {
        AbstractRecord {
            session: "A1".to_string(),
            event: "5".to_string(),
            year: "2021".to_string(),
            title: "title".to_string(),
            abstract_text: abstract_text.to_string(),
        }
    }

    #[test]
    fn meeting_url_matches_link_scheme() {
        let r = record("body");
        assert_eq!(
            r.meeting_url(),
            "https://meetings.aps.org/Meeting/MAR21/Session/A1.5"
        );
    }

    #[test]
    fn id_is_session_dot_event() {
        assert_eq!(record("x").id(), "A1.5");
    }

    #[test]
    fn filter_retains_long_abstracts_in_order() {
        let docs = vec![record(&"a".repeat(250)), record(&"b".repeat(50)), record(&"c".repeat(300))];
        let kept = filter_by_abstract_len(docs, 200);
        assert_eq!(kept.len(), 2);
        assert!(kept[0].abstract_text.starts_with('a'));
        assert!(kept[1].abstract_text.starts_with('c'));
    }

    #[test]
    fn filter_keeps_exact_threshold() {
        let kept = filter_by_abstract_len(vec![record(&"x".repeat(200))], 200);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn filter_counts_characters_not_bytes() {
        // 200 two-byte characters
        let kept = filter_by_abstract_len(vec![record(&"é".repeat(200))], 200);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn event_code_accepts_numbers() {
        let r: AbstractRecord = serde_json::from_str(
            r#"{"session":"B2","event":7,"year":"2020","title":"t","abstract":"a"}"#,
        )
        .unwrap();
        assert_eq!(r.event, "7");
        assert_eq!(r.meeting_url(), "https://meetings.aps.org/Meeting/MAR20/Session/B2.7");
    }

    #[test]
    fn validate_rejects_bad_year() {
        let mut r = record("x");
        r.year = "21".to_string();
        assert!(r.validate().is_err());
        r.year = "20x1".to_string();
        assert!(r.validate().is_err());
        r.year = "2021".to_string();
        assert!(r.validate().is_ok());
    }

    #[test]
    fn missing_field_fails_at_parse() {
        let out: std::result::Result<AbstractRecord, _> =
            serde_json::from_str(r#"{"session":"A1","event":"5","year":"2021","title":"t"}"#);
        assert!(out.is_err());
    }

    #[test]
    fn fit_text_concatenates_title_and_abstract() {
        let r = record("body");
        assert_eq!(r.fit_text(), "titlebody");
    }
}
