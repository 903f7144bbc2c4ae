//! Serde helper functions for collaborator payloads.
//!
//! The remote side is not consistent about date encodings or about whether a
//! field error is a single message or a list, so these helpers normalise both.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD`, also accepting an ISO datetime and keeping its date part.
pub fn parse_lenient_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    let date_part = match s.char_indices().nth(10) {
        Some((idx, 'T')) | Some((idx, ' ')) => &s[..idx],
        _ => s,
    };
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
}

/// Deserialize a NaiveDate from `YYYY-MM-DD` or an ISO datetime string.
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_lenient_date(&s).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Deserialize either a single string or a list of strings into a list.
pub fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
