//! Region identifiers, color tokens and the per-region annotation record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable opaque identifier for a map region, supplied by the atlas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A color category, stored as written (normally `#RRGGBB`).
///
/// Tokens coming from imported files are not validated; rendering falls back
/// to the unset color for anything that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Annotation attached to one region.
///
/// A missing record and a record with both fields unset mean the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl RegionRecord {
    /// True when the record carries nothing a user would see.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.memo.as_deref().is_none_or(str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        assert!(RegionRecord::default().is_empty());
    }

    #[test]
    fn test_blank_memo_counts_as_empty() {
        let record = RegionRecord {
            color: None,
            memo: Some(String::new()),
        };
        assert!(record.is_empty());
    }

    #[test]
    fn test_color_or_memo_makes_record_non_empty() {
        let colored = RegionRecord {
            color: Some(ColorToken::from("#EF4444")),
            memo: None,
        };
        let noted = RegionRecord {
            color: None,
            memo: Some("visited".to_string()),
        };
        assert!(!colored.is_empty());
        assert!(!noted.is_empty());
    }

    #[test]
    fn test_record_omits_unset_fields() {
        let record = RegionRecord {
            color: Some(ColorToken::from("#3B82F6")),
            memo: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r##"{"color":"#3B82F6"}"##);
    }

    #[test]
    fn test_record_accepts_null_and_unknown_fields() {
        let record: RegionRecord =
            serde_json::from_str(r#"{"color":null,"memo":"hi","extra":1}"#).unwrap();
        assert_eq!(record.color, None);
        assert_eq!(record.memo.as_deref(), Some("hi"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RegionId::from("geo-3");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""geo-3""#);
        assert_eq!(id.to_string(), "geo-3");
    }
}
