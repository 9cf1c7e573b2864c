use chrono::{Datelike, NaiveDate};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::values::Year;

/// Unique identifier for an investor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestorId(pub u64);

impl InvestorId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InvestorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for InvestorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Normalized set of investor category tokens
///
/// Free-text tags such as `"Venture capital, corporate"` are parsed once at
/// ingestion into lowercase tokens (`"venture capital"`, `"corporate"`), so
/// category checks are set-membership lookups rather than substring scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTags", into = "Vec<String>")]
pub struct CategoryTags(BTreeSet<String>);

/// Category cell as it appears in a serialized row
///
/// A list, a single delimited string, or anything else (read as no tags).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    List(Vec<Option<String>>),
    Text(String),
    Malformed(IgnoredAny),
}

impl From<RawTags> for CategoryTags {
    fn from(raw: RawTags) -> Self {
        match raw {
            RawTags::List(entries) => entries.into_iter().flatten().collect::<Vec<_>>().into(),
            RawTags::Text(raw) => Self::parse(&raw),
            RawTags::Malformed(_) => Self::default(),
        }
    }
}

impl CategoryTags {
    /// Parse a raw tag string; `,` and `;` both separate tokens
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split([',', ';'])
                .filter_map(Self::normalize)
                .collect(),
        )
    }

    /// Normalize a single token: trim, lowercase, `_` as space, collapse whitespace
    ///
    /// Returns `None` for tokens that are empty after normalization.
    pub fn normalize(token: &str) -> Option<String> {
        let lowered = token.trim().to_lowercase().replace('_', " ");
        let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }

    /// Check whether a category token is present (token is normalized first)
    pub fn contains(&self, token: &str) -> bool {
        match Self::normalize(token) {
            Some(normalized) => self.0.contains(&normalized),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for CategoryTags {
    fn from(entries: Vec<String>) -> Self {
        // Each entry may itself be a comma-separated list
        Self(
            entries
                .iter()
                .flat_map(|entry| Self::parse(entry).0)
                .collect(),
        )
    }
}

impl From<CategoryTags> for Vec<String> {
    fn from(tags: CategoryTags) -> Self {
        tags.0.into_iter().collect()
    }
}

/// Capital-allocation entity whose financing activity is scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: InvestorId,
    #[serde(default)]
    pub types: CategoryTags,
    pub country: String,
    /// Founding date, when known
    #[serde(default, deserialize_with = "super::round::lenient_date")]
    pub launch_date: Option<NaiveDate>,
}

impl Investor {
    /// Create an investor from raw, comma-separated category tags
    pub fn new(id: impl Into<InvestorId>, raw_types: &str, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            types: CategoryTags::parse(raw_types),
            country: country.into(),
            launch_date: None,
        }
    }

    pub fn with_launch_date(mut self, launch_date: NaiveDate) -> Self {
        self.launch_date = Some(launch_date);
        self
    }

    pub fn launch_year(&self) -> Option<Year> {
        self.launch_date.map(|d| d.year())
    }

    /// True if the investor carries the given category token
    pub fn has_category(&self, category: &str) -> bool {
        self.types.contains(category)
    }
}
