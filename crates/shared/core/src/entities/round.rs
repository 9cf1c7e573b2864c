use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::{CompanyId, InvestorId};
use crate::values::{Amount, Year};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Financing transaction between an investor and a target company
///
/// Immutable historical record from the ledger snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub investor_id: InvestorId,
    pub company_id: CompanyId,
    /// Missing amounts count as zero
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<Amount>,
    /// Rounds without a date cannot be placed in any window
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    pub round_type: String,
}

impl Round {
    pub fn new(
        investor_id: impl Into<InvestorId>,
        company_id: impl Into<CompanyId>,
        amount: Option<Amount>,
        date: Option<NaiveDate>,
        round_type: impl Into<String>,
    ) -> Self {
        Self {
            investor_id: investor_id.into(),
            company_id: company_id.into(),
            amount,
            date,
            round_type: round_type.into(),
        }
    }

    /// Create a round from a raw ledger date string (see [`parse_round_date`])
    pub fn with_raw_date(
        investor_id: impl Into<InvestorId>,
        company_id: impl Into<CompanyId>,
        amount: Option<Amount>,
        raw_date: &str,
        round_type: impl Into<String>,
    ) -> Self {
        Self::new(
            investor_id,
            company_id,
            amount,
            parse_round_date(raw_date),
            round_type,
        )
    }

    /// Calendar year of the transaction, if dated
    pub fn year(&self) -> Option<Year> {
        self.date.map(|d| d.year())
    }

    /// Amount used for aggregation: missing or negative amounts count as zero
    pub fn effective_amount(&self) -> Amount {
        match self.amount {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => Decimal::ZERO,
        }
    }

    /// Returns true if the recorded amount is negative
    pub fn has_negative_amount(&self) -> bool {
        self.amount.is_some_and(|a| a < Decimal::ZERO)
    }
}

/// Parse a ledger date string
///
/// Accepted shapes: `YYYY-MM-DD`, `YYYY`, `MM/YYYY`, `MM-YYYY` and
/// `mon/YYYY` (English month abbreviation). Month-only and year-only dates
/// resolve to the first day of the period. Anything else is unparseable.
pub fn parse_round_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = raw.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    let (month, year) = raw.split_once(['/', '-'])?;
    let year = year.trim();
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month = parse_month(month.trim())?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Month number from `1`..`12`, a three-letter abbreviation or a full English name
fn parse_month(month: &str) -> Option<u32> {
    if let Ok(n) = month.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lowered = month.to_lowercase();
    MONTHS
        .iter()
        .position(|name| *name == lowered || name[..3] == lowered)
        .map(|i| i as u32 + 1)
}

/// Ledger date cell as it appears in a serialized row
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Year(i64),
    Malformed(IgnoredAny),
}

/// Dates go through [`parse_round_date`]; anything unparseable leaves the round undated
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawDate>::deserialize(deserializer)? {
        Some(RawDate::Text(raw)) => parse_round_date(&raw),
        Some(RawDate::Year(year)) => i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        Some(RawDate::Malformed(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Value(Amount),
    Malformed(IgnoredAny),
}

/// Unreadable amounts are treated as missing
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Value(amount)) => Some(amount),
        Some(RawAmount::Malformed(_)) | None => None,
    })
}
