use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Two-digit years at or above this value resolve to the 1900s.
pub const DEFAULT_CENTURY_PIVOT: u8 = 50;

/// A `YYMMDD` date as printed in the MRZ.
///
/// Components that are not two decimal digits are `None`. The raw six
/// characters are kept verbatim so that `to_mrz` reproduces malformed
/// dates exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MrzDate {
    pub year: Option<u8>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    raw: String,
}

impl MrzDate {
    pub fn new(year: u8, month: u8, day: u8) -> Self {
        MrzDate {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            raw: format!("{:02}{:02}{:02}", year, month, day),
        }
    }

    /// Parses a six character window. Never fails: unparseable
    /// components become `None`.
    pub fn parse(raw: &str) -> Self {
        let chars: Vec<char> = raw.chars().collect();
        let component = |index: usize| -> Option<u8> {
            let group = chars.get(index * 2..index * 2 + 2)?;
            match (group[0].to_digit(10), group[1].to_digit(10)) {
                (Some(tens), Some(units)) => Some((tens * 10 + units) as u8),
                _ => None,
            }
        };

        MrzDate {
            year: component(0),
            month: component(1),
            day: component(2),
            raw: raw.to_string(),
        }
    }

    /// Month in 1..=12 and day in 1..=31. Month lengths and leap years
    /// are not checked.
    pub fn is_date_valid(&self) -> bool {
        match (self.year, self.month, self.day) {
            (Some(year), Some(month), Some(day)) => {
                year <= 99 && (1..=12).contains(&month) && (1..=31).contains(&day)
            }
            _ => false,
        }
    }

    pub fn to_mrz(&self) -> &str {
        &self.raw
    }

    /// Resolves the two-digit year against `pivot` and checks the result
    /// is a real calendar date.
    pub fn to_naive_date(&self, pivot: u8) -> Option<NaiveDate> {
        if !self.is_date_valid() {
            return None;
        }
        let year = i32::from(self.year?);
        let full_year = if year >= i32::from(pivot) { 1900 + year } else { 2000 + year };
        NaiveDate::from_ymd_opt(full_year, u32::from(self.month?), u32::from(self.day?))
    }
}

impl fmt::Display for MrzDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let part = |value: Option<u8>| value.map_or_else(|| "-1".to_string(), |v| v.to_string());
        write!(f, "{}/{}/{}", part(self.day), part(self.month), part(self.year))
    }
}
