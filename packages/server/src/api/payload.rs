//! Request payload helpers shared by the endpoint modules

use serde::Deserialize;

/// An integer that clients may send either as a JSON number or as a numeric
/// string (`3` or `"3"`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Number(i64),
    Text(String),
}

impl LenientInt {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// The `page` query parameter, 1-indexed
///
/// Absent, unparseable and non-positive values all mean the first page.
pub fn page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}
