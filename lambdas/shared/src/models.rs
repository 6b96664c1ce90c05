//! Shared data models.

use std::fmt;

use crate::{Error, Result};

/// Name of the query string parameter carrying the season year.
pub const YEAR_PARAM: &str = "year";

/// A validated four-digit season year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Season(u16);

impl Season {
    /// Validate the raw `year` query parameter.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let year = raw.map(str::trim).unwrap_or_default();

        if year.is_empty() {
            return Err(Error::Validation(format!(
                "Missing required query parameter: {}",
                YEAR_PARAM
            )));
        }

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Validation(format!("Invalid year: {}", year)));
        }

        year.parse()
            .map(Season)
            .map_err(|_| Error::Validation(format!("Invalid year: {}", year)))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_year() {
        let season = Season::parse(Some(" 2023 ")).unwrap();
        assert_eq!(season, Season(2023));
        assert_eq!(season.to_string(), "2023");
    }

    #[test]
    fn test_missing_year() {
        for raw in [None, Some(""), Some("   ")] {
            match Season::parse(raw) {
                Err(Error::Validation(msg)) => {
                    assert_eq!(msg, "Missing required query parameter: year")
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_year() {
        for raw in ["23", "20233", "20x3", "-202", "2023/../../x", "２０２３"] {
            let err = Season::parse(Some(raw)).unwrap_err();
            assert_eq!(err.status_code(), 400, "{raw}");
        }
    }
}
