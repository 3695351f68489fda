use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::core::error::TaxError;

/// UK Tax Year (runs 6 April to 5 April)
/// The year value represents the start year (e.g., 2016 = 2016/17 tax year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Display as "2016/17" format
    pub fn display(&self) -> String {
        format!("{}/{:02}", self.0, (self.0 + 1) % 100)
    }

    /// Current calendar year on the local clock
    pub fn current() -> i32 {
        chrono::Local::now().year()
    }

    /// Parse a user supplied year, which must fall in `1..=latest`
    pub fn parse_bounded(value: &str, latest: i32) -> Result<TaxYear, TaxError> {
        let year: i32 = value
            .trim()
            .parse()
            .map_err(|_| TaxError::InvalidInput(format!("{value} is an invalid year value")))?;
        if year < 1 || year > latest {
            return Err(TaxError::InvalidInput(format!(
                "{value} is an invalid year value, expected a year between 1 and {latest}"
            )));
        }
        Ok(TaxYear(year))
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// `clap` value parser for the tax year argument
pub fn parse_tax_year(value: &str) -> Result<TaxYear, TaxError> {
    TaxYear::parse_bounded(value, TaxYear::current())
}

/// `clap` value parser for the gross income argument
pub fn parse_salary(value: &str) -> Result<u64, TaxError> {
    let salary: i64 = value
        .trim()
        .parse()
        .map_err(|_| TaxError::InvalidInput(format!("{value} is an invalid salary value")))?;
    if salary <= 0 {
        return Err(TaxError::InvalidInput(format!(
            "{value} is an invalid salary value, expected a positive amount"
        )));
    }
    Ok(salary as u64)
}
