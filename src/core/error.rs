use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::core::rates::BandKind;
use crate::core::uk::TaxYear;

/// Rate table operations the store does not support yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Edit,
    Delete,
    Save,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Add => "adding tax data for a year",
            Operation::Edit => "editing tax data for a year",
            Operation::Delete => "deleting tax data for a year",
            Operation::Save => "saving tax data",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaxError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "data for tax year {year} is not available, data is available for the following years: {}",
        display_years(.available)
    )]
    UnsupportedYear {
        year: TaxYear,
        available: Vec<TaxYear>,
    },
    #[error("personal allowance data is missing for tax year {year}, try resetting tax data using -r")]
    MissingData { year: TaxYear },
    #[error(
        "rate {rate}% of the {band} band for tax year {year} is outside 0-100, try resetting tax data using -r"
    )]
    InvalidRate {
        year: TaxYear,
        band: BandKind,
        rate: Decimal,
    },
    #[error("tax for the {band} band of tax year {year} is too large to calculate")]
    Overflow { year: TaxYear, band: BandKind },
    #[error("tax year {year} does not have the {band} band")]
    UnsupportedBand { year: TaxYear, band: BandKind },
    #[error("tax data in {} is corrupt, try resetting tax data using -r", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tax data in {} could not be accessed, try resetting tax data using -r", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not implemented")]
    NotImplemented(Operation),
}

fn display_years(years: &[TaxYear]) -> String {
    years
        .iter()
        .map(|y| y.0.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
