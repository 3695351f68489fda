use rust_decimal_macros::dec;

use crate::core::rates::{Band, RateTable, YearTaxRates};
use crate::core::uk::TaxYear;

pub const DEFAULT_DATA_FILE: &str = "tax_data.json";

/// Built-in rates written by `--reset`
pub fn default_rate_table() -> RateTable {
    [
        (
            TaxYear(2015),
            YearTaxRates {
                personal_allowance: Some(10600),
                basic_rate: Some(Band::bounded(dec!(20), 0, 31785)),
                higher_rate: Some(Band::bounded(dec!(40), 31786, 150000)),
                ..Default::default()
            },
        ),
        (
            TaxYear(2016),
            YearTaxRates {
                personal_allowance: Some(11000),
                basic_rate: Some(Band::bounded(dec!(20), 0, 32000)),
                higher_rate: Some(Band::bounded(dec!(40), 32001, 150000)),
                ..Default::default()
            },
        ),
        (
            TaxYear(2017),
            YearTaxRates {
                personal_allowance: Some(11500),
                basic_rate: Some(Band::bounded(dec!(20), 0, 31500)),
                higher_rate: Some(Band::bounded(dec!(40), 31501, 150000)),
                ..Default::default()
            },
        ),
        (
            TaxYear(2018),
            YearTaxRates {
                personal_allowance: Some(11850),
                starter_rate: Some(Band::bounded(dec!(19), 0, 2000)),
                basic_rate: Some(Band::bounded(dec!(20), 2001, 12150)),
                intermediate_rate: Some(Band::bounded(dec!(21), 12151, 31580)),
                higher_rate: Some(Band::bounded(dec!(40), 31581, 150000)),
                top_rate: Some(Band::unbounded(dec!(46), 150000)),
            },
        ),
    ]
    .into_iter()
    .collect()
}
