use std::collections::BTreeMap;

use incometax_derive::FieldSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::error::TaxError;
use crate::core::schema::SchemaField;
use crate::core::uk::TaxYear;

/// Income tax band, in the order income flows through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandKind {
    Starter,
    Basic,
    Intermediate,
    Higher,
    Top,
}

impl BandKind {
    pub const ALL: [BandKind; 5] = [
        BandKind::Starter,
        BandKind::Basic,
        BandKind::Intermediate,
        BandKind::Higher,
        BandKind::Top,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BandKind::Starter => "Starter Rate",
            BandKind::Basic => "Basic Rate",
            BandKind::Intermediate => "Intermediate Rate",
            BandKind::Higher => "Higher Rate",
            BandKind::Top => "Top Rate",
        }
    }
}

impl std::fmt::Display for BandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous income range taxed at a fixed rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct Band {
    /// Rate in percent (0-100)
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub rate: Decimal,
    /// Start of the band, relative to the taxable income
    pub range_start: u64,
    /// End of the band, null when the band has no upper limit
    pub range_end: Option<u64>,
}

impl Band {
    pub fn bounded(rate: Decimal, range_start: u64, range_end: u64) -> Self {
        Band {
            rate,
            range_start,
            range_end: Some(range_end),
        }
    }

    pub fn unbounded(rate: Decimal, range_start: u64) -> Self {
        Band {
            rate,
            range_start,
            range_end: None,
        }
    }

    /// Amount of income the band can hold, `None` when unbounded.
    /// Inverted ranges hold nothing.
    pub fn width(&self) -> Option<u64> {
        self.range_end
            .map(|end| end.saturating_sub(self.range_start))
    }
}

/// Personal allowance and bands for a single tax year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct YearTaxRates {
    /// Income below which no tax is owed
    #[serde(default)]
    #[field_schema(required)]
    pub personal_allowance: Option<u64>,
    /// Starter rate band
    #[serde(default)]
    pub starter_rate: Option<Band>,
    /// Basic rate band
    #[serde(default)]
    pub basic_rate: Option<Band>,
    /// Intermediate rate band
    #[serde(default)]
    pub intermediate_rate: Option<Band>,
    /// Higher rate band
    #[serde(default)]
    pub higher_rate: Option<Band>,
    /// Top rate band, usually without an upper limit
    #[serde(default)]
    pub top_rate: Option<Band>,
}

impl YearTaxRates {
    pub fn band(&self, kind: BandKind) -> Option<&Band> {
        match kind {
            BandKind::Starter => self.starter_rate.as_ref(),
            BandKind::Basic => self.basic_rate.as_ref(),
            BandKind::Intermediate => self.intermediate_rate.as_ref(),
            BandKind::Higher => self.higher_rate.as_ref(),
            BandKind::Top => self.top_rate.as_ref(),
        }
    }

    /// Present bands in canonical order
    pub fn bands(&self) -> impl Iterator<Item = (BandKind, &Band)> + '_ {
        BandKind::ALL
            .into_iter()
            .filter_map(move |kind| self.band(kind).map(|band| (kind, band)))
    }

    /// Every present band must have a rate between 0 and 100 percent
    pub fn check_rates(&self, year: TaxYear) -> Result<(), TaxError> {
        match self
            .bands()
            .find(|(_, band)| band.rate < Decimal::ZERO || band.rate > Decimal::ONE_HUNDRED)
        {
            Some((kind, band)) => Err(TaxError::InvalidRate {
                year,
                band: kind,
                rate: band.rate,
            }),
            None => Ok(()),
        }
    }
}

/// Rate table keyed by tax year, persisted as `{"2016": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<i32, YearTaxRates>);

impl RateTable {
    pub fn years(&self) -> Vec<TaxYear> {
        self.0.keys().copied().map(TaxYear).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaxYear, &YearTaxRates)> + '_ {
        self.0.iter().map(|(year, rates)| (TaxYear(*year), rates))
    }

    /// Rates for the given year
    pub fn year(&self, year: TaxYear) -> Result<&YearTaxRates, TaxError> {
        self.0.get(&year.0).ok_or_else(|| TaxError::UnsupportedYear {
            year,
            available: self.years(),
        })
    }
}

impl FromIterator<(TaxYear, YearTaxRates)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (TaxYear, YearTaxRates)>>(iter: I) -> Self {
        RateTable(iter.into_iter().map(|(year, rates)| (year.0, rates)).collect())
    }
}
