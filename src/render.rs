//! Tax breakdown output

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::allocate::{AllocationResult, BandAllocation};
use crate::core::rates::BandKind;
use crate::money::{format_rate, CurrencyFormat};

#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub currency: CurrencyFormat,
}

pub struct Renderer {
    config: RenderConfig,
}

/// Breakdown data for JSON output
#[derive(Debug, Serialize)]
struct BreakdownData {
    tax_year: String,
    gross_salary: String,
    personal_allowance: String,
    taxable_income: String,
    bands: Vec<BandData>,
    total_tax_due: String,
}

#[derive(Debug, Serialize)]
struct BandData {
    band: BandKind,
    label: &'static str,
    rate_pct: String,
    allocated: String,
    tax: String,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Renderer { config }
    }

    /// Text breakdown, listing only the bands that received income
    pub fn render(&self, allocation: &AllocationResult) -> String {
        let currency = &self.config.currency;
        let bands: String = allocation
            .bands
            .iter()
            .filter(|b| b.allocated > Decimal::ZERO)
            .map(|b| self.render_band(b))
            .collect();

        format!(
            "Tax Year: {}\n\n\
             Gross Salary: {}\n\
             Personal Allowance: {}\n\
             Taxable Income: {}\n\n\
             {}\n\
             Total Tax Due: {}\n",
            allocation.tax_year,
            currency.format(allocation.gross_salary),
            currency.format(allocation.personal_allowance),
            currency.format(allocation.taxable_income),
            bands,
            currency.format(allocation.total_tax())
        )
    }

    /// Single band line, e.g. "Basic Rate: £19,000.00 @ 20% = £3,800.00"
    pub fn render_band(&self, band: &BandAllocation) -> String {
        let currency = &self.config.currency;
        format!(
            "{}: {} @ {}% = {}\n",
            band.band.label(),
            currency.format(band.allocated),
            format_rate(band.rate),
            currency.format(band.tax)
        )
    }

    pub fn render_json(&self, allocation: &AllocationResult) -> serde_json::Result<String> {
        let data = BreakdownData {
            tax_year: allocation.tax_year.display(),
            gross_salary: format!("{:.2}", allocation.gross_salary),
            personal_allowance: format!("{:.2}", allocation.personal_allowance),
            taxable_income: format!("{:.2}", allocation.taxable_income),
            bands: allocation.bands.iter().map(BandData::from).collect(),
            total_tax_due: format!("{:.2}", allocation.total_tax()),
        };
        serde_json::to_string_pretty(&data)
    }

    /// Single band in the same shape as the bands of `render_json`
    pub fn render_band_json(&self, band: &BandAllocation) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&BandData::from(band))
    }
}

impl From<&BandAllocation> for BandData {
    fn from(b: &BandAllocation) -> Self {
        BandData {
            band: b.band,
            label: b.band.label(),
            rate_pct: format_rate(b.rate),
            allocated: format!("{:.2}", b.allocated),
            tax: format!("{:.2}", b.tax),
        }
    }
}
