//! Years command - list the tax years in the rate table

use crate::cmd::load_rates;
use crate::core::{Band, BandKind, YearTaxRates};
use crate::money::{format_rate, CurrencyFormat};
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Debug)]
pub struct YearsCommand {
    pub data_file: PathBuf,
    pub currency: CurrencyFormat,
}

/// Row for the years table output
#[derive(Debug, Clone, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Tax Year")]
    pub tax_year: String,

    #[tabled(rename = "Allowance")]
    pub allowance: String,

    #[tabled(rename = "Starter")]
    pub starter: String,

    #[tabled(rename = "Basic")]
    pub basic: String,

    #[tabled(rename = "Intermediate")]
    pub intermediate: String,

    #[tabled(rename = "Higher")]
    pub higher: String,

    #[tabled(rename = "Top")]
    pub top: String,
}

impl YearsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let table = load_rates(&self.data_file)?;
        let rows: Vec<YearRow> = table
            .iter()
            .map(|(year, rates)| YearRow {
                tax_year: year.display(),
                allowance: rates
                    .personal_allowance
                    .map_or("missing".to_string(), |a| self.amount(a)),
                starter: self.band_cell(rates, BandKind::Starter),
                basic: self.band_cell(rates, BandKind::Basic),
                intermediate: self.band_cell(rates, BandKind::Intermediate),
                higher: self.band_cell(rates, BandKind::Higher),
                top: self.band_cell(rates, BandKind::Top),
            })
            .collect();

        if rows.is_empty() {
            println!("No tax years found in {}", self.data_file.display());
            return Ok(());
        }

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }

    fn amount(&self, amount: u64) -> String {
        self.currency.format(amount.into())
    }

    fn band_cell(&self, rates: &YearTaxRates, kind: BandKind) -> String {
        rates.band(kind).map_or("-".to_string(), |band| self.describe(band))
    }

    fn describe(&self, band: &Band) -> String {
        let end = band
            .range_end
            .map_or("∞".to_string(), |end| self.amount(end));
        format!(
            "{}% {}-{}",
            format_rate(band.rate),
            self.amount(band.range_start),
            end
        )
    }
}
