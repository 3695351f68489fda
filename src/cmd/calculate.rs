//! Calculate command - tax due for a salary with a per band breakdown

use crate::cmd::load_rates;
use crate::core::{allocate, allocate_band, BandKind, TaxYear};
use crate::money::CurrencyFormat;
use crate::render::{RenderConfig, Renderer};
use std::path::PathBuf;

#[derive(Debug)]
pub struct CalculateCommand {
    pub data_file: PathBuf,
    pub tax_year: TaxYear,
    pub gross_income: u64,
    /// Only report this band
    pub band: Option<BandKind>,
    pub currency: CurrencyFormat,
    pub json: bool,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let table = load_rates(&self.data_file)?;
        let rates = table.year(self.tax_year)?;
        let renderer = Renderer::new(RenderConfig {
            currency: self.currency.clone(),
        });

        if let Some(kind) = self.band {
            let allocation = allocate_band(self.tax_year, rates, self.gross_income, kind)?;
            if self.json {
                println!("{}", renderer.render_band_json(&allocation)?);
            } else {
                print!("{}", renderer.render_band(&allocation));
            }
            return Ok(());
        }

        let allocation = allocate(self.tax_year, rates, self.gross_income)?;
        log::debug!(
            "Allocated {} of {} taxable income",
            allocation.total_allocated(),
            allocation.taxable_income
        );

        if self.json {
            println!("{}", renderer.render_json(&allocation)?);
        } else {
            print!("{}", renderer.render(&allocation));
        }
        Ok(())
    }
}
