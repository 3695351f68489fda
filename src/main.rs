use clap::{Parser, ValueEnum};
use log::LevelFilter;
use num_format::Locale;
use std::path::PathBuf;

use crate::cmd::calculate::CalculateCommand;
use crate::cmd::schema::{SchemaCommand, SchemaFormat};
use crate::cmd::years::YearsCommand;
use crate::core::{BandKind, TaxError, TaxYear};
use crate::money::CurrencyFormat;
use crate::store::defaults::DEFAULT_DATA_FILE;
use crate::store::{Mutation, RateStore};

mod cmd;
mod core;
mod money;
mod render;
mod store;

/// Calculate the amount of Income Tax due in a given tax year for a given
/// salary and provide a breakdown of the tax bands.
#[derive(Parser, Debug)]
#[command(name = "incometax", version, about, long_about = None)]
struct Cli {
    /// Tax year for which to calculate tax (e.g. 2018 for 2018/19)
    #[arg(
        value_parser = crate::core::uk::parse_tax_year,
        allow_negative_numbers = true,
        required_unless_present_any = ["reset", "list_years", "schema", "add_year", "edit_year", "delete_year", "save"]
    )]
    tax_year: Option<TaxYear>,

    /// Gross income for the year
    #[arg(
        value_parser = crate::core::uk::parse_salary,
        allow_negative_numbers = true,
        required_unless_present_any = ["reset", "list_years", "schema", "add_year", "edit_year", "delete_year", "save"]
    )]
    gross_income: Option<u64>,

    /// Increase output verbosity
    #[arg(short, long)]
    verbose: bool,

    /// Reset tax data to defaults
    #[arg(short, long)]
    reset: bool,

    /// Add tax data for a year
    #[arg(short, long)]
    add_year: bool,

    /// Edit tax data for a year
    #[arg(short, long)]
    edit_year: bool,

    /// Delete tax data for a year
    #[arg(short, long)]
    delete_year: bool,

    /// Save tax data
    #[arg(short, long)]
    save: bool,

    /// List the tax years and bands available in the tax data
    #[arg(short, long)]
    list_years: bool,

    /// Print the expected format of the tax data file
    #[arg(long, value_enum)]
    schema: Option<SchemaFormat>,

    /// Only show the breakdown for one band
    #[arg(short, long, value_enum)]
    band: Option<BandArg>,

    /// Tax data file
    #[arg(short = 'f', long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Locale used for number grouping (e.g. en, en-GB, de)
    #[arg(long, default_value = "en", value_parser = parse_locale)]
    locale: Locale,

    /// Currency symbol printed before amounts
    #[arg(long, default_value = "£")]
    currency: String,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BandArg {
    Starter,
    Basic,
    Intermediate,
    Higher,
    Top,
}

impl From<BandArg> for BandKind {
    fn from(arg: BandArg) -> Self {
        match arg {
            BandArg::Starter => BandKind::Starter,
            BandArg::Basic => BandKind::Basic,
            BandArg::Intermediate => BandKind::Intermediate,
            BandArg::Higher => BandKind::Higher,
            BandArg::Top => BandKind::Top,
        }
    }
}

fn parse_locale(value: &str) -> Result<Locale, TaxError> {
    Locale::from_name(value)
        .map_err(|_| TaxError::InvalidInput(format!("{value} is not a supported locale")))
}

impl Cli {
    fn exec(&self) -> anyhow::Result<()> {
        let store = RateStore::new(&self.data_file);

        if self.reset {
            store.reset()?;
            println!("Income tax data in {} has been reset.", store.path().display());
            return Ok(());
        }

        if let Some(mutation) = self.mutation() {
            store.apply(mutation)?;
            return Ok(());
        }

        if let Some(format) = self.schema {
            return SchemaCommand { format }.exec();
        }

        let currency = CurrencyFormat::new(self.locale, self.currency.clone());

        if self.list_years {
            return YearsCommand {
                data_file: self.data_file.clone(),
                currency,
            }
            .exec();
        }

        let (Some(tax_year), Some(gross_income)) = (self.tax_year, self.gross_income) else {
            anyhow::bail!("TAX_YEAR and GROSS_INCOME are required");
        };

        CalculateCommand {
            data_file: self.data_file.clone(),
            tax_year,
            gross_income,
            band: self.band.map(BandKind::from),
            currency,
            json: self.json,
        }
        .exec()
    }

    fn mutation(&self) -> Option<Mutation> {
        if self.add_year {
            Some(Mutation::AddYear)
        } else if self.edit_year {
            Some(Mutation::EditYear)
        } else if self.delete_year {
            Some(Mutation::DeleteYear)
        } else if self.save {
            Some(Mutation::Save)
        } else {
            None
        }
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    log::debug!("Initializing income tax calculator");

    if let Err(err) = cli.exec() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
