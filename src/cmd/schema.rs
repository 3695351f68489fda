//! Schema command - print the expected rate table format

use crate::core::{Band, RateTable, SchemaField, YearTaxRates};
use clap::ValueEnum;
use schemars::schema_for;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the rate table file
    JsonSchema,
    /// Field descriptions for each tax year record
    Fields,
}

#[derive(Debug)]
pub struct SchemaCommand {
    pub format: SchemaFormat,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Fields => {
                self.print_fields();
                Ok(())
            }
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(RateTable);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_fields(&self) {
        println!("Rate Table Format");
        println!("=================");
        println!();
        println!("A JSON object keyed by tax year (e.g. \"2018\" for 2018/19), each value:");
        println!();
        print_field_list(YearTaxRates::field_schema());
        println!();
        println!("Each band is either null or an object with:");
        println!();
        print_field_list(Band::field_schema());
    }
}

fn print_field_list(fields: &[SchemaField]) {
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        println!("{:20} ({:8})  {}", field.name, req, field.description);
    }
}
