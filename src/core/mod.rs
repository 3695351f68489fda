pub mod allocate;
pub mod error;
pub mod rates;
pub mod schema;
pub mod uk;

// Flat public surface for domain types and functions.
pub use allocate::{allocate, allocate_band};
pub use error::TaxError;
pub use rates::{Band, BandKind, RateTable, YearTaxRates};
pub use schema::SchemaField;
pub use uk::TaxYear;
