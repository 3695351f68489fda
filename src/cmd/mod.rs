pub mod calculate;
pub mod schema;
pub mod years;

use crate::core::RateTable;
use crate::store::RateStore;
use anyhow::Context;
use std::path::Path;

/// Load the rate table from `path`
pub fn load_rates(path: &Path) -> anyhow::Result<RateTable> {
    RateStore::new(path)
        .load()
        .context("Failed to load tax data")
}
