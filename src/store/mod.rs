//! Rate table file - load it, or reset it to the built-in defaults

pub mod defaults;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::core::error::{Operation, TaxError};
use crate::core::rates::RateTable;

/// Changes to the rate table file that are not supported yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddYear,
    EditYear,
    DeleteYear,
    Save,
}

impl Mutation {
    fn operation(self) -> Operation {
        match self {
            Mutation::AddYear => Operation::Add,
            Mutation::EditYear => Operation::Edit,
            Mutation::DeleteYear => Operation::Delete,
            Mutation::Save => Operation::Save,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateStore {
    path: PathBuf,
}

impl RateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<RateTable, TaxError> {
        log::debug!("Loading tax data from {}", self.path.display());
        let file = File::open(&self.path).map_err(|source| TaxError::StoreUnavailable {
            path: self.path.clone(),
            source,
        })?;
        let table: RateTable = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            TaxError::CorruptStore {
                path: self.path.clone(),
                source,
            }
        })?;
        log::debug!("Loaded tax data for {} years", table.years().len());
        Ok(table)
    }

    /// Overwrite the file with the default rate table
    pub fn reset(&self) -> Result<(), TaxError> {
        log::debug!("Resetting tax data in {} from defaults", self.path.display());
        let json = serde_json::to_string_pretty(&defaults::default_rate_table()).map_err(
            |source| TaxError::CorruptStore {
                path: self.path.clone(),
                source,
            },
        )?;
        fs::write(&self.path, json + "\n").map_err(|source| TaxError::StoreUnavailable {
            path: self.path.clone(),
            source,
        })
    }

    pub fn apply(&self, mutation: Mutation) -> Result<(), TaxError> {
        log::debug!("Requested {:?} on {}", mutation, self.path.display());
        Err(TaxError::NotImplemented(mutation.operation()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::uk::TaxYear;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    fn temp_store() -> RateStore {
        let n = NEXT.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "incometax-store-{}-{}.json",
            std::process::id(),
            n
        ));
        let _ = fs::remove_file(&path);
        RateStore::new(path)
    }

    #[test]
    fn reset_then_load_gives_defaults() {
        let store = temp_store();
        store.reset().unwrap();
        assert_eq!(store.load().unwrap(), defaults::default_rate_table());
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn reset_is_idempotent() {
        let store = temp_store();
        store.reset().unwrap();
        let once = fs::read_to_string(store.path()).unwrap();
        store.reset().unwrap();
        let twice = fs::read_to_string(store.path()).unwrap();
        assert_eq!(once, twice);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn reset_writes_string_year_keys() {
        let store = temp_store();
        store.reset().unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(json["2016"]["personal_allowance"], 11000);
        assert_eq!(json["2018"]["top_rate"]["range_end"], serde_json::Value::Null);
        assert_eq!(json["2015"]["starter_rate"], serde_json::Value::Null);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn missing_file_is_unavailable() {
        let store = temp_store();
        assert!(matches!(
            store.load(),
            Err(TaxError::StoreUnavailable { .. })
        ));
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let store = temp_store();
        fs::write(store.path(), "{ not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, TaxError::CorruptStore { .. }));
        assert!(err.to_string().contains("-r"));
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn file_with_missing_allowance_still_loads() {
        let store = temp_store();
        fs::write(store.path(), r#"{"2016": {"foo": "bar"}}"#).unwrap();
        let table = store.load().unwrap();
        assert_eq!(table.year(TaxYear(2016)).unwrap().personal_allowance, None);
        fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn mutations_are_not_implemented() {
        let store = temp_store();
        for (mutation, operation) in [
            (Mutation::AddYear, Operation::Add),
            (Mutation::EditYear, Operation::Edit),
            (Mutation::DeleteYear, Operation::Delete),
            (Mutation::Save, Operation::Save),
        ] {
            match store.apply(mutation) {
                Err(TaxError::NotImplemented(op)) => assert_eq!(op, operation),
                other => panic!("expected NotImplemented, got {other:?}"),
            }
        }
    }
}
