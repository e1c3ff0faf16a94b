use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::AllocationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the input tables live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// `investor,product` rows, one per wish.
    pub investors_csv: PathBuf,
    /// `customer,product,amount` rows, one per order.
    pub customers_csv: PathBuf,
    /// `product,rate` rows; the rate may carry a trailing `%`.
    pub products_csv: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            investors_csv: PathBuf::from("data/investors.csv"),
            customers_csv: PathBuf::from("data/customers.csv"),
            products_csv: PathBuf::from("data/products.csv"),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), AllocationError> {
        for (name, path) in [
            ("investors_csv", &self.investors_csv),
            ("customers_csv", &self.customers_csv),
            ("products_csv", &self.products_csv),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AllocationError::Configuration(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Data".to_string(),
            fields: vec![
                FieldManifest::new(
                    "investors_csv",
                    "path",
                    serde_json::json!("data/investors.csv"),
                    "Investor wishlist table",
                ),
                FieldManifest::new(
                    "customers_csv",
                    "path",
                    serde_json::json!("data/customers.csv"),
                    "Customer order table",
                ),
                FieldManifest::new(
                    "products_csv",
                    "path",
                    serde_json::json!("data/products.csv"),
                    "Product interest rate table",
                ),
            ],
        }
    }
}
