use crate::error::{AllocationError, Result};
use crate::types::{Investment, Investor};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use super::{
    types::{InputColumn, Order, TableKind},
    validator::DataValidator,
};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AllocationError::DataLoading(format!(
                "File {} does not exist",
                path.display()
            )));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| AllocationError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        log::info!("Read {} rows from {}", df.height(), path.display());
        Ok(df)
    }

    /// Investors with their wishlists. One row per wish; repeated names merge
    /// into one investor, kept in order of first appearance.
    pub fn load_investors<P: AsRef<Path>>(path: P) -> Result<Vec<Investor>> {
        let df = Self::load(path)?;
        Self::investors_from_frame(&df)
    }

    pub fn load_orders<P: AsRef<Path>>(path: P) -> Result<Vec<Order>> {
        let df = Self::load(path)?;
        Self::orders_from_frame(&df)
    }

    /// Product id to interest rate in percent.
    pub fn load_product_rates<P: AsRef<Path>>(path: P) -> Result<HashMap<String, f64>> {
        let df = Self::load(path)?;
        Self::product_rates_from_frame(&df)
    }

    /// Reads orders and rates and prices every order as an investment.
    pub fn load_investments<P: AsRef<Path>, Q: AsRef<Path>>(
        customers_path: P,
        products_path: Q,
    ) -> Result<Vec<Investment>> {
        let orders = Self::load_orders(customers_path)?;
        let rates = Self::load_product_rates(products_path)?;
        Self::build_investments(&orders, &rates)
    }

    pub fn investors_from_frame(df: &DataFrame) -> Result<Vec<Investor>> {
        let table = TableKind::Investors;
        let columns = DataValidator::resolve_columns(df, table)?;
        let names = Self::text_column(df, &columns[&InputColumn::Investor])?;
        let products = Self::text_column(df, &columns[&InputColumn::Product])?;
        DataValidator::require_text(&names, InputColumn::Investor, table)?;
        DataValidator::require_text(&products, InputColumn::Product, table)?;

        let mut investors: Vec<Investor> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (name, product) in names.into_iter().flatten().zip(products.into_iter().flatten()) {
            let name = name.trim().to_string();
            let idx = *positions.entry(name.clone()).or_insert_with(|| {
                investors.push(Investor::new(name.clone()));
                investors.len() - 1
            });
            investors[idx].add_wish(product.trim());
        }

        Ok(investors)
    }

    pub fn orders_from_frame(df: &DataFrame) -> Result<Vec<Order>> {
        let table = TableKind::Customers;
        let columns = DataValidator::resolve_columns(df, table)?;
        let customers = Self::text_column(df, &columns[&InputColumn::Customer])?;
        let products = Self::text_column(df, &columns[&InputColumn::Product])?;
        let amounts = Self::number_column(df, &columns[&InputColumn::Amount])?;
        DataValidator::require_text(&customers, InputColumn::Customer, table)?;
        DataValidator::require_text(&products, InputColumn::Product, table)?;
        DataValidator::validate_amounts(&amounts, table)?;

        Ok(customers
            .into_iter()
            .flatten()
            .zip(products.into_iter().flatten())
            .zip(amounts.into_iter().flatten())
            .map(|((customer, product_id), amount)| Order {
                customer: customer.trim().to_string(),
                product_id: product_id.trim().to_string(),
                amount,
            })
            .collect())
    }

    pub fn product_rates_from_frame(df: &DataFrame) -> Result<HashMap<String, f64>> {
        let table = TableKind::Products;
        let columns = DataValidator::resolve_columns(df, table)?;
        let products = Self::text_column(df, &columns[&InputColumn::Product])?;
        let rates = Self::number_column(df, &columns[&InputColumn::Rate])?;
        DataValidator::require_text(&products, InputColumn::Product, table)?;
        DataValidator::validate_amounts(&rates, table)?;

        let mut map = HashMap::new();
        for (product, rate) in products.into_iter().flatten().zip(rates.into_iter().flatten()) {
            if map.insert(product.trim().to_string(), rate).is_some() {
                log::warn!("Product {} listed more than once, keeping the last rate", product.trim());
            }
        }
        Ok(map)
    }

    pub fn build_investments(orders: &[Order], rates: &HashMap<String, f64>) -> Result<Vec<Investment>> {
        orders
            .iter()
            .map(|order| {
                let rate = rates.get(&order.product_id).ok_or_else(|| {
                    AllocationError::DataLoading(format!(
                        "No interest rate for product {} (ordered by {})",
                        order.product_id, order.customer
                    ))
                })?;
                Ok(Investment::new(
                    order.product_id.clone(),
                    *rate,
                    order.amount,
                    order.customer.clone(),
                ))
            })
            .collect()
    }

    /// Accepts `2.5`, ` 2.5 ` and `2.5%`.
    pub fn parse_rate(raw: &str) -> Result<f64> {
        let cleaned = raw.trim().trim_end_matches('%').trim();
        cleaned
            .parse::<f64>()
            .map_err(|_| AllocationError::DataLoading(format!("Invalid number '{}'", raw)))
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
        let column = df.column(name)?.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Numeric columns may arrive as text when values carry a `%` suffix.
    fn number_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
        let column = df.column(name)?;
        match column.dtype() {
            DataType::String => column
                .str()?
                .into_iter()
                .map(|v| v.map(Self::parse_rate).transpose())
                .collect(),
            _ => {
                let column = column.cast(&DataType::Float64)?;
                Ok(column.f64()?.into_iter().collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_investors_merge_by_name() {
        let df = df! {
            "investor" => &["Eagle", "Vulture", "Eagle", "Eagle"],
            "product" => &["P1", "P1", "P2", "P5"],
        }
        .unwrap();

        let investors = CsvConnector::investors_from_frame(&df).unwrap();

        assert_eq!(investors.len(), 2);
        assert_eq!(investors[0].name(), "Eagle");
        assert_eq!(investors[0].wishlist(), &["P1".to_string(), "P2".to_string(), "P5".to_string()]);
        assert_eq!(investors[1].name(), "Vulture");
    }

    #[test]
    fn test_investors_with_unrecognised_name_header() {
        let df = df! {
            "product" => &["P1", "P2", "P3"],
            "holder" => &["Eagle", "Finch", "Eagle"],
        }
        .unwrap();

        let investors = CsvConnector::investors_from_frame(&df).unwrap();

        assert_eq!(investors.len(), 2);
        assert_eq!(investors[0].name(), "Eagle");
        assert_eq!(investors[0].wishlist(), &["P1".to_string(), "P3".to_string()]);
        assert_eq!(investors[1].name(), "Finch");
    }

    #[test]
    fn test_rates_with_percent_suffix() {
        let df = df! {
            "product" => &["P1", "P2"],
            "rate" => &["2.5%", "3.5%"],
        }
        .unwrap();

        let rates = CsvConnector::product_rates_from_frame(&df).unwrap();
        assert_eq!(rates["P1"], 2.5);
        assert_eq!(rates["P2"], 3.5);
    }

    #[test]
    fn test_numeric_rates() {
        let df = df! {
            "product" => &["P1"],
            "rate" => &[2.6],
        }
        .unwrap();

        let rates = CsvConnector::product_rates_from_frame(&df).unwrap();
        assert_eq!(rates["P1"], 2.6);
    }

    #[test]
    fn test_build_investments_needs_rate() {
        let orders = vec![Order {
            customer: "Customer1".to_string(),
            product_id: "P7".to_string(),
            amount: 100.0,
        }];
        let err = CsvConnector::build_investments(&orders, &HashMap::new()).unwrap_err();
        assert!(matches!(err, AllocationError::DataLoading(_)));
    }

    #[test]
    fn test_orders_from_frame() {
        let df = df! {
            "customer" => &["Customer1", "Customer2"],
            "product" => &["P5", "P3"],
            "amount" => &[100000.0, 50000.0],
        }
        .unwrap();

        let orders = CsvConnector::orders_from_frame(&df).unwrap();
        let rates = HashMap::from([("P5".to_string(), 2.6), ("P3".to_string(), 2.1)]);
        let investments = CsvConnector::build_investments(&orders, &rates).unwrap();

        assert_eq!(investments.len(), 2);
        assert_eq!(investments[0].owner(), "Customer1");
        assert!((investments[0].annual_yield() - 2600.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(CsvConnector::parse_rate(" 2.5% ").unwrap(), 2.5);
        assert!(CsvConnector::parse_rate("abc").is_err());
    }
}
