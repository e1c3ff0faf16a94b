use serde::{Deserialize, Serialize};

/// Columns the input tables are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputColumn {
    Investor,
    Customer,
    Product,
    Amount,
    Rate,
}

impl InputColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::Customer => "customer",
            Self::Product => "product",
            Self::Amount => "amount",
            Self::Rate => "rate",
        }
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Investor => vec!["investor", "Investor", "funder", "Funder", "name", "Name"],
            Self::Customer => vec!["customer", "Customer", "borrower", "Borrower", "name", "Name"],
            Self::Product => vec!["product", "Product", "product_id", "ProductID", "product_type"],
            Self::Amount => vec!["amount", "Amount", "price", "Price", "value"],
            Self::Rate => vec!["rate", "Rate", "interest", "Interest", "interest_rate"],
        }
    }
}

/// The three input tables and their column layout, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Investors,
    Customers,
    Products,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investors => "investors",
            Self::Customers => "customers",
            Self::Products => "products",
        }
    }

    /// Expected columns. When a header matches none of a column's aliases,
    /// the column is taken by this position instead.
    pub fn columns(&self) -> Vec<InputColumn> {
        match self {
            Self::Investors => vec![InputColumn::Investor, InputColumn::Product],
            Self::Customers => vec![InputColumn::Customer, InputColumn::Product, InputColumn::Amount],
            Self::Products => vec![InputColumn::Product, InputColumn::Rate],
        }
    }
}

/// A customer's request to borrow `amount` under a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer: String,
    pub product_id: String,
    pub amount: f64,
}
