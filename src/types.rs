use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A fixed-amount product waiting for exactly one holder.
///
/// Immutable once built. The owner is the borrower the money goes to and is
/// only carried for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    product_id: String,
    rate: f64,   // Percent, e.g. 2.5 means 2.5%
    amount: f64, // Principal
    owner: String,
}

impl Investment {
    pub fn new(
        product_id: impl Into<String>,
        rate: f64,
        amount: f64,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            rate,
            amount,
            owner: owner.into(),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Money earned per year by whoever holds this investment.
    pub fn annual_yield(&self) -> f64 {
        self.rate / 100.0 * self.amount
    }

    /// Greedy processing order: largest principal first, higher rate breaks ties.
    pub fn allocation_order(a: &Investment, b: &Investment) -> Ordering {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| b.rate.total_cmp(&a.rate))
    }
}

impl fmt::Display for Investment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The product ID is {}, the amount invested is {:.2}, the interest rate is {:.2} percent. The borrower is {}.",
            self.product_id, self.amount, self.rate, self.owner
        )
    }
}

/// Someone willing to hold investments of the product types on their wishlist.
///
/// The wishlist is a multiset: listing a product twice means the investor
/// takes up to two investments of that product. `annual_yield` is kept in
/// step with `investments` on every assignment so comparisons stay O(1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    name: String,
    wishlist: Vec<String>,
    investments: Vec<Investment>,
    annual_yield: f64,
}

impl Investor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wishlist: Vec::new(),
            investments: Vec::new(),
            annual_yield: 0.0,
        }
    }

    pub fn with_wishlist<I, S>(name: impl Into<String>, wishlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut investor = Self::new(name);
        investor.wishlist = wishlist.into_iter().map(Into::into).collect();
        investor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wishlist(&self) -> &[String] {
        &self.wishlist
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn annual_yield(&self) -> f64 {
        self.annual_yield
    }

    pub fn add_wish(&mut self, product_id: impl Into<String>) {
        self.wishlist.push(product_id.into());
    }

    pub fn wants(&self, product_id: &str) -> bool {
        self.wishlist.iter().any(|wish| wish == product_id)
    }

    /// Removes a single occurrence of `product_id`. Returns false if it was not wished for.
    pub fn remove_wish(&mut self, product_id: &str) -> bool {
        match self.wishlist.iter().position(|wish| wish == product_id) {
            Some(idx) => {
                self.wishlist.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn add_investment(&mut self, investment: Investment) {
        self.annual_yield += investment.annual_yield();
        self.investments.push(investment);
    }
}
