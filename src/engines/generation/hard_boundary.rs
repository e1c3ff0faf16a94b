//! Fitness of the hard-boundary encoding.
//!
//! Fitness is the population standard deviation of every investor's average
//! yield per held investment. Investors holding nothing count as 0, so
//! leaving investments unassigned skews the distribution like any other
//! imbalance. An investor holding a product they did not wish for (or more
//! of it than they wished for) scores a large negative average instead,
//! and each further offender in the same evaluation scores lower still.

use crate::engines::allocation::context::AllocationContext;
use crate::engines::metrics::DispersionMetrics;
use crate::types::{Investment, Investor};

/// Escalating penalty for infeasible investors within one evaluation.
///
/// The `k`-th offender (0-based) scores `base + k * increment` per held investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltySchedule {
    pub base: f64,
    pub increment: f64,
}

impl Default for PenaltySchedule {
    fn default() -> Self {
        Self {
            base: -5000.0,
            increment: -5000.0,
        }
    }
}

impl PenaltySchedule {
    pub fn at(&self, violations: usize) -> f64 {
        self.base + self.increment * violations as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    pub valid: bool,
}

pub fn evaluate(slots: &[i32], context: &AllocationContext, penalty: &PenaltySchedule) -> Evaluation {
    let mut holdings: Vec<Vec<&Investment>> = vec![Vec::new(); context.investor_count()];
    for (investment_idx, &gene) in slots.iter().enumerate() {
        let (Ok(investor_idx), Some(investment)) =
            (usize::try_from(gene), context.investment(investment_idx))
        else {
            continue;
        };
        if let Some(held) = holdings.get_mut(investor_idx) {
            held.push(investment);
        }
    }

    // Investors are visited in index order, which fixes who gets the harsher penalties.
    let mut violations = 0;
    let averages: Vec<f64> = context
        .investors()
        .iter()
        .zip(&holdings)
        .map(|(investor, held)| average_yield(investor, held, penalty, &mut violations))
        .collect();

    Evaluation {
        fitness: DispersionMetrics::std_dev(&averages),
        valid: violations == 0,
    }
}

fn average_yield(
    investor: &Investor,
    held: &[&Investment],
    penalty: &PenaltySchedule,
    violations: &mut usize,
) -> f64 {
    if held.is_empty() {
        return 0.0;
    }

    let count = held.len() as f64;
    let mut wishlist: Vec<&str> = investor.wishlist().iter().map(String::as_str).collect();
    let mut sum = 0.0;

    for investment in held {
        match wishlist.iter().position(|&wish| wish == investment.product_id()) {
            Some(pos) => {
                wishlist.swap_remove(pos);
                sum += investment.annual_yield();
            }
            None => {
                sum = penalty.at(*violations) * count;
                *violations += 1;
                break;
            }
        }
    }

    sum / count
}
