use crate::config::allocation::{AllocationConfig, StrategyKind};
use crate::engines::allocation::{GeneticAllocator, GreedyAllocator};
use crate::error::{AllocationError, Result};
use crate::types::{Investment, Investor};
use serde::Serialize;
use std::collections::HashSet;

/// Common entry point for every allocation strategy.
///
/// Implementations never modify the caller's investors: they work on
/// snapshots and hand the updated snapshots back inside the result.
pub trait AllocationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Distributes `investments` over `investors`.
    ///
    /// Investor order is the tie-break priority. Every investment ends up in
    /// exactly one investor's list or in the unused list. Only malformed
    /// input is an error; unassignable investments are not.
    fn allocate(&self, investors: &[Investor], investments: &[Investment]) -> Result<AllocationResult>;
}

/// One investor and what they received in this run.
#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    /// Investor state after the run (holdings and yield include this run's assignments).
    pub investor: Investor,
    pub investments: Vec<Investment>,
}

impl Allocation {
    /// Yield from this run's assignments only.
    pub fn annual_yield(&self) -> f64 {
        self.investments.iter().map(|i| i.annual_yield()).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationResult {
    allocations: Vec<Allocation>,
    unused: Vec<Investment>,
}

impl AllocationResult {
    pub fn new(allocations: Vec<Allocation>, unused: Vec<Investment>) -> Self {
        Self { allocations, unused }
    }

    /// One entry per input investor, in input order.
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn unused(&self) -> &[Investment] {
        &self.unused
    }

    pub fn get(&self, investor_name: &str) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.investor.name() == investor_name)
    }

    pub fn assigned_count(&self) -> usize {
        self.allocations.iter().map(|a| a.investments.len()).sum()
    }

    /// Assigned plus unused. Always equals the number of input investments.
    pub fn total_count(&self) -> usize {
        self.assigned_count() + self.unused.len()
    }

    pub fn investor_yields(&self) -> Vec<f64> {
        self.allocations.iter().map(|a| a.investor.annual_yield()).collect()
    }
}

/// Rejects input that cannot be allocated at all.
pub fn validate_inputs(investors: &[Investor], investments: &[Investment]) -> Result<()> {
    let mut seen = HashSet::new();
    for investor in investors {
        if investor.name().trim().is_empty() {
            return Err(AllocationError::AllocationFailure(
                "investor with an empty name".to_string(),
            ));
        }
        if !seen.insert(investor.name()) {
            return Err(AllocationError::AllocationFailure(format!(
                "duplicate investor '{}'",
                investor.name()
            )));
        }
    }

    for (idx, investment) in investments.iter().enumerate() {
        if !investment.amount().is_finite() || investment.amount() < 0.0 {
            return Err(AllocationError::AllocationFailure(format!(
                "investment #{} ({}) has invalid amount {}",
                idx,
                investment.product_id(),
                investment.amount()
            )));
        }
        if !investment.rate().is_finite() || investment.rate() < 0.0 {
            return Err(AllocationError::AllocationFailure(format!(
                "investment #{} ({}) has invalid rate {}",
                idx,
                investment.product_id(),
                investment.rate()
            )));
        }
    }

    Ok(())
}

/// Builds the strategy selected in the configuration.
pub fn strategy_from_config(config: &AllocationConfig) -> Result<Box<dyn AllocationStrategy>> {
    match config.strategy {
        StrategyKind::Greedy => Ok(Box::new(GreedyAllocator::new())),
        StrategyKind::Genetic => Ok(Box::new(GeneticAllocator::from_config(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicate_investors() {
        let investors = vec![Investor::new("Eagle"), Investor::new("Eagle")];
        let err = validate_inputs(&investors, &[]).unwrap_err();
        assert!(matches!(err, AllocationError::AllocationFailure(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite_amount() {
        let investments = vec![Investment::new("P1", 2.5, f64::NAN, "c")];
        assert!(validate_inputs(&[Investor::new("Eagle")], &investments).is_err());
    }

    #[test]
    fn test_validate_accepts_empty_collections() {
        assert!(validate_inputs(&[], &[]).is_ok());
    }

    #[test]
    fn test_strategy_from_config() {
        let mut config = AllocationConfig::default();
        config.strategy = StrategyKind::Greedy;
        assert_eq!(strategy_from_config(&config).unwrap().name(), "greedy");

        config.strategy = StrategyKind::Genetic;
        assert_eq!(strategy_from_config(&config).unwrap().name(), "genetic");
    }
}
