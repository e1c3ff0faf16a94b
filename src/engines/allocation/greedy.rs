use crate::engines::allocation::strategy::{validate_inputs, Allocation, AllocationResult, AllocationStrategy};
use crate::error::Result;
use crate::types::{Investment, Investor};

/// One-pass deterministic allocation.
///
/// Investments are handed out from the largest principal down. Each one goes
/// to the first investor, in ascending order of current annual yield, whose
/// wishlist still contains the product. Assigning consumes that wish. After
/// every assignment the investors are re-ranked so whoever earns least gets
/// first pick of the next investment. Sorting is stable throughout, so equal
/// yields fall back to the caller's investor order.
///
/// Runs on clones of the investors; calling it twice on the same input gives
/// the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    pub fn new() -> Self {
        Self
    }

    fn rank_by_yield(pool: &mut [(usize, Investor)]) {
        pool.sort_by(|a, b| a.1.annual_yield().total_cmp(&b.1.annual_yield()));
    }
}

impl AllocationStrategy for GreedyAllocator {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn allocate(&self, investors: &[Investor], investments: &[Investment]) -> Result<AllocationResult> {
        validate_inputs(investors, investments)?;
        log::info!(
            "Greedy allocation started: {} investors, {} investments",
            investors.len(),
            investments.len()
        );

        let mut ordered = investments.to_vec();
        ordered.sort_by(Investment::allocation_order);

        // (input position, working copy)
        let mut pool: Vec<(usize, Investor)> = investors.iter().cloned().enumerate().collect();
        Self::rank_by_yield(&mut pool);

        let mut assigned: Vec<Vec<Investment>> = vec![Vec::new(); investors.len()];
        let mut unused = Vec::new();

        for investment in ordered {
            let candidate = pool
                .iter()
                .position(|(_, investor)| investor.wants(investment.product_id()));

            match candidate {
                Some(pos) => {
                    let (input_idx, investor) = &mut pool[pos];
                    investor.remove_wish(investment.product_id());
                    investor.add_investment(investment.clone());
                    log::debug!(
                        "{} ({:.2}) -> {}",
                        investment.product_id(),
                        investment.amount(),
                        investor.name()
                    );
                    assigned[*input_idx].push(investment);
                    Self::rank_by_yield(&mut pool);
                }
                None => {
                    log::debug!(
                        "No investor wants {} ({:.2})",
                        investment.product_id(),
                        investment.amount()
                    );
                    unused.push(investment);
                }
            }
        }

        pool.sort_by_key(|(input_idx, _)| *input_idx);
        let allocations = pool
            .into_iter()
            .zip(assigned)
            .map(|((_, investor), investments)| Allocation { investor, investments })
            .collect();

        let result = AllocationResult::new(allocations, unused);
        log::info!(
            "Greedy allocation finished: {} assigned, {} unused",
            result.assigned_count(),
            result.unused().len()
        );
        Ok(result)
    }
}
