use fundsplit::engines::allocation::{AllocationResult, AllocationStrategy, GreedyAllocator};
use fundsplit::{AllocationError, Investment, Investor};

fn investors() -> Vec<Investor> {
    vec![
        Investor::with_wishlist("Vulture", ["P1", "P3"]),
        Investor::with_wishlist("Seagull", ["P1", "P2", "P3"]),
        Investor::with_wishlist("Finch", ["P1", "P2", "P3", "P4", "P5", "P6"]),
        Investor::with_wishlist("Eagle", ["P1", "P2", "P5"]),
    ]
}

fn investments() -> Vec<Investment> {
    vec![
        Investment::new("P5", 2.6, 100000.0, "Customer1"),
        Investment::new("P3", 2.1, 50000.0, "Customer2"),
        Investment::new("P1", 2.5, 48000.0, "Customer3"),
        Investment::new("P3", 2.1, 17412.0, "Customer4"),
        Investment::new("P1", 2.5, 10000.0, "Customer5"),
        Investment::new("P1", 2.5, 30000.0, "Customer6"),
        Investment::new("P2", 3.5, 12345.0, "Customer1"),
        Investment::new("P1", 2.5, 50000.0, "Customer2"),
        Investment::new("P1", 2.5, 42000.0, "Customer3"),
        Investment::new("P3", 2.1, 50000.0, "Customer4"),
        Investment::new("P1", 2.5, 73412.0, "Customer5"),
        Investment::new("P4", 5.0, 100000.0, "Customer2"),
        Investment::new("P2", 3.5, 63000.0, "Customer8"),
        Investment::new("P9", 9.0, 99000.0, "Customer9"),
    ]
}

/// Sortable identity of an investment, for multiset comparison.
fn signature(investment: &Investment) -> (String, u64, u64, String) {
    (
        investment.product_id().to_string(),
        investment.amount().to_bits(),
        investment.rate().to_bits(),
        investment.owner().to_string(),
    )
}

fn output_signatures(result: &AllocationResult) -> Vec<(String, u64, u64, String)> {
    let mut all: Vec<_> = result
        .allocations()
        .iter()
        .flat_map(|a| a.investments.iter())
        .chain(result.unused())
        .map(signature)
        .collect();
    all.sort();
    all
}

#[test]
fn test_conservation() {
    let investments = investments();
    let result = GreedyAllocator::new().allocate(&investors(), &investments).unwrap();

    let mut expected: Vec<_> = investments.iter().map(signature).collect();
    expected.sort();

    assert_eq!(result.total_count(), investments.len());
    assert_eq!(output_signatures(&result), expected);
}

#[test]
fn test_deterministic_on_fresh_inputs() {
    let first = GreedyAllocator::new().allocate(&investors(), &investments()).unwrap();
    let second = GreedyAllocator::new().allocate(&investors(), &investments()).unwrap();

    for (a, b) in first.allocations().iter().zip(second.allocations()) {
        assert_eq!(a.investor, b.investor);
        assert_eq!(a.investments, b.investments);
    }
    assert_eq!(first.unused(), second.unused());
}

#[test]
fn test_repeat_on_same_inputs_is_identical() {
    let investors = investors();
    let investments = investments();
    let allocator = GreedyAllocator::new();

    let first = allocator.allocate(&investors, &investments).unwrap();
    let second = allocator.allocate(&investors, &investments).unwrap();

    assert_eq!(first.unused(), second.unused());
    assert_eq!(first.get("Finch").unwrap().investments, second.get("Finch").unwrap().investments);
}

#[test]
fn test_assignments_respect_wishlists() {
    let investors = investors();
    let result = GreedyAllocator::new().allocate(&investors, &investments()).unwrap();

    for (allocation, original) in result.allocations().iter().zip(&investors) {
        let mut remaining: Vec<String> = original.wishlist().to_vec();
        for investment in &allocation.investments {
            let pos = remaining
                .iter()
                .position(|wish| wish == investment.product_id())
                .unwrap_or_else(|| panic!("{} got unwanted {}", original.name(), investment.product_id()));
            remaining.remove(pos);
        }
        let mut left = allocation.investor.wishlist().to_vec();
        left.sort();
        remaining.sort();
        assert_eq!(left, remaining, "wishes consumed for {}", original.name());
    }
}

#[test]
fn test_largest_principal_processed_first() {
    let result = GreedyAllocator::new().allocate(&investors(), &investments()).unwrap();

    for allocation in result.allocations() {
        for pair in allocation.investments.windows(2) {
            assert!(pair[0].amount() >= pair[1].amount());
        }
    }
}

#[test]
fn test_yield_cache_matches_holdings() {
    let result = GreedyAllocator::new().allocate(&investors(), &investments()).unwrap();

    for allocation in result.allocations() {
        let sum: f64 = allocation.investor.investments().iter().map(|i| i.annual_yield()).sum();
        assert!((allocation.investor.annual_yield() - sum).abs() < 1e-6);
        assert!((allocation.annual_yield() - sum).abs() < 1e-6);
    }
}

#[test]
fn test_unknown_product_is_unused() {
    let result = GreedyAllocator::new().allocate(&investors(), &investments()).unwrap();
    assert!(result.unused().iter().any(|i| i.product_id() == "P9"));
}

#[test]
fn test_no_investors_leaves_everything_unused() {
    let investments = investments();
    let result = GreedyAllocator::new().allocate(&[], &investments).unwrap();

    assert!(result.allocations().is_empty());
    assert_eq!(result.unused().len(), investments.len());
}

#[test]
fn test_malformed_input_fails() {
    let bad = vec![Investment::new("P1", 2.5, -10.0, "Customer1")];
    let err = GreedyAllocator::new().allocate(&investors(), &bad).unwrap_err();
    assert!(matches!(err, AllocationError::AllocationFailure(_)));
}

#[test]
fn test_prior_holdings_lower_priority() {
    // Eagle already earns, so the newcomer Finch gets first pick.
    let mut eagle = Investor::with_wishlist("Eagle", ["P1"]);
    eagle.add_investment(Investment::new("P0", 10.0, 1000.0, "old"));
    let investors = vec![eagle, Investor::with_wishlist("Finch", ["P1"])];
    let investments = vec![Investment::new("P1", 2.0, 500.0, "Customer1")];

    let result = GreedyAllocator::new().allocate(&investors, &investments).unwrap();

    assert!(result.get("Eagle").unwrap().investments.is_empty());
    assert_eq!(result.get("Finch").unwrap().investments.len(), 1);
    assert_eq!(result.get("Eagle").unwrap().investor.investments().len(), 1);
}
