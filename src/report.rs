//! Plain-text rendering of an allocation result.

use crate::engines::allocation::AllocationResult;
use crate::engines::metrics::DispersionMetrics;
use std::fmt::Write;

/// Investors from lowest to highest annual yield with this run's assignments,
/// then the unused investments.
///
/// The per-investor total covers this run's assignments. Investors who held
/// investments before the run get a second line with the cumulative total.
pub fn render(result: &AllocationResult) -> String {
    let mut out = String::new();

    let mut allocations: Vec<_> = result.allocations().iter().collect();
    allocations.sort_by(|a, b| a.investor.annual_yield().total_cmp(&b.investor.annual_yield()));

    for allocation in allocations {
        let _ = writeln!(
            out,
            "The investments that were allocated to {} are:",
            allocation.investor.name()
        );
        for investment in &allocation.investments {
            let _ = writeln!(out, "  - {}", investment);
        }
        let _ = writeln!(
            out,
            "The total amount of money earned annually is: {:.2}",
            allocation.annual_yield()
        );
        if allocation.investor.investments().len() > allocation.investments.len() {
            let _ = writeln!(
                out,
                "Including earlier holdings, the total earned annually is: {:.2}",
                allocation.investor.annual_yield()
            );
        }
        out.push('\n');
    }
    out.push('\n');

    if result.unused().is_empty() {
        out.push_str("No unused investments!\n");
    } else {
        out.push_str("The unused investments are the following:\n");
        for investment in result.unused() {
            let _ = writeln!(out, "{}", investment);
        }
    }

    out
}

/// One-line spread summary for logs.
pub fn summary(result: &AllocationResult) -> String {
    let metrics = DispersionMetrics::calculate(&result.investor_yields());
    format!(
        "{} assigned, {} unused, mean yield {:.2}, std dev {:.2}, spread {:.2}",
        result.assigned_count(),
        result.unused().len(),
        metrics.get("mean_yield").copied().unwrap_or(0.0),
        metrics.get("yield_std_dev").copied().unwrap_or(0.0),
        metrics.get("yield_spread").copied().unwrap_or(0.0),
    )
}
