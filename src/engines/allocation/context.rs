use crate::types::{Investment, Investor};

/// Gene value meaning "this investment has no holder".
pub const UNASSIGNED: i32 = -1;

/// Run-scoped lookup tables shared by every genetic component.
///
/// Gene position `i` always means `investments()[i]` and gene value `j`
/// always means `investors()[j]`. Built once from the caller's collections
/// and never mutated afterwards, so it can be shared by reference across
/// rayon workers during fitness evaluation.
#[derive(Debug, Clone)]
pub struct AllocationContext {
    investors: Vec<Investor>,
    investments: Vec<Investment>,
}

impl AllocationContext {
    pub fn new(investors: &[Investor], investments: &[Investment]) -> Self {
        Self {
            investors: investors.to_vec(),
            investments: investments.to_vec(),
        }
    }

    pub fn investors(&self) -> &[Investor] {
        &self.investors
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn investor_count(&self) -> usize {
        self.investors.len()
    }

    pub fn investment_count(&self) -> usize {
        self.investments.len()
    }

    /// Looks up the investor a gene points at. `None` for the sentinel or an out-of-range value.
    pub fn investor(&self, gene: i32) -> Option<&Investor> {
        usize::try_from(gene).ok().and_then(|idx| self.investors.get(idx))
    }

    pub fn investment(&self, index: usize) -> Option<&Investment> {
        self.investments.get(index)
    }

    /// Every value a gene may legally hold: each investor index plus [`UNASSIGNED`].
    pub fn gene_values(&self) -> Vec<i32> {
        let mut values: Vec<i32> = (0..self.investors.len() as i32).collect();
        values.push(UNASSIGNED);
        values
    }

    pub fn is_valid_gene(&self, gene: i32) -> bool {
        gene == UNASSIGNED || self.investor(gene).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AllocationContext {
        let investors = vec![
            Investor::with_wishlist("Vulture", ["P1"]),
            Investor::with_wishlist("Seagull", ["P2"]),
        ];
        let investments = vec![Investment::new("P1", 2.5, 100.0, "c1")];
        AllocationContext::new(&investors, &investments)
    }

    #[test]
    fn test_indices_are_dense_and_stable() {
        let ctx = context();
        assert_eq!(ctx.investor(0).map(|i| i.name()), Some("Vulture"));
        assert_eq!(ctx.investor(1).map(|i| i.name()), Some("Seagull"));
        assert!(ctx.investor(UNASSIGNED).is_none());
        assert!(ctx.investor(2).is_none());
        assert_eq!(ctx.investment_count(), 1);
    }

    #[test]
    fn test_gene_values_include_sentinel() {
        let ctx = context();
        assert_eq!(ctx.gene_values(), vec![0, 1, UNASSIGNED]);
        assert!(ctx.is_valid_gene(UNASSIGNED));
        assert!(!ctx.is_valid_gene(5));
    }
}
