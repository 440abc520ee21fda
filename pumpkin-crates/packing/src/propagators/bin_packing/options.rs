/// Which parts of the expensive stage of the packing propagator are enabled.
///
/// Both kinds of reasoning are run by default. Switching one off never removes a solution; it only
/// means that less is pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinPackingOptions {
    /// Whether to reason over the subsets of the sizes which can still be packed into every bin,
    /// both to tighten the loads and to exclude or force items.
    pub subset_sum_reasoning: bool,
    /// Whether to check that the remaining items fit in the available bins according to the
    /// size-class lower bound.
    pub lower_bound_reasoning: bool,
}

impl Default for BinPackingOptions {
    fn default() -> Self {
        BinPackingOptions {
            subset_sum_reasoning: true,
            lower_bound_reasoning: true,
        }
    }
}

impl BinPackingOptions {
    /// Only the cheap stages: load propagation and the per-item rules on the load bounds.
    pub fn cheap() -> Self {
        BinPackingOptions {
            subset_sum_reasoning: false,
            lower_bound_reasoning: false,
        }
    }
}
