/// An item which has to be placed in exactly one bin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<Var> {
    /// The index of the bin the item goes to.
    pub(crate) bin: Var,
    pub(crate) size: i32,
}

impl<Var> Item<Var> {
    pub fn new(bin: Var, size: i32) -> Self {
        Item { bin, size }
    }

    pub fn bin(&self) -> &Var {
        &self.bin
    }

    pub fn size(&self) -> i32 {
        self.size
    }
}

/// Orders the items by non-increasing size; items of equal size keep their relative order.
///
/// The subset-sum reasoning depends on this order.
pub(crate) fn sort_by_decreasing_size<Var>(items: &mut [Item<Var>]) {
    items.sort_by(|first, second| second.size.cmp(&first.size));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorting_is_stable_for_equal_sizes() {
        let mut items = vec![
            Item::new("a", 2),
            Item::new("b", 5),
            Item::new("c", 2),
            Item::new("d", 7),
        ];

        sort_by_decreasing_size(&mut items);

        let order = items.iter().map(|item| *item.bin()).collect::<Vec<_>>();
        assert_eq!(order, vec!["d", "b", "a", "c"]);
    }
}
