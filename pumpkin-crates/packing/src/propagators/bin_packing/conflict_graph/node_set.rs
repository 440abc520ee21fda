const WORD_SIZE: usize = u64::BITS as usize;

/// A set of nodes `0..num_nodes` as a fixed-size bitset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeSet {
    words: Box<[u64]>,
}

impl NodeSet {
    pub(crate) fn new(num_nodes: usize) -> Self {
        NodeSet {
            words: vec![0; num_nodes.div_ceil(WORD_SIZE)].into_boxed_slice(),
        }
    }

    pub(crate) fn contains(&self, node: usize) -> bool {
        self.words[node / WORD_SIZE] & (1 << (node % WORD_SIZE)) != 0
    }

    pub(crate) fn insert(&mut self, node: usize) {
        self.words[node / WORD_SIZE] |= 1 << (node % WORD_SIZE);
    }

    pub(crate) fn remove(&mut self, node: usize) {
        self.words[node / WORD_SIZE] &= !(1 << (node % WORD_SIZE));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    pub(crate) fn len(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Removes every node of `other` from this set.
    pub(crate) fn difference_with(&mut self, other: &NodeSet) {
        for (word, other_word) in self.words.iter_mut().zip(other.words.iter()) {
            *word &= !other_word;
        }
    }

    /// Iterates over the nodes in increasing order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(index * WORD_SIZE + bit)
            })
        })
    }

    /// Sets `first_result` to `first ∩ with` and `second_result` to `second ∩ with` in a single
    /// pass, and returns whether both results are empty.
    pub(crate) fn intersect_both(
        first_result: &mut NodeSet,
        first: &NodeSet,
        second_result: &mut NodeSet,
        second: &NodeSet,
        with: &NodeSet,
    ) -> bool {
        let mut both_empty = true;
        for index in 0..with.words.len() {
            let first_word = first.words[index] & with.words[index];
            let second_word = second.words[index] & with.words[index];
            first_result.words[index] = first_word;
            second_result.words[index] = second_word;
            both_empty &= first_word == 0 && second_word == 0;
        }
        both_empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_across_words_are_iterated_in_order() {
        let mut set = NodeSet::new(130);
        for node in [129, 3, 64, 0] {
            set.insert(node);
        }
        set.remove(3);

        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 64, 129]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(64));
        assert!(!set.contains(3));
    }

    #[test]
    fn intersections_report_emptiness() {
        let mut first = NodeSet::new(70);
        let mut second = NodeSet::new(70);
        let mut with = NodeSet::new(70);
        first.insert(1);
        second.insert(68);
        with.insert(2);

        let mut first_result = NodeSet::new(70);
        let mut second_result = NodeSet::new(70);
        assert!(NodeSet::intersect_both(
            &mut first_result,
            &first,
            &mut second_result,
            &second,
            &with
        ));

        with.insert(68);
        assert!(!NodeSet::intersect_both(
            &mut first_result,
            &first,
            &mut second_result,
            &second,
            &with
        ));
        assert!(first_result.is_empty());
        assert_eq!(second_result.iter().collect::<Vec<_>>(), vec![68]);
    }

    #[test]
    fn difference_removes_shared_nodes() {
        let mut set = NodeSet::new(10);
        let mut other = NodeSet::new(10);
        for node in [1, 4, 7] {
            set.insert(node);
        }
        other.insert(4);

        set.difference_with(&other);

        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 7]);
    }
}
