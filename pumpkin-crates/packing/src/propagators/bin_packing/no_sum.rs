use super::SizeSequence;

/// The subset sums closest to a gap, as returned by [`no_sum`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoSum {
    /// The largest subset sum below the gap.
    pub below: i32,
    /// The smallest subset sum above the gap.
    pub above: i32,
}

/// Tries to prove that no subset of `sizes` sums to a value in `[lower, upper]`.
///
/// The test runs in linear time over the sizes, which have to be in non-increasing order. It
/// only considers, for every number of sizes `k`, the `k` smallest and the `k` largest sizes, so it
/// can miss gaps; when it returns [`NoSum`] however, no subset sum lies in `[lower, upper]`,
/// `below < lower` and `above > upper` are both subset sums, and there is no subset sum strictly
/// between them either.
///
/// Ranges which include `0` or the total of the sizes always have a sum, and return `None`.
pub fn no_sum<Sizes: SizeSequence + ?Sized>(
    sizes: &Sizes,
    lower: i32,
    upper: i32,
) -> Option<NoSum> {
    if lower <= 0 || upper >= sizes.total() {
        return None;
    }

    let last = sizes.card() - 1;

    // The smallest sizes which together stay below `lower`.
    let mut sum_smallest = 0;
    let mut num_smallest = 0;
    while sum_smallest + sizes.size(last - num_smallest) < lower {
        sum_smallest += sizes.size(last - num_smallest);
        num_smallest += 1;
    }

    let mut num_largest = 0;
    let mut sum_largest = 0;
    let mut sum_above = sizes.size(last - num_smallest);

    while sum_largest < lower && sum_above <= upper {
        sum_largest += sizes.size(num_largest);
        num_largest += 1;

        if sum_largest < lower {
            num_smallest -= 1;
            sum_above += sizes.size(last - num_smallest);
            sum_smallest -= sizes.size(last - num_smallest);

            while sum_largest + sum_smallest >= lower {
                num_smallest -= 1;
                sum_smallest -= sizes.size(last - num_smallest);
                sum_above += sizes.size(last - num_smallest)
                    - sizes.size(last - num_smallest - num_largest - 1);
            }
        }
    }

    if sum_largest < lower {
        Some(NoSum {
            below: sum_largest + sum_smallest,
            above: sum_above,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::Random;
    use crate::propagators::bin_packing::SizeSet;

    fn subset_sums(sizes: &[i32]) -> Vec<i32> {
        (0..1_u32 << sizes.len())
            .map(|subset| {
                sizes
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| subset & (1 << index) != 0)
                    .map(|(_, size)| size)
                    .sum()
            })
            .collect()
    }

    #[test]
    fn gap_between_equal_sizes() {
        let sizes = SizeSet::from_unsorted([5, 5]);

        assert_eq!(
            no_sum(&sizes, 6, 9),
            Some(NoSum {
                below: 5,
                above: 10
            })
        );
        assert_eq!(no_sum(&sizes, 4, 9), None);
    }

    #[test]
    fn closest_sums_around_a_single_value() {
        let sizes = SizeSet::from_unsorted([2, 7, 3]);

        assert_eq!(
            no_sum(&sizes, 6, 6),
            Some(NoSum { below: 5, above: 7 })
        );
    }

    #[test]
    fn trivial_ranges_are_reachable() {
        let sizes = SizeSet::from_unsorted([4, 3]);

        assert_eq!(no_sum(&sizes, 0, 2), None);
        assert_eq!(no_sum(&sizes, 5, 7), None);
        assert_eq!(no_sum(&SizeSet::default(), 1, 1), None);
    }

    #[test]
    fn reachable_load_is_not_reported() {
        let sizes = SizeSet::from_unsorted([4, 3, 3, 2, 2, 1]);

        assert_eq!(no_sum(&sizes, 8, 8), None);
    }

    #[test]
    fn reported_gaps_agree_with_enumeration() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut num_gaps = 0;

        for _ in 0..2000 {
            let num_sizes = rng.generate_usize_in_range(1..13);
            let sizes = (0..num_sizes)
                .map(|_| rng.generate_i32_in_range(0, 20))
                .collect::<Vec<_>>();
            let set = SizeSet::from_unsorted(sizes.iter().copied());

            let lower = rng.generate_i32_in_range(1, set.total().max(1));
            let upper = rng.generate_i32_in_range(lower, set.total().max(lower));

            let Some(gap) = no_sum(&set, lower, upper) else {
                continue;
            };
            num_gaps += 1;

            let sums = subset_sums(&sizes);
            assert!(
                sums.iter().all(|&sum| sum < lower || sum > upper),
                "{sizes:?} has a sum in [{lower}, {upper}]"
            );
            assert!(gap.below < lower && sums.contains(&gap.below));
            assert!(gap.above > upper && sums.contains(&gap.above));
            assert!(sums
                .iter()
                .all(|&sum| sum <= gap.below || sum >= gap.above));
        }

        assert!(num_gaps > 0);
    }
}
