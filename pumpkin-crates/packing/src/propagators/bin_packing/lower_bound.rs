use itertools::Itertools;

use crate::basic_types::ConflictKind;

/// Checks whether the unpacked items can fit in the bins according to the lower bound of Martello
/// and Toth on the number of bins.
///
/// `item_sizes` are the sizes of the unpacked items in non-increasing order and `bin_capacities`
/// the space which is left in every bin. All bins are treated as bins of the largest capacity;
/// a bin with less space contributes an item which fills up the difference.
pub(crate) fn check_required_bins(
    item_sizes: &[i32],
    bin_capacities: &[i32],
) -> Result<(), ConflictKind> {
    let Some(&largest_item) = item_sizes.first() else {
        return Ok(());
    };

    let mut capacity = largest_item;
    for (bin, &bin_capacity) in bin_capacities.iter().enumerate() {
        if bin_capacity < 0 {
            return Err(ConflictKind::ExceededCapacity { bin });
        }
        capacity = capacity.max(bin_capacity);
    }
    let capacity = i64::from(capacity);

    let mut sizes = item_sizes
        .iter()
        .map(|&size| i64::from(size))
        .chain(
            bin_capacities
                .iter()
                .map(|&bin_capacity| capacity - i64::from(bin_capacity))
                .filter(|&filler| filler > 0),
        )
        .collect::<Vec<_>>();
    sizes.sort_unstable_by(|first, second| second.cmp(first));

    // Items larger than half the capacity never share a bin with each other.
    let num_large = sizes.iter().take_while(|&&size| 2 * size > capacity).count();
    // The space left next to those large items which also leave room for an item of size `k`.
    let mut free_space: i64 = sizes[..num_large].iter().map(|&size| capacity - size).sum();
    // The total size of the small items of size at least `k`.
    let mut small_volume: i64 = sizes[num_large..].iter().sum();

    let mut num_too_large = 0;
    let mut small_end = sizes.len();

    let thresholds = std::iter::once(0).chain(sizes[num_large..].iter().rev().copied().dedup());

    for k in thresholds {
        while num_too_large < num_large && sizes[num_too_large] > capacity - k {
            free_space -= capacity - sizes[num_too_large];
            num_too_large += 1;
        }
        while small_end > num_large && sizes[small_end - 1] < k {
            small_volume -= sizes[small_end - 1];
            small_end -= 1;
        }

        let overspill = if small_volume > free_space {
            (small_volume - free_space + capacity - 1) / capacity
        } else {
            0
        };

        let required = num_large + overspill as usize;
        if required > bin_capacities.len() {
            return Err(ConflictKind::InsufficientBins {
                required,
                available: bin_capacities.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_items_need_their_own_bin() {
        assert_eq!(
            check_required_bins(&[6, 6, 6], &[10, 10]),
            Err(ConflictKind::InsufficientBins {
                required: 3,
                available: 2
            })
        );
        assert_eq!(check_required_bins(&[6, 6], &[10, 10]), Ok(()));
    }

    #[test]
    fn small_items_overflow_the_free_space() {
        // Next to the item of size 9 there is room for 1, so the items of size 3 need two more
        // bins.
        assert_eq!(
            check_required_bins(&[9, 3, 3, 3, 3], &[10, 10]),
            Err(ConflictKind::InsufficientBins {
                required: 3,
                available: 2
            })
        );
        assert_eq!(check_required_bins(&[9, 3, 3, 3], &[10, 10]), Ok(()));
    }

    #[test]
    fn threshold_excludes_items_which_cannot_combine() {
        // With k = 4, the items of size 7 cannot hold an item of size at least 4 next to them;
        // the three items of size 4 then need two more bins.
        assert_eq!(
            check_required_bins(&[7, 7, 4, 4, 4], &[10, 10, 10]),
            Err(ConflictKind::InsufficientBins {
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn smaller_bins_contribute_their_used_space() {
        // The second bin has room for 2 only; treated as a bin of 10 holding an item of size 8.
        assert_eq!(
            check_required_bins(&[6, 5], &[10, 2]),
            Err(ConflictKind::InsufficientBins {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn negative_capacity_fails() {
        assert_eq!(
            check_required_bins(&[1], &[3, -1]),
            Err(ConflictKind::ExceededCapacity { bin: 1 })
        );
    }

    #[test]
    fn no_items_never_fail() {
        assert_eq!(check_required_bins(&[], &[-1]), Ok(()));
    }
}
