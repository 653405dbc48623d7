//! The pivot step of an in-place partition-exchange sort.
//!
//! The first element of the active range is the pivot. Elements strictly less
//! than it are gathered directly behind it, then the pivot is swapped into the
//! slot between the two groups. Elements equal to the pivot are never moved
//! forward, so ties always end up on the high side.

use log::trace;

/// partition `v[start..]` around `v[start]`, returning the pivot's final index
///
/// # Panics
/// if `start >= v.len()`
pub fn partition<T: PartialOrd>(v: &mut [T], start: usize) -> usize {
    let end = v.len();
    partition_in(v, start, end)
}

/// partition `v[start..end]` around `v[start]`, returning the pivot's final
/// index. elements outside the range are never touched.
///
/// # Panics
/// if `start >= end` or `end > v.len()`
pub fn partition_in<T: PartialOrd>(v: &mut [T], start: usize, end: usize) -> usize {
    partition_by(v, start, end, |a, b| a < b)
}

/// partition `v[start..end]` around `v[start]` using `is_less` as the strict
/// ordering, returning the pivot's final index
///
/// # Panics
/// if `start >= end` or `end > v.len()`
pub fn partition_by<T, F>(v: &mut [T], start: usize, end: usize, mut is_less: F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    assert!(start < end, "partition range {start}..{end} is empty");
    assert!(end <= v.len(), "partition range end {end} exceeds length {}", v.len());

    // every swap lands strictly after `start`, so the pivot stays put until
    // the final exchange
    let mut swap_index = start;
    for i in start + 1..end {
        if is_less(&v[i], &v[start]) {
            swap_index += 1;
            v.swap(swap_index, i);
        }
    }
    v.swap(swap_index, start);

    trace!("partitioned {start}..{end}, pivot settled at {swap_index}");
    swap_index
}


#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest::sample::Index;

    use super::*;

    proptest! {
        #[test]
        fn pivot_splits_range(
            input in vec(-50i32..50, 1..128),
            start in any::<Index>(),
            end in any::<Index>()
        ) {
            let start = start.index(input.len());
            let end = start + 1 + end.index(input.len() - start);
            let pivot = input[start];

            let mut v = input.clone();
            let p = partition_in(&mut v, start, end);

            prop_assert!((start..end).contains(&p));
            prop_assert_eq!(v[p], pivot);
            prop_assert!(v[start..p].iter().all(|x| *x < pivot));
            prop_assert!(v[p + 1..end].iter().all(|x| *x >= pivot));
            prop_assert_eq!(p - start, input[start..end].iter().filter(|x| **x < pivot).count());

            // outside the range nothing moves, inside it is a permutation
            prop_assert_eq!(&v[..start], &input[..start]);
            prop_assert_eq!(&v[end..], &input[end..]);
            let mut before = input[start..end].to_vec();
            let mut after = v[start..end].to_vec();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }
}
