//! Quick sort (Lomuto partition, last-element pivot).
//!
//! No pivot randomization: already ordered or reversed input degrades to
//! N(N-1)/2 comparisons and O(N) pending ranges. Ranges are kept on an
//! explicit work stack rather than the call stack, processed left before
//! right, which yields the same step order as the recursive formulation.

use crate::dataset::Dataset;
use crate::Result;

pub(super) fn sort(data: &mut Dataset<'_>) -> Result<()> {
    let n = data.len();
    if n == 0 {
        return Ok(());
    }

    let mut pending = vec![(0usize, n - 1)];
    while let Some((low, high)) = pending.pop() {
        if low == high {
            data.mark_final(low)?;
            continue;
        }

        let pivot = partition(data, low, high)?;
        data.mark_final(pivot)?;

        // right first so the left range is popped next
        if pivot < high {
            pending.push((pivot + 1, high));
        }
        if pivot > low {
            pending.push((low, pivot - 1));
        }
    }
    Ok(())
}

/// Partition `[low, high]` around `a[high]`; returns the pivot's final slot.
///
/// Values `<=` the pivot move left. Self-swaps are skipped since they would
/// report a mutation that changes nothing.
fn partition(data: &mut Dataset<'_>, low: usize, high: usize) -> Result<usize> {
    let mut store = low;
    for j in low..high {
        if !data.greater(j, high)? {
            if store != j {
                data.swap(store, j)?;
            }
            store += 1;
        }
    }
    if store != high {
        data.swap(store, high)?;
    }
    Ok(store)
}
