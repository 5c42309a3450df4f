//! Bubble sort.

use crate::dataset::Dataset;
use crate::Result;

/// Adjacent exchange passes; pass `i` stops before the `i` settled tail slots.
///
/// Every index is finalized after the last pass, in increasing order.
pub(super) fn sort(data: &mut Dataset<'_>) -> Result<()> {
    let n = data.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            if data.greater(j, j + 1)? {
                data.swap(j, j + 1)?;
            }
        }
    }
    data.mark_all_final()
}
