//! Selection sort.

use crate::dataset::Dataset;
use crate::Result;

/// For each position, scan the unsorted tail for its minimum and swap it in.
///
/// Position `i` is finalized as soon as it is settled. Equal values never
/// replace the current minimum, so no swap happens for ties.
pub(super) fn sort(data: &mut Dataset<'_>) -> Result<()> {
    let n = data.len();
    for i in 0..n {
        let mut min_index = i;
        for j in i + 1..n {
            if data.less(j, min_index)? {
                min_index = j;
            }
        }
        if min_index != i {
            data.swap(i, min_index)?;
        }
        data.mark_final(i)?;
    }
    Ok(())
}
