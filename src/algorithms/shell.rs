//! Shell sort.

use crate::dataset::Dataset;
use crate::Result;

/// Gapped insertion sort with gaps N/2, N/4, ..., 1.
///
/// Intermediate passes give no per-element finality, so every index is
/// finalized after the gap-1 pass.
pub(super) fn sort(data: &mut Dataset<'_>) -> Result<()> {
    let n = data.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let current = data.get(i)?;
            let mut hole = i;
            while hole >= gap {
                data.note_compare(hole - gap, hole)?;
                let previous = data.get(hole - gap)?;
                if previous <= current {
                    break;
                }
                data.set(hole, previous)?;
                hole -= gap;
            }
            data.set(hole, current)?;
        }
        gap /= 2;
    }
    data.mark_all_final()
}
