//! Insertion sort.

use crate::dataset::Dataset;
use crate::Result;

/// Hold `a[i]`, shift larger predecessors one slot right, drop the held value
/// into the gap.
///
/// Shifts are reported as `Overwrite`, never as `Swap`. The final drop is
/// always written, even when the value lands back in its own slot. Indices are
/// finalized after the last insertion because any later insertion may still
/// shift an earlier slot.
pub(super) fn sort(data: &mut Dataset<'_>) -> Result<()> {
    let n = data.len();
    for i in 1..n {
        let current = data.get(i)?;
        let mut hole = i;
        while hole > 0 {
            data.note_compare(hole - 1, hole)?;
            let previous = data.get(hole - 1)?;
            if previous <= current {
                break;
            }
            data.set(hole, previous)?;
            hole -= 1;
        }
        data.set(hole, current)?;
    }
    data.mark_all_final()
}
