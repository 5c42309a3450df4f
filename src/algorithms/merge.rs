//! Merge sort (top-down, temporary buffers).

use super::MergeFinalization;
use crate::dataset::Dataset;
use crate::Result;

/// Split `[left, right]` at the floor midpoint, sort both halves, merge.
///
/// Each placed value is written with `Overwrite` and, when the merge is
/// finalizing, immediately followed by `MarkFinal` for the same slot.
pub(super) fn sort(data: &mut Dataset<'_>, finalization: MergeFinalization) -> Result<()> {
    match data.len() {
        0 => Ok(()),
        // no merge ever runs, so nothing else would finalize the only slot
        1 => data.mark_final(0),
        n => split(data, 0, n - 1, finalization, true),
    }
}

fn split(
    data: &mut Dataset<'_>,
    left: usize,
    right: usize,
    finalization: MergeFinalization,
    outermost: bool,
) -> Result<()> {
    if left >= right {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    split(data, left, mid, finalization, false)?;
    split(data, mid + 1, right, finalization, false)?;

    let finalize = outermost || finalization == MergeFinalization::EveryMerge;
    merge(data, left, mid, right, finalize)
}

fn merge(
    data: &mut Dataset<'_>,
    left: usize,
    mid: usize,
    right: usize,
    finalize: bool,
) -> Result<()> {
    let lower = data.values()[left..=mid].to_vec();
    let upper = data.values()[mid + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < lower.len() && j < upper.len() {
        data.note_compare(left + i, mid + 1 + j)?;
        // take from the right half only on strict greater-than: stable
        let value = if lower[i] > upper[j] {
            j += 1;
            upper[j - 1]
        } else {
            i += 1;
            lower[i - 1]
        };
        place(data, k, value, finalize)?;
        k += 1;
    }

    for &value in lower[i..].iter().chain(&upper[j..]) {
        place(data, k, value, finalize)?;
        k += 1;
    }
    Ok(())
}

fn place(data: &mut Dataset<'_>, slot: usize, value: f64, finalize: bool) -> Result<()> {
    data.set(slot, value)?;
    if finalize {
        data.mark_final(slot)?;
    }
    Ok(())
}
