//! Heap sort.

use crate::dataset::Dataset;
use crate::Result;

/// Build a max-heap from the last parent down to the root, then repeatedly
/// move the root behind the shrinking heap and restore the heap property.
///
/// Each extracted slot is finalized right after its swap; the root is the
/// last index finalized.
pub(super) fn sort(data: &mut Dataset<'_>) -> Result<()> {
    let n = data.len();
    for root in (0..n / 2).rev() {
        sift_down(data, n, root)?;
    }

    for end in (1..n).rev() {
        data.swap(0, end)?;
        data.mark_final(end)?;
        sift_down(data, end, 0)?;
    }

    if n > 0 {
        data.mark_final(0)?;
    }
    Ok(())
}

/// Restore the max-heap property below `root` within the first `size` slots.
fn sift_down(data: &mut Dataset<'_>, size: usize, mut root: usize) -> Result<()> {
    loop {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = left + 1;

        if left < size && data.greater(left, largest)? {
            largest = left;
        }
        if right < size && data.greater(right, largest)? {
            largest = right;
        }
        if largest == root {
            return Ok(());
        }

        data.swap(root, largest)?;
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::tests::trace;
    use crate::algorithms::Algorithm;
    use crate::step::Step;

    #[test]
    fn test_heap_trace() {
        let (sorted, steps) = trace(Algorithm::Heap, &[1.0, 3.0, 2.0]);
        assert_eq!(sorted, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            steps,
            vec![
                // heapify root 0
                Step::Compare(1, 0),
                Step::Compare(2, 1),
                Step::Swap(0, 1),
                // extract
                Step::Swap(0, 2),
                Step::MarkFinal(2),
                Step::Compare(1, 0),
                Step::Swap(0, 1),
                Step::MarkFinal(1),
                Step::MarkFinal(0),
            ]
        );
    }

    #[test]
    fn test_equal_values_swap_without_change() {
        let input = [2.0, 2.0, 2.0];
        let (sorted, steps) = trace(Algorithm::Heap, &input);
        assert_eq!(sorted, input.to_vec());
        // extraction still swaps the root out, but only equal values move
        assert!(steps.iter().any(|s| matches!(s, Step::Swap(0, 2))));
    }
}
