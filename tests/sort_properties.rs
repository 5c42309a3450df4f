use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sortscope::{
    run_sort, run_sort_cancellable, run_sort_with, Algorithm, CancelToken, MergeFinalization,
    SortError, SortOptions, SortRun, Step,
};

fn random_inputs(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut inputs = Vec::new();
    for len in 0..=40 {
        inputs.push((0..len).map(|_| rng.gen_range(-1000.0..1000.0)).collect());
        // heavy duplicates
        inputs.push((0..len).map(|_| f64::from(rng.gen_range(0..5))).collect());
    }
    inputs
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut expected = values.to_vec();
    expected.sort_by(f64::total_cmp);
    expected
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

fn final_marks(run: &SortRun) -> Vec<usize> {
    run.steps
        .iter()
        .filter_map(|step| match step {
            Step::MarkFinal(index) => Some(*index),
            _ => None,
        })
        .collect()
}

/// Number of steps that actually changed a value when replayed.
fn value_changing_steps(input: &[f64], run: &SortRun) -> usize {
    let mut values = input.to_vec();
    let mut changed = 0;
    for step in run.steps.iter() {
        let before = bits(&values);
        step.apply(&mut values).unwrap();
        if bits(&values) != before {
            changed += 1;
        }
    }
    changed
}

#[test]
fn sorts_and_preserves_multiset() {
    for algorithm in Algorithm::ALL {
        for input in random_inputs(0x5eed) {
            let run = run_sort_with(algorithm, &input, &SortOptions::default()).unwrap();
            assert_eq!(
                bits(&run.sorted),
                bits(&sorted_copy(&input)),
                "{algorithm} on {input:?}"
            );
            assert_eq!(run.input, input);
        }
    }
}

#[test]
fn every_index_finalized_exactly_once() {
    for algorithm in Algorithm::ALL {
        for input in random_inputs(7) {
            let run = run_sort_with(algorithm, &input, &SortOptions::default()).unwrap();
            let mut marks = final_marks(&run);
            marks.sort_unstable();
            let expected: Vec<usize> = (0..input.len()).collect();
            assert_eq!(marks, expected, "{algorithm} on {input:?}");
        }
    }
}

#[test]
fn no_mutation_after_final_mark() {
    for algorithm in Algorithm::ALL {
        for input in random_inputs(11) {
            let run = run_sort_with(algorithm, &input, &SortOptions::default()).unwrap();
            let mut finalized = vec![false; input.len()];
            for (position, step) in run.steps.iter().enumerate() {
                match *step {
                    Step::MarkFinal(index) => finalized[index] = true,
                    Step::Swap(i, j) => assert!(
                        !finalized[i] && !finalized[j],
                        "{algorithm}: swap of finalized slot at step {position}"
                    ),
                    Step::Overwrite(i, _) => assert!(
                        !finalized[i],
                        "{algorithm}: overwrite of finalized slot at step {position}"
                    ),
                    Step::Compare(..) => {}
                }
            }
        }
    }
}

#[test]
fn replay_is_bit_identical() {
    for algorithm in Algorithm::ALL {
        for input in random_inputs(42) {
            let run = run_sort_with(algorithm, &input, &SortOptions::default()).unwrap();
            let replayed = run.steps.replay(&input).unwrap();
            assert_eq!(bits(&replayed), bits(&run.sorted), "{algorithm}");
        }
    }
}

#[test]
fn sorted_input_is_left_unchanged() {
    let input = vec![-3.0, -1.0, 0.0, 0.0, 2.5, 4.0, 4.0, 9.0];
    for algorithm in Algorithm::ALL {
        let run = run_sort_with(algorithm, &input, &SortOptions::default()).unwrap();
        assert_eq!(bits(&run.sorted), bits(&input), "{algorithm}");
        assert_eq!(final_marks(&run).len(), input.len(), "{algorithm}");

        // heap sort has to rebuild its heap, so it always swaps
        if algorithm == Algorithm::Heap {
            continue;
        }
        let stats = run.steps.stats();
        assert_eq!(stats.swaps, 0, "{algorithm}");
        assert_eq!(value_changing_steps(&input, &run), 0, "{algorithm}");
    }
}

#[test]
fn boundary_lengths() {
    for algorithm in Algorithm::ALL {
        let empty = run_sort_with(algorithm, &[], &SortOptions::default()).unwrap();
        assert!(empty.sorted.is_empty());
        assert!(empty.steps.is_empty(), "{algorithm}");

        let single = run_sort_with(algorithm, &[3.5], &SortOptions::default()).unwrap();
        assert_eq!(single.sorted, vec![3.5]);
        assert_eq!(single.steps.as_slice(), &[Step::MarkFinal(0)], "{algorithm}");
    }
}

#[test]
fn bubble_trace_for_four_values() {
    let run = run_sort("bubble", &[5.0, 3.0, 8.0, 1.0]).unwrap();
    let moves: Vec<Step> = run
        .steps
        .iter()
        .copied()
        .filter(|step| !matches!(step, Step::MarkFinal(_)))
        .collect();
    assert_eq!(
        moves,
        vec![
            Step::Compare(0, 1),
            Step::Swap(0, 1),
            Step::Compare(1, 2),
            Step::Compare(2, 3),
            Step::Swap(2, 3),
            Step::Compare(0, 1),
            Step::Compare(1, 2),
            Step::Swap(1, 2),
            Step::Compare(0, 1),
            Step::Swap(0, 1),
        ]
    );
    assert_eq!(run.sorted, vec![1.0, 3.0, 5.0, 8.0]);
    assert_eq!(final_marks(&run).len(), 4);

    let midway = run.steps.replay_until(&run.input, 2).unwrap();
    assert_eq!(midway, vec![3.0, 5.0, 8.0, 1.0]);
}

#[test]
fn all_equal_values_never_change() {
    let input = [2.0, 2.0, 2.0];
    for algorithm in Algorithm::ALL {
        let run = run_sort_with(algorithm, &input, &SortOptions::default()).unwrap();
        assert_eq!(value_changing_steps(&input, &run), 0, "{algorithm}");
        assert_eq!(run.sorted, input.to_vec());
    }
}

#[test]
fn quick_sort_worst_case_compare_count() {
    let run = run_sort("quick", &[9.0, 7.0, 5.0, 3.0, 1.0]).unwrap();
    assert_eq!(run.steps.stats().compares, 10);
    assert_eq!(run.sorted, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
}

#[test]
fn legacy_merge_marks_repeat_indices() {
    let options = SortOptions {
        merge_finalization: MergeFinalization::EveryMerge,
    };
    let input = [4.0, 3.0, 2.0, 1.0];
    let run = run_sort_with(Algorithm::Merge, &input, &options).unwrap();
    assert_eq!(run.sorted, vec![1.0, 2.0, 3.0, 4.0]);
    // two inner merges of two slots plus the outermost merge of four
    assert_eq!(final_marks(&run).len(), 8);
    assert_eq!(bits(&run.steps.replay(&input).unwrap()), bits(&run.sorted));
}

#[test]
fn rejects_non_finite_input() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = run_sort("merge", &[1.0, bad]).unwrap_err();
        assert!(matches!(err, SortError::InvalidInput(_)));
    }
}

#[test]
fn rejects_unknown_algorithm() {
    let err = run_sort("bogosort", &[1.0]).unwrap_err();
    assert!(matches!(err, SortError::UnknownAlgorithm(_)));
    assert!(err.to_string().contains("bogosort"));
}

#[test]
fn cancelled_run_reports_cancelled() {
    let token = CancelToken::new();
    token.cancel();
    let err = run_sort_cancellable(
        Algorithm::Shell,
        &[3.0, 2.0, 1.0],
        &SortOptions::default(),
        token,
    )
    .unwrap_err();
    assert!(matches!(err, SortError::Cancelled));
}
