//! Trace export (CSV and JSON).

use crate::runner::SortRun;
use crate::step::{Step, StepSequence};
use crate::Result;
use serde::Serialize;
use std::io::Write;

/// One CSV row per step: `index,op,i,j,value`.
#[derive(Debug, Serialize)]
struct StepRow {
    index: usize,
    op: &'static str,
    i: usize,
    j: Option<usize>,
    value: Option<f64>,
}

impl StepRow {
    fn new(index: usize, step: &Step) -> Self {
        let (op, value) = match *step {
            Step::Compare(..) => ("compare", None),
            Step::Swap(..) => ("swap", None),
            Step::Overwrite(_, value) => ("overwrite", Some(value)),
            Step::MarkFinal(_) => ("mark_final", None),
        };
        let (i, j) = step.indices();
        StepRow {
            index,
            op,
            i,
            j,
            value,
        }
    }
}

/// Write the trace as CSV with a header row.
///
/// The header is written even for an empty trace.
pub fn write_csv<W: Write>(steps: &StepSequence, writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(["index", "op", "i", "j", "value"])
        .map_err(|e| format!("CSV header write failed: {e}"))?;
    for (index, step) in steps.iter().enumerate() {
        csv.serialize(StepRow::new(index, step))
            .map_err(|e| format!("CSV write failed at step {index}: {e}"))?;
    }
    csv.flush()?;
    Ok(())
}

/// Render a whole run (input, result, steps) as pretty JSON.
pub fn to_json(run: &SortRun) -> Result<String> {
    serde_json::to_string_pretty(run).map_err(|e| format!("JSON serialization failed: {e}").into())
}
