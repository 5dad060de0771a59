//! Grouping and averaging of result rows by (mode, rps).

use csv::StringRecord;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use tracing::debug;

const COL_MODE: usize = 0;
const COL_RPS: usize = 1;

/// One plotted point: requests-per-second against the averaged metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub rps: f64,
    pub value: f64,
}

/// All points for one mode, ascending in rps.
#[derive(Debug, Clone)]
pub struct ModeSeries {
    pub mode: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Default)]
struct MeanAccum {
    sum: f64,
    count: u64,
}

impl MeanAccum {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Group rows by (mode, rps) and average the chosen value column.
///
/// The first record is the header and is skipped here, not in the loader.
/// Rows whose rps or metric value does not parse as a float (or whose
/// columns are missing) are dropped without error; repeated runs at the
/// same rps collapse into a single arithmetic mean.
///
/// The returned series are ordered lexicographically by mode so that
/// downstream color and legend assignment is deterministic.
pub fn aggregate_column(records: &[StringRecord], value_col: usize) -> Vec<ModeSeries> {
    let mut groups: BTreeMap<String, BTreeMap<OrderedFloat<f64>, MeanAccum>> = BTreeMap::new();

    for row in records.iter().skip(1) {
        let mode = match row.get(COL_MODE) {
            Some(mode) => mode,
            None => continue,
        };
        let rps = row.get(COL_RPS).and_then(|s| s.parse::<f64>().ok());
        let value = row.get(value_col).and_then(|s| s.parse::<f64>().ok());
        let (rps, value) = match (rps, value) {
            (Some(rps), Some(value)) => (rps, value),
            _ => {
                debug!(?row, "skipping row with non-numeric rps or value");
                continue;
            }
        };

        groups
            .entry(mode.to_string())
            .or_default()
            .entry(OrderedFloat(rps))
            .or_default()
            .push(value);
    }

    groups
        .into_iter()
        .map(|(mode, by_rps)| ModeSeries {
            mode,
            points: by_rps
                .into_iter()
                .map(|(rps, accum)| SeriesPoint {
                    rps: rps.into_inner(),
                    value: accum.mean(),
                })
                .collect(),
        })
        .collect()
}
