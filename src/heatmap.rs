use crate::record::Record;
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_WINDOW: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub date: NaiveDate,
    /// Colour slot of the habit when completed, 0 otherwise.
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub cells: Vec<HeatCell>,
    pub total_recorded: usize,
    pub shown: usize,
}

/// Takes the newest `max_window` entries of `record` and lays them out
/// oldest-first for rendering.
pub fn project(record: &Record, habit_index: usize, max_window: usize) -> Heatmap {
    let mut cells: Vec<HeatCell> = record
        .iter()
        .take(max_window)
        .map(|(date, done)| HeatCell {
            date,
            level: if done { habit_index } else { 0 },
        })
        .collect();
    cells.reverse();

    Heatmap {
        shown: cells.len(),
        total_recorded: record.len(),
        cells,
    }
}
