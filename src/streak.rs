use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How consecutive completions are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakMode {
    /// Walk the record in order; a missing day between two entries is not a break.
    #[default]
    RecordOrder,
    /// Also break when neighbouring entries are not exactly one day apart.
    Contiguous,
}

impl StreakMode {
    pub fn compute(self, record: &Record) -> u32 {
        match self {
            StreakMode::RecordOrder => compute_streak(record),
            StreakMode::Contiguous => compute_contiguous_streak(record),
        }
    }
}

/// Number of `true` entries from the newest entry backward, stopping at the
/// first `false`.
pub fn compute_streak(record: &Record) -> u32 {
    record.iter().take_while(|(_, done)| *done).count() as u32
}

pub fn compute_contiguous_streak(record: &Record) -> u32 {
    let mut streak = 0;
    let mut previous: Option<NaiveDate> = None;
    for (date, done) in record.iter() {
        if !done {
            break;
        }
        if let Some(prev) = previous {
            if (prev - date).num_days() != 1 {
                break;
            }
        }
        streak += 1;
        previous = Some(date);
    }
    streak
}
