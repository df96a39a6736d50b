use crate::record::Record;
use chrono::{Days, Duration, NaiveDate};

/// Inserts `false` for every day in `(from, to]` that has no entry yet.
/// Returns how many entries were written.
pub fn fill(record: &mut Record, from: NaiveDate, to: NaiveDate) -> usize {
    let mut written = 0;
    let mut date = from;
    while date < to {
        date += Duration::days(1);
        if !record.contains(date) {
            record.insert(date, false);
            written += 1;
        }
    }
    written
}

pub fn fill_forward(record: &mut Record, current: NaiveDate, today: NaiveDate) -> usize {
    fill(record, current, today)
}

/// Fills the days strictly between the earliest recorded date and `current`,
/// never writing anything before `floor`.
pub fn fill_backward(record: &mut Record, current: NaiveDate, floor: NaiveDate) -> usize {
    let Some(earliest) = record.earliest() else {
        return 0;
    };
    let Some(before_current) = current.pred_opt() else {
        return 0;
    };
    let start = match floor.checked_sub_days(Days::new(1)) {
        Some(before_floor) => earliest.max(before_floor),
        None => earliest,
    };
    fill(record, start, before_current)
}
