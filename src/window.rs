use crate::errors::TrackerError;
use chrono::{Days, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// The browsed day and the fixed notion of "today" for this session.
///
/// `today` is captured once; a session that runs past midnight keeps the old
/// value until restart. Browsing never goes before `floor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    today: NaiveDate,
    floor: NaiveDate,
    current: NaiveDate,
}

impl DateWindow {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            floor: NaiveDate::MIN,
            current: today,
        }
    }

    /// Restores a persisted browsing date. Dates after `today` are clamped.
    pub fn with_current(today: NaiveDate, current: NaiveDate) -> Self {
        Self {
            today,
            floor: NaiveDate::MIN,
            current: current.min(today),
        }
    }

    /// Limits browsing to `history_days` before today. The current date is
    /// pulled forward if it lies before the new floor.
    pub fn with_history(mut self, history_days: u32) -> Self {
        self.floor = self
            .today
            .checked_sub_days(Days::new(u64::from(history_days)))
            .unwrap_or(NaiveDate::MIN);
        self.current = self.current.max(self.floor);
        self
    }

    pub fn floor(&self) -> NaiveDate {
        self.floor
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    /// The neighbouring day, or `None` past the end of the calendar.
    pub fn advance(&self, direction: Direction) -> Option<NaiveDate> {
        match direction {
            Direction::Prev => self.current.checked_sub_days(Days::new(1)),
            Direction::Next => self.current.checked_add_days(Days::new(1)),
        }
    }

    pub fn clamp_to_today(&self, date: NaiveDate) -> NaiveDate {
        date.min(self.today)
    }

    pub fn can_advance(&self) -> bool {
        self.current < self.today
    }

    pub fn can_retreat(&self) -> bool {
        self.current > self.floor
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<NaiveDate, TrackerError> {
        let target = match (direction, self.advance(direction)) {
            (Direction::Next, Some(target)) if target <= self.today => target,
            (Direction::Next, _) => return Err(TrackerError::FutureDate),
            (Direction::Prev, Some(target)) if target >= self.floor => target,
            (Direction::Prev, _) => return Err(TrackerError::TooFarBack(self.floor)),
        };
        self.current = target;
        Ok(target)
    }

    /// Moves to `date`. A future date lands on `today` and still reports
    /// `FutureDate` so the caller can surface the notice. A date before the
    /// floor is refused and the view stays put.
    pub fn jump_to(&mut self, date: NaiveDate) -> Result<NaiveDate, TrackerError> {
        if date < self.floor {
            return Err(TrackerError::TooFarBack(self.floor));
        }
        self.current = self.clamp_to_today(date);
        if date > self.today {
            return Err(TrackerError::FutureDate);
        }
        Ok(self.current)
    }

    pub fn reset_to_today(&mut self) -> NaiveDate {
        self.current = self.today;
        self.current
    }
}
