use crate::errors::TrackerError;
use crate::gaps;
use crate::models::Habit;
use crate::storage::{HABITS_KEY, KeyValueStore};
use crate::streak::StreakMode;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Habits in insertion order. Position + 1 is the habit's colour slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStore {
    habits: Vec<Habit>,
    capacity: usize,
    streak_mode: StreakMode,
}

impl HabitStore {
    pub fn new(capacity: usize, streak_mode: StreakMode) -> Self {
        Self {
            habits: Vec::new(),
            capacity,
            streak_mode,
        }
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.habits.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.name == name)
    }

    /// 1-based lookup.
    pub fn get_index(&self, index: usize) -> Option<&Habit> {
        index.checked_sub(1).and_then(|i| self.habits.get(i))
    }

    /// 1-based position of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.habits
            .iter()
            .position(|habit| habit.name == name)
            .map(|i| i + 1)
    }

    pub fn add(&mut self, name: &str, started: NaiveDate) -> Result<&Habit, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        if self.get(name).is_some() {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }
        if self.is_full() {
            return Err(TrackerError::CapacityExceeded(self.capacity));
        }

        self.habits.push(Habit::new(name, started));
        debug!(habit = name, %started, "added habit");
        Ok(&self.habits[self.habits.len() - 1])
    }

    pub fn remove(&mut self, name: &str) -> Result<Habit, TrackerError> {
        let index = self
            .habits
            .iter()
            .position(|habit| habit.name == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))?;
        debug!(habit = name, "removed habit");
        Ok(self.habits.remove(index))
    }

    /// Records completion for `date` and returns the habit's new streak.
    pub fn set_completion(
        &mut self,
        name: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<u32, TrackerError> {
        let mode = self.streak_mode;
        let habit = self
            .habits
            .iter_mut()
            .find(|habit| habit.name == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))?;
        habit.record.insert(date, completed);
        habit.streak = mode.compute(&habit.record);
        Ok(habit.streak)
    }

    /// Creates a `false` entry for `date` in every habit that has none.
    pub fn touch(&mut self, date: NaiveDate) -> usize {
        let mut written = 0;
        for habit in &mut self.habits {
            if !habit.record.contains(date) {
                habit.record.insert(date, false);
                written += 1;
            }
        }
        if written > 0 {
            self.recompute_streaks();
        }
        written
    }

    /// Backfills every habit between `current` and `today`, and between its
    /// earliest entry and `current` but not before `floor`.
    pub fn fill_gaps(&mut self, current: NaiveDate, today: NaiveDate, floor: NaiveDate) -> usize {
        let mut written = 0;
        for habit in &mut self.habits {
            written += gaps::fill_forward(&mut habit.record, current, today);
            written += gaps::fill_backward(&mut habit.record, current, floor);
        }
        if written > 0 {
            debug!(written, %current, %today, "filled missing days");
            self.recompute_streaks();
        }
        written
    }

    pub fn recompute_streaks(&mut self) {
        let mode = self.streak_mode;
        for habit in &mut self.habits {
            habit.streak = mode.compute(&habit.record);
        }
    }

    /// Reads the `habits` key. A missing or unreadable payload gives an
    /// empty store.
    pub fn load(kv: &impl KeyValueStore, capacity: usize, streak_mode: StreakMode) -> Self {
        let mut store = Self::new(capacity, streak_mode);
        let Some(raw) = kv.get(HABITS_KEY) else {
            return store;
        };

        match decode_habits(&raw) {
            Ok(habits) => {
                if habits.len() > capacity {
                    warn!(stored = habits.len(), capacity, "stored habits exceed capacity");
                }
                store.habits = habits;
                store.recompute_streaks();
            }
            Err(err) => warn!("discarding stored habits: {err}"),
        }
        store
    }

    pub fn save(&self, kv: &mut impl KeyValueStore) {
        match serde_json::to_string(&self.habits) {
            Ok(payload) => kv.set(HABITS_KEY, payload),
            Err(err) => warn!("failed to encode habits: {err}"),
        }
    }
}

fn decode_habits(raw: &str) -> Result<Vec<Habit>, TrackerError> {
    let habits: Option<Vec<Habit>> =
        serde_json::from_str(raw).map_err(|err| TrackerError::PersistenceCorrupt(err.to_string()))?;
    let habits = habits.unwrap_or_default();

    let mut seen = std::collections::HashSet::new();
    for habit in &habits {
        if !seen.insert(habit.name.as_str()) {
            return Err(TrackerError::PersistenceCorrupt(format!(
                "duplicate habit '{}'",
                habit.name
            )));
        }
    }
    Ok(habits)
}
