use crate::config::TrackerConfig;
use crate::errors::TrackerError;
use crate::heatmap::{self, Heatmap};
use crate::models::{DashboardResponse, DayEntry, Theme};
use crate::storage::{CURRENT_DATE_KEY, GRAPH_INDEX_KEY, KeyValueStore, THEME_KEY};
use crate::store::HabitStore;
use crate::window::{DateWindow, Direction};
use chrono::{DateTime, Local, NaiveDate};
use tracing::{info, warn};

/// Session state for one tracker page: the habits, the browsed date, the
/// habit shown in the graph panel and the theme choice.
#[derive(Debug, Clone)]
pub struct Tracker {
    store: HabitStore,
    window: DateWindow,
    selected: usize,
    theme: Option<Theme>,
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(today: NaiveDate, config: TrackerConfig) -> Self {
        Self {
            store: HabitStore::new(config.max_habits, config.streak_mode),
            window: DateWindow::new(today).with_history(config.history_days),
            selected: 1,
            theme: None,
            config,
        }
    }

    pub fn load(kv: &impl KeyValueStore, today: NaiveDate, config: TrackerConfig) -> Self {
        let store = HabitStore::load(kv, config.max_habits, config.streak_mode);

        let current = kv
            .get(CURRENT_DATE_KEY)
            .and_then(|raw| {
                let parsed = decode_current_date(&raw);
                if parsed.is_none() {
                    warn!("ignoring stored current date '{raw}'");
                }
                parsed
            })
            .unwrap_or(today);

        let selected = kv
            .get(GRAPH_INDEX_KEY)
            .and_then(|raw| serde_json::from_str::<usize>(raw.trim()).ok())
            .filter(|index| *index > 0)
            .unwrap_or(1);

        let theme = kv.get(THEME_KEY).and_then(|raw| Theme::parse(&raw));

        let mut tracker = Self {
            store,
            window: DateWindow::with_current(today, current).with_history(config.history_days),
            selected,
            theme,
            config,
        };
        tracker.clamp_selection();
        tracker.refresh();
        info!(
            habits = tracker.store.len(),
            current = %tracker.window.current(),
            "loaded tracker state"
        );
        tracker
    }

    pub fn save(&self, kv: &mut impl KeyValueStore) {
        self.store.save(kv);
        match serde_json::to_string(&self.window.current()) {
            Ok(date) => kv.set(CURRENT_DATE_KEY, date),
            Err(err) => warn!("failed to encode current date: {err}"),
        }
        kv.set(GRAPH_INDEX_KEY, self.selected.to_string());
        match self.theme {
            Some(theme) => kv.set(THEME_KEY, format!("\"{}\"", theme.as_str())),
            None => kv.remove(THEME_KEY),
        }
    }

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn add_habit(&mut self, name: &str) -> Result<(), TrackerError> {
        let current = self.window.current();
        self.store.add(name, current)?;
        self.refresh();
        Ok(())
    }

    pub fn remove_habit(&mut self, name: &str) -> Result<(), TrackerError> {
        let position = self
            .store
            .position(name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))?;
        self.store.remove(name)?;
        // Keep the graph panel on the same habit, or the new last one.
        if position < self.selected || self.selected > self.store.len() {
            self.selected = self.selected.saturating_sub(1).max(1);
        }
        Ok(())
    }

    /// Sets completion of `name` on the browsed date and returns its streak.
    pub fn set_completion(&mut self, name: &str, completed: bool) -> Result<u32, TrackerError> {
        self.store.set_completion(name, self.window.current(), completed)
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<NaiveDate, TrackerError> {
        let date = self.window.navigate(direction)?;
        self.refresh();
        Ok(date)
    }

    pub fn jump_to(&mut self, date: NaiveDate) -> Result<NaiveDate, TrackerError> {
        let result = self.window.jump_to(date);
        self.refresh();
        result
    }

    pub fn go_today(&mut self) -> NaiveDate {
        let date = self.window.reset_to_today();
        self.refresh();
        date
    }

    pub fn select_habit(&mut self, index: usize) -> Result<(), TrackerError> {
        if self.store.get_index(index).is_none() {
            return Err(TrackerError::InvalidSelection(index));
        }
        self.selected = index;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    /// Flips the effective theme. With no stored choice the effective theme
    /// is the system preference.
    pub fn toggle_theme(&mut self, system_prefers_dark: bool) -> Theme {
        let effective = self.theme.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        let next = match effective {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.theme = Some(next);
        next
    }

    /// Streak of the selected habit; `None` when there are no habits.
    pub fn current_streak(&self) -> Option<u32> {
        self.store.get_index(self.selected).map(|habit| habit.streak)
    }

    pub fn heatmap(&self) -> Option<Heatmap> {
        self.store
            .get_index(self.selected)
            .map(|habit| heatmap::project(&habit.record, self.selected, self.config.heatmap_window))
    }

    pub fn day_view(&self) -> Vec<DayEntry> {
        let current = self.window.current();
        self.store
            .iter()
            .enumerate()
            .map(|(i, habit)| DayEntry {
                index: i + 1,
                name: habit.name.clone(),
                completed: habit.record.get(current).unwrap_or(false),
                streak: habit.streak,
                color: self.config.color_for(i + 1).to_string(),
            })
            .collect()
    }

    pub fn dashboard(&self) -> DashboardResponse {
        DashboardResponse {
            today: self.window.today(),
            current_date: self.window.current(),
            earliest_date: self.window.floor(),
            can_advance: self.window.can_advance(),
            can_retreat: self.window.can_retreat(),
            capacity: self.store.capacity(),
            at_capacity: self.store.is_full(),
            habits: self.day_view(),
            selected: self.selected,
            streak: self.current_streak(),
            heatmap: self.heatmap(),
            palette: self.config.palette.clone(),
            theme: self.theme,
        }
    }

    fn refresh(&mut self) {
        let current = self.window.current();
        self.store.touch(current);
        self.store
            .fill_gaps(current, self.window.today(), self.window.floor());
    }

    fn clamp_selection(&mut self) {
        if self.selected > self.store.len() {
            self.selected = self.store.len().max(1);
        }
    }
}

/// Accepts a JSON-encoded `YYYY-MM-DD` or an RFC 3339 timestamp, the latter
/// converted to the local calendar day.
fn decode_current_date(raw: &str) -> Option<NaiveDate> {
    let text = serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.trim().to_string());
    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|stamp| stamp.with_timezone(&Local).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{HABITS_KEY, MemoryStore};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker(today: NaiveDate) -> Tracker {
        Tracker::new(today, TrackerConfig::default())
    }

    #[test]
    fn fresh_habit_streak_follows_toggles_across_days() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);

        tracker.add_habit("run").unwrap();
        let habit = tracker.store().get("run").unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.record.len(), 1);
        assert_eq!(habit.record.get(today), Some(false));

        assert_eq!(tracker.set_completion("run", true).unwrap(), 1);
        tracker.navigate(Direction::Prev).unwrap();
        assert_eq!(tracker.set_completion("run", true).unwrap(), 2);
        assert_eq!(tracker.current_streak(), Some(2));
    }

    #[test]
    fn next_is_rejected_on_today() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        assert_eq!(tracker.navigate(Direction::Next), Err(TrackerError::FutureDate));
        assert_eq!(tracker.window().current(), today);
    }

    #[test]
    fn adding_in_the_past_fills_forward_to_today() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        tracker.jump_to(day(2025, 6, 7)).unwrap();
        tracker.add_habit("read").unwrap();

        let record = &tracker.store().get("read").unwrap().record;
        assert_eq!(record.len(), 4);
        assert_eq!(record.iter().next(), Some((today, false)));
        assert_eq!(record.earliest(), Some(day(2025, 6, 7)));
    }

    #[test]
    fn browsing_back_creates_entries_lazily() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        tracker.add_habit("run").unwrap();
        tracker.set_completion("run", true).unwrap();

        tracker.jump_to(day(2025, 6, 5)).unwrap();
        let record = &tracker.store().get("run").unwrap().record;
        assert_eq!(record.len(), 6);
        assert_eq!(record.get(day(2025, 6, 5)), Some(false));
        assert_eq!(tracker.current_streak(), Some(1));
    }

    #[test]
    fn jump_into_future_is_clamped() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        tracker.navigate(Direction::Prev).unwrap();
        assert_eq!(tracker.jump_to(day(2025, 7, 1)), Err(TrackerError::FutureDate));
        assert_eq!(tracker.window().current(), today);
    }

    #[test]
    fn far_past_jump_is_refused_without_backfill() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        tracker.add_habit("run").unwrap();

        assert!(matches!(
            tracker.jump_to(day(1, 1, 1)),
            Err(TrackerError::TooFarBack(_))
        ));
        assert!(matches!(
            tracker.jump_to(NaiveDate::MIN),
            Err(TrackerError::TooFarBack(_))
        ));
        assert_eq!(tracker.window().current(), today);
        assert_eq!(tracker.store().get("run").unwrap().record.len(), 1);
    }

    #[test]
    fn history_limit_caps_navigation_and_fill() {
        let today = day(2025, 6, 10);
        let config = TrackerConfig {
            history_days: 3,
            ..TrackerConfig::default()
        };
        let mut tracker = Tracker::new(today, config);
        tracker.add_habit("run").unwrap();
        for _ in 0..3 {
            tracker.navigate(Direction::Prev).unwrap();
        }
        assert!(matches!(
            tracker.navigate(Direction::Prev),
            Err(TrackerError::TooFarBack(_))
        ));
        assert_eq!(tracker.window().current(), day(2025, 6, 7));
        assert_eq!(tracker.store().get("run").unwrap().record.len(), 4);
        assert!(!tracker.dashboard().can_retreat);
    }

    #[test]
    fn stored_ancient_history_is_not_backfilled() {
        let today = day(2025, 6, 10);
        let mut kv = MemoryStore::new();
        kv.set(HABITS_KEY, r#"[{"habit":"run","record":{"0001-01-01":true}}]"#.into());

        let config = TrackerConfig {
            history_days: 5,
            ..TrackerConfig::default()
        };
        let tracker = Tracker::load(&kv, today, config);
        let record = &tracker.store().get("run").unwrap().record;
        assert_eq!(record.len(), 7);
        assert_eq!(record.earliest(), Some(day(1, 1, 1)));
    }

    #[test]
    fn removing_shifts_selection_down() {
        let mut tracker = tracker(day(2025, 6, 10));
        for name in ["a", "b", "c"] {
            tracker.add_habit(name).unwrap();
        }
        tracker.select_habit(3).unwrap();
        tracker.remove_habit("c").unwrap();
        assert_eq!(tracker.selected(), 2);
        tracker.remove_habit("a").unwrap();
        assert_eq!(tracker.selected(), 1);
        assert_eq!(tracker.store().get_index(1).unwrap().name, "b");
        tracker.remove_habit("b").unwrap();
        assert_eq!(tracker.selected(), 1);
        assert_eq!(tracker.current_streak(), None);
        assert!(tracker.heatmap().is_none());
    }

    #[test]
    fn selection_must_point_at_a_habit() {
        let mut tracker = tracker(day(2025, 6, 10));
        tracker.add_habit("a").unwrap();
        assert_eq!(tracker.select_habit(2), Err(TrackerError::InvalidSelection(2)));
        assert_eq!(tracker.select_habit(0), Err(TrackerError::InvalidSelection(0)));
        assert!(tracker.select_habit(1).is_ok());
    }

    #[test]
    fn heatmap_uses_selected_slot() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        tracker.add_habit("a").unwrap();
        tracker.add_habit("b").unwrap();
        tracker.set_completion("b", true).unwrap();
        tracker.select_habit(2).unwrap();

        let heatmap = tracker.heatmap().unwrap();
        assert_eq!(heatmap.shown, 1);
        assert_eq!(heatmap.cells[0].level, 2);

        let view = tracker.day_view();
        assert_eq!(view[1].color, "#7bc96f");
        assert!(view[1].completed);
        assert!(!view[0].completed);
    }

    #[test]
    fn theme_toggle_starts_from_system_preference() {
        let mut tracker = tracker(day(2025, 6, 10));
        assert_eq!(tracker.toggle_theme(true), Theme::Light);
        assert_eq!(tracker.toggle_theme(true), Theme::Dark);
        tracker.set_theme(Theme::Light);
        assert_eq!(tracker.theme(), Some(Theme::Light));
    }

    #[test]
    fn save_and_load_round_trip() {
        let today = day(2025, 6, 10);
        let mut tracker = tracker(today);
        tracker.add_habit("run").unwrap();
        tracker.add_habit("read").unwrap();
        tracker.set_completion("read", true).unwrap();
        tracker.select_habit(2).unwrap();
        tracker.set_theme(Theme::Dark);
        tracker.navigate(Direction::Prev).unwrap();

        let mut kv = MemoryStore::new();
        tracker.save(&mut kv);
        let loaded = Tracker::load(&kv, today, TrackerConfig::default());
        assert_eq!(loaded.store(), tracker.store());
        assert_eq!(loaded.window(), tracker.window());
        assert_eq!(loaded.selected(), 2);
        assert_eq!(loaded.theme(), Some(Theme::Dark));
    }

    #[test]
    fn load_accepts_legacy_values() {
        let today = day(2025, 6, 10);
        let mut kv = MemoryStore::new();
        kv.set(HABITS_KEY, r#"[{"habit":"run","streak":0,"record":{"2025-6-8":true}}]"#.into());
        kv.set(CURRENT_DATE_KEY, "\"2025-06-09\"".into());
        kv.set(GRAPH_INDEX_KEY, "5".into());
        kv.set(THEME_KEY, "dark".into());

        let tracker = Tracker::load(&kv, today, TrackerConfig::default());
        assert_eq!(tracker.window().current(), day(2025, 6, 9));
        assert_eq!(tracker.selected(), 1);
        assert_eq!(tracker.theme(), Some(Theme::Dark));
        let record = &tracker.store().get("run").unwrap().record;
        assert_eq!(record.len(), 3);
        assert_eq!(record.iter().next(), Some((today, false)));
    }

    #[test]
    fn load_from_garbage_starts_empty() {
        let today = day(2025, 6, 10);
        let mut kv = MemoryStore::new();
        kv.set(HABITS_KEY, "[{".into());
        kv.set(CURRENT_DATE_KEY, "yesterday".into());
        kv.set(GRAPH_INDEX_KEY, "abc".into());

        let tracker = Tracker::load(&kv, today, TrackerConfig::default());
        assert!(tracker.store().is_empty());
        assert_eq!(tracker.window().current(), today);
        assert_eq!(tracker.selected(), 1);
        assert_eq!(tracker.theme(), None);
    }

    #[test]
    fn decodes_timestamp_dates() {
        assert_eq!(decode_current_date("\"2025-06-09\""), Some(day(2025, 6, 9)));
        assert!(decode_current_date("\"2025-06-09T12:00:00.000Z\"").is_some());
        assert_eq!(decode_current_date("\"soon\""), None);
    }
}
