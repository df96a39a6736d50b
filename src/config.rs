use crate::heatmap::DEFAULT_WINDOW;
use crate::streak::StreakMode;
use std::env;
use tracing::warn;

pub const DEFAULT_MAX_HABITS: usize = 8;
pub const DEFAULT_HISTORY_DAYS: u32 = 1095;

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#f08080", "#7bc96f", "#87cefa", "#9370db", "#ff7f50", "#0044cc", "#ffd700", "#ff69b4",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub max_habits: usize,
    pub palette: Vec<String>,
    pub heatmap_window: usize,
    pub streak_mode: StreakMode,
    /// How many days before today the browsed date may go.
    pub history_days: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_habits: DEFAULT_MAX_HABITS,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            heatmap_window: DEFAULT_WINDOW,
            streak_mode: StreakMode::default(),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("HABIT_MAX") {
            match raw.trim().parse::<usize>() {
                Ok(max) if max > 0 => config.max_habits = max,
                _ => warn!("ignoring invalid HABIT_MAX value '{raw}'"),
            }
        }

        if let Some(raw) = lookup("HEATMAP_WINDOW") {
            match raw.trim().parse::<usize>() {
                Ok(window) if window > 0 => config.heatmap_window = window,
                _ => warn!("ignoring invalid HEATMAP_WINDOW value '{raw}'"),
            }
        }

        if let Some(raw) = lookup("HISTORY_DAYS") {
            match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => config.history_days = days,
                _ => warn!("ignoring invalid HISTORY_DAYS value '{raw}'"),
            }
        }

        if let Some(raw) = lookup("STREAK_MODE") {
            match raw.trim() {
                "order" => config.streak_mode = StreakMode::RecordOrder,
                "contiguous" => config.streak_mode = StreakMode::Contiguous,
                _ => warn!("ignoring invalid STREAK_MODE value '{raw}'"),
            }
        }

        config
    }

    /// Colour for a 1-based habit index; the palette repeats past its end.
    pub fn color_for(&self, index: usize) -> &str {
        if self.palette.is_empty() || index == 0 {
            return "";
        }
        &self.palette[(index - 1) % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("HABIT_MAX", "4"),
            ("HEATMAP_WINDOW", "120"),
            ("STREAK_MODE", "contiguous"),
            ("HISTORY_DAYS", "365"),
        ]
        .into_iter()
        .collect();
        let config = TrackerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.max_habits, 4);
        assert_eq!(config.heatmap_window, 120);
        assert_eq!(config.streak_mode, StreakMode::Contiguous);
        assert_eq!(config.history_days, 365);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = TrackerConfig::from_lookup(|key| match key {
            "HABIT_MAX" => Some("0".into()),
            "HEATMAP_WINDOW" => Some("lots".into()),
            "HISTORY_DAYS" => Some("-3".into()),
            _ => None,
        });
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn palette_cycles_by_index() {
        let config = TrackerConfig::default();
        assert_eq!(config.color_for(1), "#f08080");
        assert_eq!(config.color_for(8), "#ff69b4");
        assert_eq!(config.color_for(9), "#f08080");
    }
}
