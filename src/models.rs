use crate::heatmap::Heatmap;
use crate::record::Record;
use crate::window::Direction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(rename = "habit", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub record: Record,
}

impl Habit {
    pub fn new(name: impl Into<String>, started: NaiveDate) -> Self {
        let mut record = Record::new();
        record.insert(started, false);
        Self {
            name: name.into(),
            streak: 0,
            record,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_matches('"') {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigateTarget {
    Prev,
    Next,
    Today,
}

impl NavigateTarget {
    pub fn direction(self) -> Option<Direction> {
        match self {
            NavigateTarget::Prev => Some(Direction::Prev),
            NavigateTarget::Next => Some(Direction::Next),
            NavigateTarget::Today => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: NavigateTarget,
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    /// Explicit choice; absent means flip the current theme.
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub system_dark: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub index: usize,
    pub name: String,
    pub completed: bool,
    pub streak: u32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub current_date: NaiveDate,
    pub earliest_date: NaiveDate,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub capacity: usize,
    pub at_capacity: bool,
    pub habits: Vec<DayEntry>,
    pub selected: usize,
    pub streak: Option<u32>,
    pub heatmap: Option<Heatmap>,
    pub palette: Vec<String>,
    pub theme: Option<Theme>,
}
