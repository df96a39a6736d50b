use chrono::NaiveDate;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Per-habit completion history keyed by calendar day.
///
/// Iteration is always newest first. Streaks and the heat-map read entry 0 as
/// the most recent day, so every accessor here preserves that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    days: BTreeMap<NaiveDate, bool>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, completed: bool) -> Option<bool> {
        self.days.insert(date, completed)
    }

    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.days.get(&date).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn earliest(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, bool)> + '_ {
        self.days.iter().rev().map(|(date, done)| (*date, *done))
    }
}

impl FromIterator<(NaiveDate, bool)> for Record {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, bool)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` key. Unpadded month/day (`2025-9-2`) is accepted.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, done) in self.iter() {
            map.serialize_entry(&date_key(date), &done)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of YYYY-MM-DD keys to booleans")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((key, done)) = access.next_entry::<String, bool>()? {
            let date = parse_date_key(&key)
                .ok_or_else(|| de::Error::custom(format!("invalid date key '{key}'")))?;
            record.insert(date, done);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
