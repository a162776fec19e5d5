use chrono::Month;
use serde_with::DeserializeFromStr;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

use crate::datetime::DateKey;
use crate::error::{Error, ErrorKind, Result};

/// Cosmetic tag of an annotated date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub enum Category {
    Collect,
    Deadline,
    Exam,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Collect, Category::Deadline, Category::Exam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Collect => "collect",
            Category::Deadline => "deadline",
            Category::Exam => "exam",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .iter()
            .find(|category| category.as_str() == s)
            .copied()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CategoryParse,
                    &format!("'{}' is none of collect, deadline, exam", s),
                )
            })
    }
}

/// Static date annotations. Built once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct EventMap {
    events: HashMap<DateKey, Category>,
}

impl EventMap {
    pub fn new() -> Self {
        EventMap::default()
    }

    pub fn with_event(mut self, key: DateKey, category: Category) -> Self {
        self.events.insert(key, category);
        self
    }

    /// Panics unless `day` exists in `month` of `year`.
    pub fn event_for(&self, year: i32, month: Month, day: u32) -> Option<Category> {
        self.events.get(&DateKey::new(year, month, day)).copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &Category)> {
        self.events.iter()
    }
}

impl From<&BTreeMap<DateKey, Category>> for EventMap {
    fn from(table: &BTreeMap<DateKey, Category>) -> Self {
        EventMap {
            events: table.iter().map(|(k, v)| (*k, *v)).collect(),
        }
    }
}

impl FromIterator<(DateKey, Category)> for EventMap {
    fn from_iter<I: IntoIterator<Item = (DateKey, Category)>>(iter: I) -> Self {
        EventMap {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_categories() {
        assert_eq!("collect".parse::<Category>().unwrap(), Category::Collect);
        assert_eq!("deadline".parse::<Category>().unwrap(), Category::Deadline);
        assert_eq!("exam".parse::<Category>().unwrap(), Category::Exam);
        assert!("Exam".parse::<Category>().is_err());
        assert!("holiday".parse::<Category>().is_err());
    }

    #[test]
    fn lookup_events() {
        let events = EventMap::new()
            .with_event(DateKey::new(2026, Month::February, 14), Category::Deadline)
            .with_event(DateKey::new(2026, Month::February, 21), Category::Exam);

        assert_eq!(events.len(), 2);
        assert_eq!(
            events.event_for(2026, Month::February, 14),
            Some(Category::Deadline)
        );
        assert_eq!(events.event_for(2026, Month::February, 21), Some(Category::Exam));
        assert_eq!(events.event_for(2026, Month::February, 15), None);
        assert_eq!(events.event_for(2027, Month::February, 14), None);
    }

    #[test]
    fn later_entry_replaces_earlier_one() {
        let key = DateKey::new(2026, Month::March, 7);
        let events: EventMap = vec![(key, Category::Collect), (key, Category::Exam)]
            .into_iter()
            .collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events.event_for(2026, Month::March, 7), Some(Category::Exam));
    }

    #[test]
    #[should_panic]
    fn lookup_with_impossible_day_panics() {
        EventMap::new().event_for(2026, Month::April, 31);
    }
}
