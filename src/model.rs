use chrono::{Datelike, Month, NaiveDate, Weekday};

use crate::agenda::{Category, EventMap};
use crate::datetime::{self, MonthIndex};

/// Displayed month, the static event annotations and the date captured as today.
#[derive(Debug, Clone)]
pub struct CalendarModel {
    displayed: MonthIndex,
    events: EventMap,
    today: NaiveDate,
    week_start: Weekday,
}

impl CalendarModel {
    pub fn new(initial: MonthIndex, events: EventMap, today: NaiveDate) -> Self {
        CalendarModel {
            displayed: initial,
            events,
            today,
            week_start: Weekday::Sun,
        }
    }

    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn current_month(&self) -> MonthIndex {
        self.displayed
    }

    pub fn advance(&mut self, delta: i32) {
        self.displayed = self.displayed + delta;
    }

    pub fn show(&mut self, month: MonthIndex) {
        self.displayed = month;
    }

    pub fn event_for(&self, year: i32, month: Month, day: u32) -> Option<Category> {
        self.events.event_for(year, month, day)
    }

    pub fn is_today(&self, year: i32, month: Month, day: u32) -> bool {
        assert!(
            (1..=self.days_in_month(year, month)).contains(&day),
            "day {} out of range for {} {}",
            day,
            month.name(),
            year
        );

        self.today.year() == year
            && self.today.month() == month.number_from_month()
            && self.today.day() == day
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    pub fn days_in_month(&self, year: i32, month: Month) -> u32 {
        datetime::days_of_month(&month, year)
    }

    pub fn first_weekday_of_month(&self, year: i32, month: Month) -> u32 {
        datetime::first_weekday_offset(&month, year, self.week_start)
    }
}
