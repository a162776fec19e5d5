use chrono::Datelike;
use std::time::Instant;

use unsegen::base::style::*;

use crate::agenda::Category;
use crate::controller::{CalendarController, MountPoints};
use crate::datetime::MonthIndex;
use crate::locale::Locale;
use crate::model::CalendarModel;
use crate::view::GridCell;

use super::{TerminalAnimator, TerminalGrid, TerminalLabel};

pub type TerminalCalendar = CalendarController<TerminalGrid, TerminalLabel, TerminalAnimator>;

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub today_day_style: StyleModifier,
    pub today_day_text_style: TextFormatModifier,
    pub today_day_char: Option<char>,
    pub pop_day_style: StyleModifier,
    pub collect_style: StyleModifier,
    pub deadline_style: StyleModifier,
    pub exam_style: StyleModifier,
    pub trigger_style: StyleModifier,
    pub pressed_trigger_style: StyleModifier,
    pub label_style: StyleModifier,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            today_day_style: StyleModifier::default().invert(true),
            today_day_text_style: TextFormatModifier::default().italic(true),
            today_day_char: Some('*'),
            pop_day_style: StyleModifier::default().fg_color(Color::LightYellow),
            collect_style: StyleModifier::default().fg_color(Color::Green),
            deadline_style: StyleModifier::default().fg_color(Color::LightRed),
            exam_style: StyleModifier::default().fg_color(Color::Magenta),
            trigger_style: StyleModifier::default().fg_color(Color::Cyan),
            pressed_trigger_style: StyleModifier::default().fg_color(Color::Cyan).invert(true),
            label_style: StyleModifier::default(),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default(),
        }
    }
}

impl Theme {
    pub fn category_style(&self, category: &Category) -> StyleModifier {
        match category {
            Category::Collect => self.collect_style,
            Category::Deadline => self.deadline_style,
            Category::Exam => self.exam_style,
        }
    }
}

/// State of the terminal front end: the calendar plus the focused day.
pub struct Context {
    calendar: TerminalCalendar,
    theme: Theme,
    focus_day: u32,
    now: Instant,
}

impl Context {
    pub fn new(model: CalendarModel, locale: Locale) -> Option<Self> {
        let today = model.today();
        let mounts = MountPoints::new(TerminalGrid::default(), TerminalLabel::default());
        let calendar =
            CalendarController::attach(model, mounts, locale, TerminalAnimator::default())?;

        let focus_day = if calendar.model().current_month().contains(&today) {
            today.day()
        } else {
            1
        };

        Some(Context {
            calendar,
            theme: Theme::default(),
            focus_day,
            now: Instant::now(),
        })
    }

    pub fn calendar(&self) -> &TerminalCalendar {
        &self.calendar
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn focus_day(&self) -> u32 {
        self.focus_day
    }

    /// Advances the animation clock to `now` and drops finished pulses.
    pub fn update(&mut self, now: Instant) {
        self.now = now;
        self.calendar.animator_mut().prune(now);
    }

    pub fn focused_cell(&self) -> Option<&GridCell> {
        self.focus_index()
            .and_then(|index| self.calendar.view().cell(index))
    }

    fn focus_index(&self) -> Option<usize> {
        self.calendar
            .view()
            .grid()
            .and_then(|grid| grid.position_of(self.focus_day))
    }

    fn num_days(&self) -> u32 {
        self.calendar.model().current_month().num_days()
    }

    fn clamp_focus(&mut self) {
        self.focus_day = self.focus_day.min(self.num_days());
    }

    /// Moves the focus by `delta` days, staying inside the displayed month.
    pub fn move_focus(&mut self, delta: i32) -> Result<(), ()> {
        let target = self.focus_day as i32 + delta;
        if target >= 1 && target <= self.num_days() as i32 {
            self.focus_day = target as u32;
            Ok(())
        } else {
            Err(())
        }
    }

    pub fn previous_month(&mut self) {
        self.calendar.go_to_previous_month();
        self.clamp_focus();
    }

    pub fn next_month(&mut self) {
        self.calendar.go_to_next_month();
        self.clamp_focus();
    }

    pub fn today_month(&mut self) {
        let today = self.calendar.model().today();
        self.calendar.go_to_month(MonthIndex::from(today));
        self.focus_day = today.day();
    }

    pub fn press_focused(&mut self) -> bool {
        match self.focus_index() {
            Some(index) => self.calendar.press_cell(index),
            None => false,
        }
    }
}
