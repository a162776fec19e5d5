pub mod text;

use chrono::Month;
use log;

use crate::agenda::Category;
use crate::locale::Locale;
use crate::model::CalendarModel;

/// What a day cell shows. Today wins over the event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTag {
    Today,
    Event(Category),
}

impl CellTag {
    pub fn class_name(&self) -> &'static str {
        match self {
            CellTag::Today => "today",
            CellTag::Event(category) => category.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub year: i32,
    pub month: Month,
    pub day: u32,
    pub category: Option<Category>,
    pub is_today: bool,
    pub accessible_label: String,
}

impl DayCell {
    pub fn tag(&self) -> Option<CellTag> {
        if self.is_today {
            Some(CellTag::Today)
        } else {
            self.category.map(CellTag::Event)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the first of the month. Carries no date.
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Blank => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, GridCell::Day(_))
    }

    pub fn hidden_from_assistive_tech(&self) -> bool {
        matches!(self, GridCell::Blank)
    }
}

/// Complete rendering of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub label: String,
    pub day_names: [&'static str; 7],
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| !cell.is_interactive())
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }

    /// Index into `cells` of `day`.
    pub fn position_of(&self, day: u32) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.as_day().map_or(false, |c| c.day == day))
    }
}

pub fn layout(model: &CalendarModel, locale: &Locale) -> MonthGrid {
    let displayed = model.current_month();
    let (year, month) = (displayed.year(), displayed.month());
    let month_name = locale.month_name(&month);

    let blanks = model.first_weekday_of_month(year, month) as usize;
    let days = (1..=model.days_in_month(year, month)).map(|day| {
        let is_today = model.is_today(year, month, day);
        let accessible_label = if is_today {
            format!("{} {} {} {}", day, month_name, year, locale.today_suffix())
        } else {
            format!("{} {} {}", day, month_name, year)
        };

        GridCell::Day(DayCell {
            year,
            month,
            day,
            category: model.event_for(year, month, day),
            is_today,
            accessible_label,
        })
    });

    MonthGrid {
        label: format!("{} {}", month_name, year),
        day_names: *locale.day_names(),
        cells: std::iter::repeat(GridCell::Blank)
            .take(blanks)
            .chain(days)
            .collect(),
    }
}

/// Container receiving the day-name headers and the cells.
pub trait GridSurface {
    /// Drops everything shown before and shows exactly the given content.
    fn replace(&mut self, day_names: &[&str], cells: &[GridCell]);
}

/// Element showing the month/year label.
pub trait LabelSurface {
    fn set_text(&mut self, text: &str);
}

pub struct CalendarView<G, L> {
    grid_surface: G,
    label_surface: L,
    locale: Locale,
    grid: Option<MonthGrid>,
}

impl<G: GridSurface, L: LabelSurface> CalendarView<G, L> {
    pub fn new(grid_surface: G, label_surface: L, locale: Locale) -> Self {
        CalendarView {
            grid_surface,
            label_surface,
            locale,
            grid: None,
        }
    }

    /// Rebuilds the whole month from `model` and replaces the surfaces' content.
    pub fn render(&mut self, model: &CalendarModel) {
        let grid = layout(model, &self.locale);
        log::debug!(
            "Rendering '{}' ({} blank, {} day cells)",
            grid.label,
            grid.leading_blanks(),
            grid.cells.len() - grid.leading_blanks()
        );

        self.label_surface.set_text(&grid.label);
        self.grid_surface.replace(&grid.day_names, &grid.cells);
        self.grid = Some(grid);
    }

    /// Last rendered month, `None` before the first render.
    pub fn grid(&self) -> Option<&MonthGrid> {
        self.grid.as_ref()
    }

    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.grid.as_ref().and_then(|grid| grid.cells.get(index))
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn grid_surface(&self) -> &G {
        &self.grid_surface
    }

    pub fn label_surface(&self) -> &L {
        &self.label_surface
    }
}
