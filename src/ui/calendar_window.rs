use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use crate::agenda::Category;
use crate::animation::PulseTarget;
use crate::view::{CellTag, DayCell, GridCell};

use super::{Context, Theme};

const CELL_WIDTH: usize = 5;
const COLUMNS: usize = 7;
const ROWS: usize = 6;
// label bar, day names
const HEADER_ROWS: usize = 2;
const LEGEND_ROWS: usize = 2;

/// Scale above which a popping cell is drawn emphasized.
const POP_THRESHOLD: f64 = 1.05;
/// Scale below which a trigger is drawn pressed.
const PRESS_THRESHOLD: f64 = 0.97;

struct DayText<'a> {
    cell: &'a DayCell,
    theme: &'a Theme,
    popped: bool,
}

impl Display for DayText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (open, close) = if self.popped {
            ('[', ']')
        } else if self.cell.is_today {
            (self.theme.today_day_char.unwrap_or(' '), ' ')
        } else {
            (' ', ' ')
        };

        write!(f, "{}{:>2}{} ", open, self.cell.day, close)
    }
}

pub struct CalendarWindow<'a> {
    context: &'a Context,
}

impl<'a> CalendarWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        CalendarWindow { context }
    }

    fn trigger_style(&self, target: PulseTarget) -> StyleModifier {
        let theme = self.context.theme();
        let pressed = self
            .context
            .calendar()
            .animator()
            .scale_of(target, self.context.now())
            .map_or(false, |scale| scale < PRESS_THRESHOLD);

        if pressed {
            theme.pressed_trigger_style
        } else {
            theme.trigger_style
        }
    }

    fn day_style(&self, cell: &DayCell) -> StyleModifier {
        let theme = self.context.theme();
        match cell.tag() {
            Some(CellTag::Today) => theme.today_day_style.format(theme.today_day_text_style),
            Some(CellTag::Event(category)) => theme.category_style(&category),
            None => theme.day_style,
        }
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(COLUMNS * CELL_WIDTH),
            height: RowDemand::exact(HEADER_ROWS + ROWS + LEGEND_ROWS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let calendar = self.context.calendar();
        let grid = calendar.view().grid_surface();
        let label = calendar.view().label_surface();

        let mut cursor = Cursor::new(&mut window).wrapping_mode(WrappingMode::Wrap);

        // label bar with the navigation triggers
        cursor.set_style_modifier(self.trigger_style(PulseTarget::PrevTrigger));
        write!(&mut cursor, " < ").unwrap();
        cursor.set_style_modifier(theme.label_style);
        write!(
            &mut cursor,
            "{:^width$}",
            label.text(),
            width = COLUMNS * CELL_WIDTH - 6
        )
        .unwrap();
        cursor.set_style_modifier(self.trigger_style(PulseTarget::NextTrigger));
        write!(&mut cursor, " > ").unwrap();
        cursor.fill_and_wrap_line();

        cursor.set_style_modifier(
            theme
                .month_header_style
                .format(theme.month_header_text_style),
        );
        for name in grid.day_names() {
            write!(&mut cursor, "{:>width$}  ", name, width = CELL_WIDTH - 2).unwrap();
        }
        cursor.fill_and_wrap_line();

        let focus_day = self.context.focus_day();
        let animator = calendar.animator();

        for (idx, cell) in grid.cells().iter().enumerate() {
            match cell {
                GridCell::Blank => {
                    cursor.set_style_modifier(theme.day_style);
                    write!(&mut cursor, "{:width$}", "", width = CELL_WIDTH).unwrap();
                }
                GridCell::Day(day) => {
                    let popped = animator
                        .scale_of(PulseTarget::Day(day.day), self.context.now())
                        .map_or(false, |scale| scale > POP_THRESHOLD);

                    cursor.set_style_modifier(self.day_style(day));
                    if day.day == focus_day {
                        cursor.apply_style_modifier(theme.focus_day_style);
                    }
                    if popped {
                        cursor.apply_style_modifier(theme.pop_day_style);
                    }

                    write!(
                        &mut cursor,
                        "{}",
                        DayText {
                            cell: day,
                            theme,
                            popped
                        }
                    )
                    .unwrap();
                }
            }

            if idx % COLUMNS == COLUMNS - 1 {
                cursor.fill_and_wrap_line();
            }
        }

        if grid.cells().len() % COLUMNS != 0 {
            cursor.fill_and_wrap_line();
        }

        // legend below the last possible week
        let weeks = (grid.cells().len() + COLUMNS - 1) / COLUMNS;
        for _ in weeks..ROWS {
            cursor.set_style_modifier(theme.day_style);
            cursor.fill_and_wrap_line();
        }
        cursor.fill_and_wrap_line();

        for category in Category::ALL.iter() {
            cursor.set_style_modifier(theme.category_style(category));
            write!(&mut cursor, "■ {} ", category).unwrap();
        }
        cursor.set_style_modifier(theme.today_day_style.format(theme.today_day_text_style));
        write!(&mut cursor, "{}", theme.today_day_char.unwrap_or(' ')).unwrap();
        cursor.set_style_modifier(theme.day_style);
        write!(&mut cursor, " {}", calendar.view().locale().today_suffix()).unwrap();
    }
}

/// Accessible description of the focused day.
pub struct StatusLine<'a> {
    context: &'a Context,
}

impl<'a> StatusLine<'a> {
    pub fn new(context: &'a Context) -> Self {
        StatusLine { context }
    }
}

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(COLUMNS * CELL_WIDTH),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);

        if let Some(GridCell::Day(day)) = self.context.focused_cell() {
            let result = match day.category {
                Some(category) => write!(&mut cursor, "{}: {}", day.accessible_label, category),
                None => write!(&mut cursor, "{}", day.accessible_label),
            };

            if let Err(err) = result {
                log::warn!("Error while writing status line: {}", err);
            }
        }
    }
}
