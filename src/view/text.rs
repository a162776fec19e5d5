//! Plain-text surfaces, used for non-interactive output.

use itertools::Itertools;
use std::fmt;

use super::{CellTag, GridCell, GridSurface, LabelSurface};

const CELL_WIDTH: usize = 4;

/// Single character appended to a day number to show its tag.
pub fn marker(tag: Option<CellTag>) -> char {
    match tag {
        Some(CellTag::Today) => '*',
        Some(CellTag::Event(category)) => category
            .as_str()
            .chars()
            .next()
            .unwrap_or(' '),
        None => ' ',
    }
}

#[derive(Debug, Default, Clone)]
pub struct TextLabel {
    text: String,
}

impl TextLabel {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LabelSurface for TextLabel {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }
}

/// Grid written as one header row plus one row per week.
#[derive(Debug, Default, Clone)]
pub struct TextGrid {
    rows: Vec<String>,
}

impl TextGrid {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl GridSurface for TextGrid {
    fn replace(&mut self, day_names: &[&str], cells: &[GridCell]) {
        let header = day_names
            .iter()
            .map(|name| format!("{:>width$}", name, width = CELL_WIDTH - 1))
            .join(" ");

        let weeks = cells.chunks(7).map(|week| {
            week.iter()
                .map(|cell| match cell {
                    GridCell::Blank => " ".repeat(CELL_WIDTH - 1),
                    GridCell::Day(day) => format!("{:>2}{}", day.day, marker(day.tag())),
                })
                .join(" ")
                .trim_end()
                .to_owned()
        });

        self.rows = std::iter::once(header).chain(weeks).collect();
    }
}

impl fmt::Display for TextGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
