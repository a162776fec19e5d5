use crate::view::{GridCell, GridSurface, LabelSurface};

/// Grid content kept for the next terminal redraw.
#[derive(Debug, Default, Clone)]
pub struct TerminalGrid {
    day_names: Vec<String>,
    cells: Vec<GridCell>,
}

impl TerminalGrid {
    pub fn day_names(&self) -> &[String] {
        &self.day_names
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}

impl GridSurface for TerminalGrid {
    fn replace(&mut self, day_names: &[&str], cells: &[GridCell]) {
        self.day_names = day_names.iter().map(|name| name.to_string()).collect();
        self.cells = cells.to_vec();
    }
}

#[derive(Debug, Default, Clone)]
pub struct TerminalLabel {
    text: String,
}

impl TerminalLabel {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LabelSurface for TerminalLabel {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }
}
