use log;

use crate::animation::{Animator, Pulse, PulseTarget};
use crate::datetime::MonthIndex;
use crate::locale::Locale;
use crate::model::CalendarModel;
use crate::view::{CalendarView, GridCell, GridSurface, LabelSurface};

/// Previous or next navigation element provided by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    target: PulseTarget,
}

impl Trigger {
    pub fn prev() -> Self {
        Trigger {
            target: PulseTarget::PrevTrigger,
        }
    }

    pub fn next() -> Self {
        Trigger {
            target: PulseTarget::NextTrigger,
        }
    }

    pub fn target(&self) -> PulseTarget {
        self.target
    }
}

/// The four places the calendar attaches to. All of them have to be present.
pub struct MountPoints<G, L> {
    pub grid: Option<G>,
    pub label: Option<L>,
    pub prev: Option<Trigger>,
    pub next: Option<Trigger>,
}

impl<G, L> MountPoints<G, L> {
    pub fn new(grid: G, label: L) -> Self {
        MountPoints {
            grid: Some(grid),
            label: Some(label),
            prev: Some(Trigger::prev()),
            next: Some(Trigger::next()),
        }
    }
}

pub struct CalendarController<G, L, A> {
    model: CalendarModel,
    view: CalendarView<G, L>,
    animator: A,
    prev: Trigger,
    next: Trigger,
}

impl<G: GridSurface, L: LabelSurface, A: Animator> CalendarController<G, L, A> {
    /// Attaches to `mounts` and renders the initial month.
    ///
    /// Returns `None` without rendering anything if a mount point is missing.
    pub fn attach(
        model: CalendarModel,
        mounts: MountPoints<G, L>,
        locale: Locale,
        animator: A,
    ) -> Option<Self> {
        let (grid, label, prev, next) = match mounts {
            MountPoints {
                grid: Some(grid),
                label: Some(label),
                prev: Some(prev),
                next: Some(next),
            } => (grid, label, prev, next),
            MountPoints {
                grid,
                label,
                prev,
                next,
            } => {
                log::debug!(
                    "Calendar not attached, missing mount points (grid: {}, label: {}, prev: {}, next: {})",
                    grid.is_some(),
                    label.is_some(),
                    prev.is_some(),
                    next.is_some()
                );
                return None;
            }
        };

        let mut controller = CalendarController {
            model: model.week_start(locale.week_start()),
            view: CalendarView::new(grid, label, locale),
            animator,
            prev,
            next,
        };
        controller.view.render(&controller.model);

        Some(controller)
    }

    pub fn go_to_previous_month(&mut self) {
        self.animator.pulse(self.prev.target(), Pulse::NAV_PRESS);
        self.model.advance(-1);
        log::debug!("Previous month: {}", self.model.current_month());
        self.view.render(&self.model);
    }

    pub fn go_to_next_month(&mut self) {
        self.animator.pulse(self.next.target(), Pulse::NAV_PRESS);
        self.model.advance(1);
        log::debug!("Next month: {}", self.model.current_month());
        self.view.render(&self.model);
    }

    pub fn go_to_month(&mut self, month: MonthIndex) {
        self.model.show(month);
        log::debug!("Jump to month: {}", month);
        self.view.render(&self.model);
    }

    /// Pops the day cell at `index`. Blank or missing cells are ignored.
    pub fn press_cell(&mut self, index: usize) -> bool {
        match self.view.cell(index) {
            Some(GridCell::Day(cell)) => {
                self.animator.pulse(PulseTarget::Day(cell.day), Pulse::CELL_POP);
                true
            }
            _ => false,
        }
    }

    pub fn model(&self) -> &CalendarModel {
        &self.model
    }

    pub fn view(&self) -> &CalendarView<G, L> {
        &self.view
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::{Category, EventMap};
    use crate::animation::NoopAnimator;
    use crate::datetime::DateKey;
    use crate::view::text::{TextGrid, TextLabel};
    use crate::view::CellTag;
    use chrono::{Month, NaiveDate};

    #[derive(Default)]
    struct RecordingAnimator {
        pulses: Vec<(PulseTarget, Pulse)>,
    }

    impl Animator for RecordingAnimator {
        fn pulse(&mut self, target: PulseTarget, pulse: Pulse) {
            self.pulses.push((target, pulse));
        }
    }

    fn model(month: MonthIndex) -> CalendarModel {
        let events = EventMap::new()
            .with_event(DateKey::new(2026, Month::February, 14), Category::Deadline);
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        CalendarModel::new(month, events, today)
    }

    fn attach<A: Animator>(
        month: MonthIndex,
        animator: A,
    ) -> CalendarController<TextGrid, TextLabel, A> {
        CalendarController::attach(
            model(month),
            MountPoints::new(TextGrid::default(), TextLabel::default()),
            Locale::default(),
            animator,
        )
        .unwrap()
    }

    #[test]
    fn initial_render_on_attach() {
        let controller = attach(MonthIndex::new(Month::February, 2026), NoopAnimator);
        let grid = controller.view().grid().unwrap();

        assert_eq!(controller.view().label_surface().text(), "Februari 2026");
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.days().count(), 28);
        assert_eq!(
            grid.day(14).unwrap().tag(),
            Some(CellTag::Event(Category::Deadline))
        );
    }

    #[test]
    fn next_month_crosses_year() {
        let mut controller = attach(MonthIndex::new(Month::December, 2026), NoopAnimator);
        controller.go_to_next_month();

        assert_eq!(
            controller.model().current_month(),
            MonthIndex::new(Month::January, 2027)
        );
        assert_eq!(controller.view().label_surface().text(), "Januari 2027");

        controller.go_to_previous_month();
        assert_eq!(
            controller.model().current_month(),
            MonthIndex::new(Month::December, 2026)
        );
        assert_eq!(controller.view().label_surface().text(), "Desember 2026");
    }

    #[test]
    fn navigation_pulses_its_trigger() {
        let mut controller = attach(
            MonthIndex::new(Month::February, 2026),
            RecordingAnimator::default(),
        );
        controller.go_to_previous_month();
        controller.go_to_next_month();

        assert_eq!(
            controller.animator().pulses,
            vec![
                (PulseTarget::PrevTrigger, Pulse::NAV_PRESS),
                (PulseTarget::NextTrigger, Pulse::NAV_PRESS),
            ]
        );
    }

    #[test]
    fn pressing_cells() {
        // October 2026 starts on a Thursday, so four blanks lead the grid
        let mut controller = attach(
            MonthIndex::new(Month::October, 2026),
            RecordingAnimator::default(),
        );

        assert!(!controller.press_cell(0));
        assert!(!controller.press_cell(3));
        assert!(controller.press_cell(4));
        assert!(controller.press_cell(20));
        assert!(!controller.press_cell(35));

        assert_eq!(
            controller.animator().pulses,
            vec![
                (PulseTarget::Day(1), Pulse::CELL_POP),
                (PulseTarget::Day(17), Pulse::CELL_POP),
            ]
        );
    }

    #[test]
    fn jump_to_month() {
        let mut controller = attach(
            MonthIndex::new(Month::February, 2026),
            RecordingAnimator::default(),
        );
        controller.go_to_month(MonthIndex::new(Month::October, 2026));

        assert_eq!(controller.view().label_surface().text(), "Oktober 2026");
        assert!(controller.animator().pulses.is_empty());
    }

    #[test]
    fn missing_mount_point_is_a_no_op() {
        let without_next = MountPoints {
            grid: Some(TextGrid::default()),
            label: Some(TextLabel::default()),
            prev: Some(Trigger::prev()),
            next: None,
        };
        assert!(CalendarController::attach(
            model(MonthIndex::new(Month::February, 2026)),
            without_next,
            Locale::default(),
            NoopAnimator,
        )
        .is_none());

        let without_grid: MountPoints<TextGrid, TextLabel> = MountPoints {
            grid: None,
            ..MountPoints::new(TextGrid::default(), TextLabel::default())
        };
        assert!(CalendarController::attach(
            model(MonthIndex::new(Month::February, 2026)),
            without_grid,
            Locale::default(),
            NoopAnimator,
        )
        .is_none());
    }

    #[test]
    fn week_start_follows_locale() {
        let controller = CalendarController::attach(
            model(MonthIndex::new(Month::February, 2026)),
            MountPoints::new(TextGrid::default(), TextLabel::default()),
            "de".parse().unwrap(),
            NoopAnimator,
        )
        .unwrap();

        let grid = controller.view().grid().unwrap();
        assert_eq!(grid.day_names[0], "Mo");
        assert_eq!(grid.leading_blanks(), 6);
    }
}
