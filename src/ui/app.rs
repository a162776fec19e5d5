use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::model::CalendarModel;

use super::{CalendarWindow, Context, StatusLine};

use unsegen::base::Terminal;
use unsegen::input::{Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior, Scrollable};
use unsegen::widget::*;

pub struct App {
    context: Context,
}

impl App {
    /// `None` if the calendar could not be attached.
    pub fn new(config: &Config, model: CalendarModel) -> Option<App> {
        let context = Context::new(model, config.locale)?;
        Some(App { context })
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(CalendarWindow::new(&self.context))
            .widget(StatusLine::new(&self.context))
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            // Handle events
            if let Ok(event) = dispatcher.next() {
                match event {
                    Event::Tick(now) => self.context.update(now),
                    Event::Input(input) => {
                        input
                            .chain((Key::Char('q'), || run = false))
                            .chain((Key::Char('t'), || self.context.today_month()))
                            .chain((Key::Char('\n'), || {
                                self.context.press_focused();
                            }))
                            .chain((Key::Char(' '), || {
                                self.context.press_focused();
                            }))
                            .chain(
                                NavigateBehavior::new(&mut FocusBehaviour(&mut self.context))
                                    .down_on(Key::Char('j'))
                                    .down_on(Key::Down)
                                    .up_on(Key::Char('k'))
                                    .up_on(Key::Up)
                                    .left_on(Key::Char('h'))
                                    .left_on(Key::Left)
                                    .right_on(Key::Char('l'))
                                    .right_on(Key::Right),
                            )
                            .chain(
                                ScrollBehavior::new(&mut MonthBehaviour(&mut self.context))
                                    .backwards_on(Key::Char('['))
                                    .backwards_on(Key::Char('p'))
                                    .forwards_on(Key::Char(']'))
                                    .forwards_on(Key::Char('n')),
                            )
                            .finish();
                    }
                }
            }

            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        Ok(())
    }
}

struct FocusBehaviour<'a>(&'a mut Context);

impl Navigatable for FocusBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.0.move_focus(7)
    }

    fn move_left(&mut self) -> OperationResult {
        self.0.move_focus(-1)
    }

    fn move_right(&mut self) -> OperationResult {
        self.0.move_focus(1)
    }

    fn move_up(&mut self) -> OperationResult {
        self.0.move_focus(-7)
    }
}

struct MonthBehaviour<'a>(&'a mut Context);

impl Scrollable for MonthBehaviour<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        self.0.previous_month();
        Ok(())
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        self.0.next_month();
        Ok(())
    }
}
