pub mod animator;
pub mod app;
pub mod calendar_window;
pub mod context;
pub mod surface;

pub use animator::TerminalAnimator;
pub use app::App;
pub use calendar_window::{CalendarWindow, StatusLine};
pub use context::{Context, Theme};
pub use surface::{TerminalGrid, TerminalLabel};
