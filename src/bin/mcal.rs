extern crate monthcal as lib;

use chrono::Local;
use flexi_logger::{FileSpec, Logger};
use lib::animation::NoopAnimator;
use lib::controller::{CalendarController, MountPoints};
use lib::datetime::MonthIndex;
use lib::events::Dispatcher;
use lib::model::CalendarModel;
use lib::ui::App;
use lib::view::text::{marker, TextGrid, TextLabel};
use lib::view::CellTag;
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(name = "mcal", about = "A month calendar with annotated course dates.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the initial month non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "month", help = "initial month as YYYY-M")]
    pub month: Option<MonthIndex>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn show(model: CalendarModel, config: &lib::config::Config) {
    let mounts = MountPoints::new(TextGrid::default(), TextLabel::default());
    if let Some(calendar) = CalendarController::attach(model, mounts, config.locale, NoopAnimator) {
        let view = calendar.view();
        println!("{}", view.label_surface().text());
        print!("{}", view.grid_surface());

        let legend = lib::agenda::Category::ALL
            .iter()
            .map(|category| format!("{} {}", marker(Some(CellTag::Event(*category))), category))
            .chain(std::iter::once(format!(
                "{} {}",
                marker(Some(CellTag::Today)),
                view.locale().today_suffix()
            )))
            .collect::<Vec<_>>()
            .join("  ");
        println!("\n{}", legend);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let initial = args.month.unwrap_or(config.initial_month);
    let model = CalendarModel::new(initial, config.event_map(), Local::now().date_naive());

    if args.show {
        show(model, &config);
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("mcal ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let app = App::new(&config, model);
    let mut app = match app {
        Some(app) => app,
        None => {
            println!("Nothing to do.");
            return Ok(());
        }
    };

    let dispatcher = Dispatcher::from_config(&config);
    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    app.run(dispatcher, term)
}
