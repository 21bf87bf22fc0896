mod app;
mod goto;
mod help;
mod logging;
mod theme;
mod widget;
use crate::app::{App, AppSettings, LogHandler};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use weekgrid::{
    CalendarGridEngine, CalendarMode, CalendarOptions, Clock, EventSource, JsonFileSource,
    SystemClock,
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunArgs {
    options: CalendarOptions,
    settings: AppSettings,
    events: Option<PathBuf>,
    log: Option<PathBuf>,
    verbosity: u8,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunArgs),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = RunArgs::default();
        let mut year = None;
        let mut month = None;
        let mut week = None;
        let mut week_start = 0;
        let mut mode = CalendarMode::default();
        let mut locale = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('y') | Arg::Long("year") => year = Some(parser.value()?.parse()?),
                Arg::Short('m') | Arg::Long("month") => month = Some(parser.value()?.parse()?),
                Arg::Short('w') | Arg::Long("week") => week = Some(parser.value()?.parse()?),
                Arg::Short('s') | Arg::Long("week-start") => week_start = parser.value()?.parse()?,
                Arg::Long("mode") => mode = parser.value()?.parse()?,
                Arg::Long("locale") => locale = Some(parser.value()?.string()?),
                Arg::Short('e') | Arg::Long("events") => {
                    args.events = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("poll-millis") => {
                    args.settings.poll.interval_millis = Some(parser.value()?.parse()?);
                }
                Arg::Long("poll-action") => {
                    args.settings.poll.action = Some(parser.value()?.string()?);
                }
                Arg::Long("no-drag-and-drop") => args.settings.interactions.drag_and_drop = false,
                Arg::Long("no-day-click") => args.settings.interactions.day_click = false,
                Arg::Long("no-event-click") => args.settings.interactions.event_click = false,
                Arg::Long("log") => args.log = Some(PathBuf::from(parser.value()?)),
                Arg::Short('v') | Arg::Long("verbose") => {
                    args.verbosity = args.verbosity.saturating_add(1);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let mut options = CalendarOptions::new().week_starts_at(week_start).mode(mode);
        if let Some(year) = year {
            options = options.year(year);
        }
        if let Some(month) = month {
            options = options.month(month);
        }
        if let Some(week) = week {
            options = options.week(week);
        }
        if let Some(locale) = locale {
            options = options.locale(locale.as_str());
        }
        args.options = options;
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => {
                logging::init(args.log.as_deref(), args.verbosity)?;
                let engine = CalendarGridEngine::new(args.options, SystemClock)
                    .context("invalid calendar settings")?;
                let today = SystemClock
                    .today()
                    .context("failed to determine local date")?;
                match args.events {
                    Some(path) => {
                        let source = JsonFileSource::open(path)?;
                        run_app(App::new(engine, source, LogHandler, args.settings, today))
                    }
                    None => run_app(App::new(
                        engine,
                        Vec::new(),
                        LogHandler,
                        args.settings,
                        today,
                    )),
                }
            }
            Command::Help => {
                println!("Usage: weekgrid [<options>]");
                println!();
                println!("Month and week calendar grids in the terminal");
                println!();
                println!("Options:");
                println!("  -y, --year <YEAR>         Year to show [default: this year]");
                println!("  -m, --month <1-12>        Month to show in month mode [default: this month]");
                println!("  -w, --week <WEEK>         Week number to show in week mode, per the locale's");
                println!("                            numbering [default: this week]");
                println!("  -s, --week-start <0-6>    First day of the week, 0 being Sunday [default: 0]");
                println!("      --mode <month|week>   Show a whole month or a single week [default: month]");
                println!("      --locale <TAG>        Locale used for week numbers [default: en]");
                println!("  -e, --events <FILE>       Read events from a JSON array in FILE");
                println!("      --poll-millis <MS>    Reload events this often");
                println!("      --poll-action <NAME>  Identifier passed along with each reload");
                println!("      --no-drag-and-drop    Do not allow moving events between days");
                println!("      --no-day-click        Do not report selected days");
                println!("      --no-event-click      Do not report opened events");
                println!("      --log <FILE>          Write log messages to FILE");
                println!("  -v, --verbose             Log more details; can be given twice");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn run_app<C: Clock, S: EventSource>(app: App<C, S, LogHandler>) -> anyhow::Result<()> {
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        app.run(terminal).context("failed to run calendar")
    })
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
