use chrono::NaiveDateTime;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tzdash::{
    Clock, Command, Dashboard, Error, FixedClock, HELP, Options, Palette, Reply, SystemClock, render_dashboard,
    render_selector,
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
// DECSC / DECRC: save and restore the cursor around an in-place repaint.
const SAVE_CURSOR: &str = "\x1b7";
const RESTORE_CURSOR: &str = "\x1b8";
const CURSOR_HOME: &str = "\x1b[H";

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}\n\n{}", help_text());
            std::process::exit(2);
        }
    };

    let options = Options { columns: config.columns, ..Options::default() };
    match config.at {
        Some(utc) => run(Dashboard::new(FixedClock::at_utc(utc), options), &config),
        None => run(Dashboard::new(SystemClock, options), &config),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tzdash=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

struct CliConfig {
    once: bool,
    at: Option<NaiveDateTime>,
    columns: usize,
    color: bool,
    interactive: bool,
}

fn parse_args() -> Result<CliConfig, Error> {
    parse_args_from(std::env::args().skip(1), io::stdout().is_terminal(), std::env::var_os("NO_COLOR").is_some())
}

fn parse_args_from(
    args: impl IntoIterator<Item = String>,
    stdout_is_tty: bool,
    no_color: bool,
) -> Result<CliConfig, Error> {
    let mut once = false;
    let mut at = None;
    let mut columns = Options::default().columns;
    let mut color = stdout_is_tty && !no_color;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("tzdash {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--once" => once = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--at" => {
                let value = args.next().ok_or(Error::MissingArgument { command: "--at", expected: "a timestamp" })?;
                at = Some(parse_timestamp(&value)?);
            }
            "--columns" => {
                let value = args.next().ok_or(Error::MissingArgument { command: "--columns", expected: "a number" })?;
                columns = parse_columns(&value)?;
            }
            _ if arg.starts_with("--at=") => at = Some(parse_timestamp(arg.trim_start_matches("--at="))?),
            _ if arg.starts_with("--columns=") => columns = parse_columns(arg.trim_start_matches("--columns="))?,
            _ if arg.starts_with('-') => return Err(Error::UnknownOption(arg)),
            _ => return Err(Error::UnexpectedArgument(arg)),
        }
    }

    Ok(CliConfig { once, at, columns, color, interactive: stdout_is_tty })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map_err(|_| Error::InvalidTimestamp(value.to_string()))
}

fn parse_columns(value: &str) -> Result<usize, Error> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidColumns(value.to_string())),
    }
}

fn run<C: Clock>(mut dash: Dashboard<C>, config: &CliConfig) {
    let palette = Palette::new(config.color);
    dash.mount(Instant::now());

    if config.once {
        print!("{}", render_dashboard(&dash, palette));
        return;
    }

    let input = spawn_stdin_reader();
    let mut notice: Option<String> = None;
    emit(&full_frame(&dash, palette, notice.as_deref(), config.interactive));

    loop {
        let wait = match dash.next_due() {
            Some(due) => due.saturating_duration_since(Instant::now()),
            None => dash.options().refresh_interval,
        };

        let typed = match input.recv_timeout(wait) {
            Ok(line) => {
                let reply = Command::parse(&line)
                    .and_then(|cmd| cmd.map(|cmd| cmd.apply(&mut dash, Instant::now())).transpose());
                match reply {
                    Ok(Some(Reply::Quit)) => break,
                    Ok(Some(Reply::Redraw)) => notice = None,
                    Ok(Some(Reply::ShowSelector)) => notice = Some(render_selector(&dash, palette)),
                    Ok(Some(Reply::ShowHelp)) => notice = Some(HELP.to_string()),
                    Ok(None) => {}
                    Err(err) => notice = Some(format!("error: {err}")),
                }
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let ticked = dash.poll(Instant::now());
        if typed || !config.interactive {
            emit(&full_frame(&dash, palette, notice.as_deref(), config.interactive));
        } else if ticked {
            // Leave the prompt line alone so a half-typed command stays visible.
            emit(&tick_frame(&dash, palette));
        }
    }

    dash.unmount();
}

/// Forward stdin lines to the main loop. The thread never touches dashboard state.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Whole screen: dashboard, optional notice, prompt.
fn full_frame<C: Clock>(dash: &Dashboard<C>, palette: Palette, notice: Option<&str>, interactive: bool) -> String {
    let mut frame = String::new();
    if interactive {
        frame.push_str(CLEAR_SCREEN);
    }
    frame.push_str(&render_dashboard(dash, palette));
    if let Some(notice) = notice {
        frame.push('\n');
        frame.push_str(notice.trim_end());
        frame.push('\n');
    }
    frame.push_str("\n> ");
    frame
}

/// Repaint only the dashboard in place. Times are fixed width, so the layout
/// of a tick frame matches the full frame drawn before it.
fn tick_frame<C: Clock>(dash: &Dashboard<C>, palette: Palette) -> String {
    format!("{SAVE_CURSOR}{CURSOR_HOME}{}{RESTORE_CURSOR}", render_dashboard(dash, palette))
}

fn emit(frame: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(frame.as_bytes());
    let _ = stdout.flush();
}

fn help_text() -> String {
    format!(
        "tzdash {version}

Live clocks for a set of fixed-offset time zones.

Usage:
  tzdash [OPTIONS]

Options:
  --once                 Render a single frame and exit.
  --at <timestamp>       Pin the clock to a UTC instant (YYYY-MM-DDTHH:MM:SS).
  --columns <n>          Cards per row. Default: {columns}
  --color                Force ANSI color output.
  --no-color             Disable ANSI color output.
  -h, --help             Show this help message.
  -V, --version          Print version information.

{commands}

Environment:
  RUST_LOG               Log filter (logs go to stderr). Default: tzdash=warn
  NO_COLOR               Disable color unless --color is given.

Exit codes:
  0  Success.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        columns = Options::default().columns,
        commands = HELP,
    )
}
