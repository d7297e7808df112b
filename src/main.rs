//! spellpal main entry point
//!
//! The main loop watches two sources:
//! 1. stdin (the learner's keys) - pressed buttons and typed answers
//! 2. the clock - deferred speech and recognizer results, checked every tick
//!
//! SIGWINCH only sets a flag; the next tick redraws at the new size.

use anyhow::{bail, Context};
use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use spellpal::config::Config;
use spellpal::input::{create_default_keymap, HandlerAction, InputHandler};
use spellpal::listen::{CommandRecognizer, Recognizer, SpeechInput};
use spellpal::platform::is_wsl;
use spellpal::session::{Phrases, PracticeSession};
use spellpal::speech::{create_synth, SpeechOutput, SpeechSettings};
use spellpal::terminal::{frame, get_terminal_size, is_tty, TermiosGuard};
use spellpal::words::WordList;
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

/// Longest the loop sleeps before checking recognizer results and resizes
const TICK: Duration = Duration::from_millis(100);

/// Global flag set by SIGWINCH handler
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// SIGWINCH handler - sets flag when terminal is resized
extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

/// Command line options
struct Args {
    debug: bool,
    words: Option<PathBuf>,
}

fn usage() -> String {
    format!(
        "Usage: {} [--debug] [--words <file.json>]\n\n\
         Keys: type the word and press Enter to check it\n  \
         alt+s  hear the word     alt+h  show a hint\n  \
         alt+n  next word         alt+m  say the word into the microphone\n  \
         alt+q  quit",
        spellpal::APP_NAME
    )
}

fn parse_args() -> Args {
    let mut args = Args {
        debug: false,
        words: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" | "-d" => args.debug = true,
            "--words" | "-w" => match iter.next() {
                Some(path) => args.words = Some(PathBuf::from(path)),
                None => {
                    eprintln!("Error: --words needs a file\n\n{}", usage());
                    process::exit(2);
                }
            },
            "--help" | "-h" => {
                println!("{}", usage());
                process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", spellpal::APP_NAME, spellpal::VERSION);
                process::exit(0);
            }
            other => {
                eprintln!("Error: unknown argument {:?}\n\n{}", other, usage());
                process::exit(2);
            }
        }
    }

    args
}

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to spellpal.log, the terminal belongs to the UI
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("spellpal.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open spellpal.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "spellpal version {} starting (debug mode, logging to spellpal.log)",
            spellpal::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }
}

fn main() {
    let args = parse_args();
    init_logging(args.debug);

    if let Err(e) = run(args) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn load_words(args: &Args, config: &Config) -> anyhow::Result<WordList> {
    match args.words.clone().or_else(|| config.words_file()) {
        Some(path) => WordList::load(&path)
            .with_context(|| format!("loading word list {}", path.display())),
        None => {
            info!("Using built-in word list");
            Ok(WordList::builtin())
        }
    }
}

fn build_session(args: &Args) -> anyhow::Result<PracticeSession> {
    let config = Config::load().context("loading configuration")?;
    info!("Configuration loaded from {:?}", config.path());

    let words = load_words(args, &config)?;

    let speech = SpeechOutput::new(create_synth(), SpeechSettings::from_config(&config));

    let recognizer = config.listen_command().map(|command| {
        info!("Speech input via: {}", command);
        Box::new(CommandRecognizer::new(&command, &config.lang())) as Box<dyn Recognizer>
    });
    if recognizer.is_none() {
        info!("No capture command configured, microphone disabled");
    }

    Ok(PracticeSession::new(
        words,
        speech,
        SpeechInput::new(recognizer),
        Phrases::new(&config.learner_name()),
    )
    .with_next_delay(config.next_delay()))
}

fn run(args: Args) -> anyhow::Result<()> {
    debug!("Initializing spellpal");

    let stdin_fd = io::stdin().as_raw_fd();
    if !is_tty(stdin_fd) {
        bail!("spellpal needs an interactive terminal (stdin is not a TTY)");
    }

    let mut session = build_session(&args)?;
    let mut handler = InputHandler::new(create_default_keymap());

    let _guard = TermiosGuard::raw(stdin_fd)?;
    let (mut cols, rows) = get_terminal_size(stdin_fd)?;
    info!("Terminal size: {}x{}", cols, rows);

    unsafe {
        signal::signal(Signal::SIGWINCH, SigHandler::Handler(handle_sigwinch))
            .context("installing SIGWINCH handler")?;
    }

    // WSL doesn't support epoll on TTY file descriptors, so use select() instead
    let use_select = is_wsl();
    let mut mio_poll = if !use_select {
        debug!("Using mio::Poll for event loop");
        let poll = Poll::new()?;
        let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
        poll.registry()
            .register(&mut stdin_source, STDIN, Interest::READABLE)?;
        Some((poll, Events::with_capacity(16)))
    } else {
        debug!("Using select() for event loop (WSL mode)");
        None
    };

    info!("spellpal ready - entering event loop");
    draw(&session, cols)?;

    loop {
        let mut dirty = false;

        if RESIZE_PENDING.swap(false, Ordering::Relaxed) {
            cols = get_terminal_size(stdin_fd)?.0;
            info!("Terminal resized to {} columns", cols);
            dirty = true;
        }

        session.poll_voices();
        if session.poll_recognition() {
            dirty = true;
        }
        session.run_due(Instant::now());

        let timeout = session
            .time_until_next(Instant::now())
            .map_or(TICK, |d| d.min(TICK));

        let readable = if let Some((ref mut poll, ref mut events)) = mio_poll {
            match poll.poll(events, Some(timeout)) {
                Ok(()) => events.iter().any(|e| e.token() == STDIN),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => false,
                Err(e) => return Err(e.into()),
            }
        } else {
            wait_readable_select(stdin_fd, timeout)?
        };

        if readable {
            match handle_stdin(&mut handler, &mut session)? {
                HandlerAction::Quit => {
                    info!("Quit requested");
                    break;
                }
                HandlerAction::Handled => dirty = true,
                HandlerAction::Ignored => {}
            }
        }

        if dirty {
            draw(&session, cols)?;
        }
    }

    session.shutdown();
    Ok(())
}

/// Wait for stdin with select(), for terminals where epoll is unavailable
fn wait_readable_select(fd: RawFd, timeout: Duration) -> anyhow::Result<bool> {
    use nix::sys::select::{select, FdSet};
    use nix::sys::time::{TimeVal, TimeValLike};
    use std::os::unix::io::BorrowedFd;

    let stdin_borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
    let mut read_fds = FdSet::new();
    read_fds.insert(stdin_borrowed);
    let mut timeout = TimeVal::milliseconds(timeout.as_millis() as i64);

    match select(None, Some(&mut read_fds), None, None, Some(&mut timeout)) {
        Ok(_) => Ok(read_fds.contains(stdin_borrowed)),
        Err(nix::errno::Errno::EINTR) => {
            debug!("select() interrupted by signal");
            Ok(false)
        }
        Err(e) => Err(anyhow::anyhow!("select() failed: {}", e)),
    }
}

/// Read the learner's keys and apply them to the session
fn handle_stdin(
    handler: &mut InputHandler,
    session: &mut PracticeSession,
) -> anyhow::Result<HandlerAction> {
    let mut buf = [0u8; 1024];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        // EOF on the terminal
        return Ok(HandlerAction::Quit);
    }

    Ok(handler.process(&buf[..n], session))
}

fn draw(session: &PracticeSession, cols: u16) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(frame(session, cols).as_bytes())?;
    stdout.flush()
}
