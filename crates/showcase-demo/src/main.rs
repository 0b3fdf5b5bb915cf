#![forbid(unsafe_code)]

//! Feature showcase binary entry point.

use std::io;
use std::time::{Duration, Instant};

use showcase_demo::app::App;
use showcase_demo::cli;
use showcase_demo::input::action_for_event;
use showcase_demo::terminal::{SessionOptions, TerminalSession};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = showcase_demo::logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    let catalog = match showcase_demo::load_catalog(opts.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to load catalog: {e}");
            std::process::exit(1);
        }
    };

    let session = match TerminalSession::new(SessionOptions {
        mouse_capture: opts.mouse,
    }) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to initialize terminal: {e}");
            std::process::exit(1);
        }
    };

    let result = session.size().and_then(|size| {
        let mut app = App::new(catalog, size, opts.section_screens, opts.scroll_step)
            .map_err(io::Error::other)?;
        let outcome = run(&session, &mut app, opts.exit_after_ms);
        app.shutdown();
        outcome
    });
    drop(session);

    if let Err(e) = result {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

fn run(session: &TerminalSession, app: &mut App, exit_after_ms: u64) -> io::Result<()> {
    let deadline = (exit_after_ms > 0).then(|| Instant::now() + Duration::from_millis(exit_after_ms));
    loop {
        if let Some(view) = app.render() {
            session.draw(view)?;
        }
        if app.should_quit() || deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(());
        }
        if session.poll_event(POLL_INTERVAL)? {
            let event = session.read_event()?;
            if let Some(action) = action_for_event(&event, app.scroll_step(), app.view()) {
                app.apply(action);
            }
        }
    }
}
