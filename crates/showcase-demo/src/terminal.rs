#![forbid(unsafe_code)]

//! Terminal session guard and frame drawing.
//!
//! [`TerminalSession`] enters raw mode and the alternate screen and restores
//! both on drop, on panic, and on SIGINT/SIGTERM. Cleanup runs in reverse
//! order of enabling:
//!
//! 1. Disable mouse capture (if enabled)
//! 2. Show cursor
//! 3. Leave alternate screen
//! 4. Exit raw mode
//! 5. Flush stdout

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, event, queue, terminal};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::view::{Emphasis, View};

/// Which optional modes to enable.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Report wheel and click events.
    pub mouse_capture: bool,
}

/// Owns the terminal for the lifetime of the showcase.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode, switch to the alternate screen, and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the setup sequences
    /// cannot be written.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
            #[cfg(unix)]
            signal_guard: Some(SignalGuard::new()?),
        };

        let mut stdout = io::stdout();
        crossterm::execute!(stdout, terminal::EnterAlternateScreen)?;
        session.alternate_screen_enabled = true;

        if options.mouse_capture {
            crossterm::execute!(stdout, event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            tracing::info!("mouse capture enabled");
        }

        crossterm::execute!(stdout, cursor::Hide)?;
        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for an event.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read the next event, blocking until one is available.
    pub fn read_event(&self) -> io::Result<event::Event> {
        event::read()
    }

    /// Draw a frame to stdout.
    pub fn draw(&self, view: &View) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        draw(&mut stdout, view)
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();

        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, event::DisableMouseCapture);
            self.mouse_enabled = false;
            tracing::info!("mouse capture disabled");
        }

        let _ = crossterm::execute!(stdout, SetAttribute(Attribute::Reset), cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }

        let _ = terminal::disable_raw_mode();
        tracing::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Queue a full frame onto `out` and flush it.
///
/// Every row is cleared before it is written, so a shorter frame never
/// leaves stale text behind.
pub fn draw(out: &mut impl Write, view: &View) -> io::Result<()> {
    for (row, line) in view.lines.iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(
            out,
            cursor::MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Reset)
        )?;
        match line.emphasis {
            Emphasis::Normal => {}
            Emphasis::Title => queue!(out, SetAttribute(Attribute::Bold))?,
            Emphasis::Selected => queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(Color::Cyan)
            )?,
            Emphasis::Dim => queue!(out, SetAttribute(Attribute::Dim))?,
        }
        out.write_all(line.text.as_bytes())?;
    }
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        Clear(ClearType::FromCursorDown)
    )?;
    out.flush()
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, event::DisableMouseCapture);
    let _ = crossterm::execute!(stdout, SetAttribute(Attribute::Reset), cursor::Show);
    let _ = crossterm::execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::warn!(signal, "termination signal received, restoring terminal");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
