#![forbid(unsafe_code)]

//! Terminal session guard.
//!
//! Enters raw mode, the alternate screen, and mouse capture; restores all of
//! them on drop and from a panic hook, so every exit path leaves the
//! terminal usable.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};

#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    mouse: bool,
}

impl TerminalSession {
    /// Enter raw mode, switch to the alternate screen, capture the mouse.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        tracing::debug!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen: false,
            mouse: false,
        };
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        session.alternate_screen = true;
        execute!(stdout, EnableMouseCapture)?;
        session.mouse = true;
        Ok(session)
    }

    /// Terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for an event.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
            self.mouse = false;
        }
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::debug!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, DisableMouseCapture, cursor::Show, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            let _ = stdout.flush();
            previous(info);
        }));
    });
}
