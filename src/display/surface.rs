//! Terminal surface abstraction and the crossterm-backed implementation.

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while raw mode and the alternate screen are active
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Drawing primitives the bar renderer needs
pub trait TerminalSurface {
    /// Current size as (columns, rows)
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Move the write cursor to a cell
    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()>;

    /// Toggle the highlighted (reverse video) attribute
    fn set_highlight(&mut self, on: bool) -> io::Result<()>;

    /// Write one blank cell at the cursor
    fn put_blank(&mut self) -> io::Result<()>;

    /// Push the queued frame to the screen
    fn present(&mut self) -> io::Result<()>;
}

/// Surface that queues crossterm commands on a writer
pub struct CrosstermSurface<W: Write> {
    out: W,
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TerminalSurface for CrosstermSurface<W> {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(column, row))
    }

    fn set_highlight(&mut self, on: bool) -> io::Result<()> {
        let attribute = if on {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        };
        queue!(self.out, SetAttribute(attribute))
    }

    fn put_blank(&mut self) -> io::Result<()> {
        queue!(self.out, Print(' '))
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Full-screen raw mode held for the lifetime of the guard
///
/// Dropping the guard leaves the alternate screen, shows the cursor and
/// disables raw mode, including on early return and panic unwind.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode (no echo), the alternate screen, and hide the cursor
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
        let guard = Self { _private: () };
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        debug!("Terminal: raw mode on");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave the alternate screen, show the cursor and disable raw mode
///
/// Only acts while a `TerminalGuard` holds the terminal, so repeated calls
/// are harmless. Returns whether anything was restored.
pub fn restore_terminal() -> bool {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return false;
    }

    if let Err(e) = execute!(
        io::stdout(),
        SetAttribute(Attribute::Reset),
        cursor::Show,
        LeaveAlternateScreen
    ) {
        warn!("Failed to leave alternate screen: {}", e);
    }
    match terminal::disable_raw_mode() {
        Ok(()) => debug!("Terminal: restored"),
        Err(e) => warn!("Failed to disable raw mode: {}", e),
    }
    true
}

/// Restore the terminal before the panic message is printed
///
/// Otherwise the message lands on the alternate screen and disappears with it.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory surface recording the highlight state of every drawn cell
    pub(crate) struct RecordingSurface {
        pub columns: u16,
        pub rows: u16,
        /// `cells[row][column]`: None = never drawn, Some(highlighted)
        pub cells: Vec<Vec<Option<bool>>>,
        pub presents: usize,
        cursor: (u16, u16),
        highlight: bool,
    }

    impl RecordingSurface {
        pub(crate) fn new(columns: u16, rows: u16) -> Self {
            Self {
                columns,
                rows,
                cells: vec![vec![None; columns as usize]; rows as usize],
                presents: 0,
                cursor: (0, 0),
                highlight: false,
            }
        }

        /// Number of highlighted cells in a column
        pub(crate) fn lit_height(&self, column: usize) -> usize {
            self.cells
                .iter()
                .filter(|row| row[column] == Some(true))
                .count()
        }
    }

    impl TerminalSurface for RecordingSurface {
        fn size(&self) -> io::Result<(u16, u16)> {
            Ok((self.columns, self.rows))
        }

        fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
            self.cursor = (column, row);
            Ok(())
        }

        fn set_highlight(&mut self, on: bool) -> io::Result<()> {
            self.highlight = on;
            Ok(())
        }

        fn put_blank(&mut self) -> io::Result<()> {
            let (column, row) = self.cursor;
            let cell = self
                .cells
                .get_mut(row as usize)
                .and_then(|r| r.get_mut(column as usize))
                .ok_or_else(|| io::Error::other("write outside the screen"))?;
            *cell = Some(self.highlight);
            self.cursor.0 += 1;
            Ok(())
        }

        fn present(&mut self) -> io::Result<()> {
            self.presents += 1;
            Ok(())
        }
    }

    #[test]
    fn test_restore_without_guard_is_noop() {
        assert!(!restore_terminal());
        assert!(!restore_terminal());
    }

    #[test]
    fn test_panic_hook_chains_without_guard() {
        install_panic_hook();
        let result = panic::catch_unwind(|| panic!("frame loop failure"));
        assert!(result.is_err());
        assert!(!restore_terminal());
    }

    #[test]
    fn test_crossterm_surface_emits_sequences() {
        let mut surface = CrosstermSurface::new(Vec::new());
        surface.move_to(3, 1).unwrap();
        surface.set_highlight(true).unwrap();
        surface.put_blank().unwrap();
        surface.set_highlight(false).unwrap();
        surface.present().unwrap();

        let out = String::from_utf8(surface.out).unwrap();
        // CSI row;col H is 1-based
        assert!(out.contains("\x1b[2;4H"));
        assert!(out.contains("\x1b[7m"));
        assert!(out.contains("\x1b[27m"));
        assert!(out.contains(' '));
    }
}
