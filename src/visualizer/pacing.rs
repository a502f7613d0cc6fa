//! Inter-frame pacing.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use signal_hook::consts::TERM_SIGNALS;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest single input poll, bounds how late a stop signal is noticed
const POLL_SLICE: Duration = Duration::from_millis(20);

/// Suspends the frame loop between frames
pub trait FramePacer {
    /// Wait out one refresh interval
    ///
    /// Returns `false` when playback should stop early.
    fn wait(&mut self, interval: Duration) -> io::Result<bool>;
}

/// Route termination signals into a flag instead of killing the process
///
/// Covers SIGTERM, SIGINT and SIGQUIT, plus SIGHUP on Unix. The frame loop
/// then ends normally and the terminal guard gets to run.
pub fn register_stop_signals() -> io::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    for &signal in TERM_SIGNALS {
        signal_hook::flag::register(signal, Arc::clone(&stop))?;
    }
    #[cfg(unix)]
    signal_hook::flag::register(signal_hook::consts::SIGHUP, Arc::clone(&stop))?;
    Ok(stop)
}

/// Sleeps by polling terminal input until the frame deadline
///
/// Raw mode turns Ctrl-C into a key press instead of SIGINT, so `q`, `Esc`
/// and Ctrl-C are watched for here, along with the stop-signal flag.
pub struct TerminalPacer {
    stop: Arc<AtomicBool>,
}

impl TerminalPacer {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

impl FramePacer for TerminalPacer {
    fn wait(&mut self, interval: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + interval;
        loop {
            if self.stop_requested() {
                info!("Stop signal received");
                return Ok(false);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(true);
            }
            if !event::poll(remaining.min(POLL_SLICE))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if is_quit_key(&key) {
                    return Ok(false);
                }
            }
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
