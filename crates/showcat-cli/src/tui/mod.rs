//! TUI module for interactive terminal interfaces.
//!
//! Uses `ratatui` + `crossterm` for rendering.

/// Catalog browser TUI.
pub mod browser;

use std::sync::atomic::{AtomicBool, Ordering};

pub use browser::run_browser;

/// Set while a TUI owns the terminal.
static TERMINAL_OWNED: AtomicBool = AtomicBool::new(false);

/// Returns `false` while a TUI owns the terminal.
///
/// The console log writer checks this so log lines do not land on top of
/// the alternate screen.
#[must_use]
pub fn console_available() -> bool {
    !TERMINAL_OWNED.load(Ordering::Relaxed)
}

/// Marks the terminal as owned by a TUI until dropped.
#[derive(Debug)]
pub struct TerminalGuard(());

impl TerminalGuard {
    /// Takes ownership of the terminal for logging purposes.
    #[must_use]
    pub fn acquire() -> Self {
        TERMINAL_OWNED.store(true, Ordering::Relaxed);
        Self(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        TERMINAL_OWNED.store(false, Ordering::Relaxed);
    }
}
