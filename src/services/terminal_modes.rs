//! Terminal setup and teardown
//!
//! The browser wants raw mode, the alternate screen, and mouse capture.
//! `TerminalModes` records how far setup got, so teardown only touches
//! what was actually switched on.

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use std::io::{stdout, Write};

#[derive(Debug, Default)]
pub struct TerminalModes {
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
}

impl TerminalModes {
    /// Switch the terminal into browser mode.
    ///
    /// Raw mode and the alternate screen are required; failing either
    /// rolls back whatever was already switched on. Mouse capture is
    /// best-effort, the browser stays usable from the keyboard without
    /// it.
    pub fn enable() -> Result<Self> {
        let mut modes = Self::default();
        if let Err(e) = modes.switch_on() {
            modes.undo();
            return Err(e);
        }
        Ok(modes)
    }

    fn switch_on(&mut self) -> Result<()> {
        enable_raw_mode().context("enabling raw mode")?;
        self.raw_mode = true;

        stdout()
            .execute(EnterAlternateScreen)
            .context("entering the alternate screen")?;
        self.alternate_screen = true;

        match stdout().execute(EnableMouseCapture) {
            Ok(_) => self.mouse_capture = true,
            Err(e) => tracing::warn!("Mouse capture unavailable: {}", e),
        }

        tracing::debug!(
            "Terminal ready: raw mode, alternate screen, mouse capture={}",
            self.mouse_capture
        );
        Ok(())
    }

    /// Switch the enabled modes back off.
    ///
    /// Idempotent; each mode is cleared as it is disabled. Raw mode goes
    /// before leaving the alternate screen so the shell prompt comes
    /// back clean.
    pub fn undo(&mut self) {
        if self.mouse_capture {
            self.mouse_capture = false;
            let _ = stdout().execute(DisableMouseCapture);
        }
        if self.raw_mode {
            self.raw_mode = false;
            let _ = disable_raw_mode();
        }
        if self.alternate_screen {
            self.alternate_screen = false;
            let _ = stdout().execute(LeaveAlternateScreen);
        }
        let _ = stdout().flush();
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        self.undo();
    }
}

/// Restore the terminal without knowing which modes are on.
///
/// For panic hooks, where no `TerminalModes` value is reachable. Every
/// mode is switched off unconditionally; failures are ignored.
pub fn emergency_cleanup() {
    let _ = stdout().execute(DisableMouseCapture);
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = stdout().flush();
}
