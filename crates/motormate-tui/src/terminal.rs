//! Terminal setup and teardown

use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, Write};

/// Owns the terminal while the UI runs and restores it on drop.
///
/// Keyboard enhancement is requested where supported so that Shift+Enter
/// arrives as a distinct key instead of a bare Enter.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    /// Switch to raw mode and the alternate screen.
    ///
    /// If any step fails the terminal is put back before the error is returned.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut keyboard_enhanced = false;

        match Self::setup(&mut keyboard_enhanced) {
            Ok(terminal) => Ok(Self {
                terminal,
                keyboard_enhanced,
            }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = restore_screen(&mut io::stdout(), keyboard_enhanced);
                Err(e)
            }
        }
    }

    fn setup(keyboard_enhanced: &mut bool) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            *keyboard_enhanced = true;
        }

        Terminal::new(CrosstermBackend::new(stdout))
    }

    /// Whether Shift+Enter can be told apart from Enter
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Draw one frame
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Current terminal width in columns
    pub fn width(&self) -> io::Result<u16> {
        Ok(self.terminal.size()?.width)
    }
}

/// Undo everything `enter` writes to the terminal, raw mode aside
fn restore_screen<W: Write>(out: &mut W, keyboard_enhanced: bool) -> io::Result<()> {
    if keyboard_enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        out,
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = restore_screen(self.terminal.backend_mut(), self.keyboard_enhanced);
        let _ = self.terminal.show_cursor();
    }
}
