//! The participant's side of the session: prompts and blocking responses.

use crate::error::ExperimentError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::Deserialize;
use std::io::{self, BufRead, Write};

/// How the console waits for the participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Read a full line from standard input
    #[default]
    Line,
    /// Return on the Enter key press, read in raw terminal mode
    Key,
}

/// Messages to and responses from the participant.
pub trait Participant {
    /// Displays an informational message.
    fn show(&mut self, message: &str) -> Result<(), ExperimentError>;

    /// Displays `prompt` and blocks until the participant acknowledges it.
    fn acknowledge(&mut self, prompt: &str) -> Result<(), ExperimentError>;

    /// Displays `prompt` and blocks until the participant gives the timed signal.
    ///
    /// Only the moment this returns is meaningful.
    fn confirm(&mut self, prompt: &str) -> Result<(), ExperimentError> {
        self.acknowledge(prompt)
    }
}

/// A participant sitting at the terminal.
pub struct ConsoleParticipant<R, W> {
    input: R,
    output: W,
    mode: InputMode,
}

impl ConsoleParticipant<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's standard input and output.
    pub fn stdio(mode: InputMode) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), mode)
    }
}

impl<R: BufRead, W: Write> ConsoleParticipant<R, W> {
    pub fn new(input: R, output: W, mode: InputMode) -> Self {
        Self {
            input,
            output,
            mode,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn wait_for_enter(&mut self) -> Result<(), ExperimentError> {
        match self.mode {
            InputMode::Line => {
                let mut line = String::new();
                let read = self
                    .input
                    .read_line(&mut line)
                    .map_err(|e| ExperimentError::Input(e.to_string()))?;
                if read == 0 {
                    return Err(ExperimentError::Input("standard input closed".to_string()));
                }
                Ok(())
            }
            InputMode::Key => {
                wait_for_enter_key()?;
                writeln!(self.output)?;
                self.output.flush()?;
                Ok(())
            }
        }
    }
}

impl<R: BufRead, W: Write> Participant for ConsoleParticipant<R, W> {
    fn show(&mut self, message: &str) -> Result<(), ExperimentError> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    fn acknowledge(&mut self, prompt: &str) -> Result<(), ExperimentError> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.wait_for_enter()
    }
}

/// Disables raw mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// What a terminal event means while waiting for Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyDecision {
    Accept,
    Interrupt,
    Ignore,
}

fn decide(event: &Event) -> KeyDecision {
    match event {
        Event::Key(key) if is_interrupt(key) => KeyDecision::Interrupt,
        Event::Key(key) if key.kind == KeyEventKind::Press && key.code == KeyCode::Enter => {
            KeyDecision::Accept
        }
        _ => KeyDecision::Ignore,
    }
}

fn wait_for_enter_key() -> Result<(), ExperimentError> {
    let input_error = |e: io::Error| ExperimentError::Input(e.to_string());
    let _raw = RawModeGuard::enable().map_err(input_error)?;
    loop {
        match decide(&event::read().map_err(input_error)?) {
            KeyDecision::Accept => return Ok(()),
            KeyDecision::Interrupt => return Err(ExperimentError::Interrupted),
            KeyDecision::Ignore => {}
        }
    }
}

/// Raw mode swallows SIGINT, so Ctrl-C has to be recognised by hand.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_mode_prints_prompts_and_consumes_lines() {
        let input = Cursor::new("\n\n");
        let mut console = ConsoleParticipant::new(input, Vec::new(), InputMode::Line);

        console.show("Welcome").unwrap();
        console.acknowledge("Press Enter to start.").unwrap();
        console.confirm("Press Enter now.").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Welcome\nPress Enter to start.\nPress Enter now.\n");
    }

    #[test]
    fn test_line_mode_ignores_typed_text() {
        let input = Cursor::new("anything at all\n");
        let mut console = ConsoleParticipant::new(input, Vec::new(), InputMode::Line);
        assert!(console.confirm("go").is_ok());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut console = ConsoleParticipant::new(Cursor::new(""), Vec::new(), InputMode::Line);
        assert!(matches!(
            console.acknowledge("Press Enter"),
            Err(ExperimentError::Input(_))
        ));
    }

    /// Fails every read, like a terminal that has gone away.
    struct BrokenInput;

    impl io::Read for BrokenInput {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }
    }

    impl BufRead for BrokenInput {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }

        fn consume(&mut self, _: usize) {}
    }

    #[test]
    fn test_read_failure_is_input_error() {
        let mut console = ConsoleParticipant::new(BrokenInput, Vec::new(), InputMode::Line);
        assert!(matches!(
            console.confirm("Press Enter"),
            Err(ExperimentError::Input(_))
        ));
    }

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, modifiers, kind))
    }

    #[test]
    fn test_enter_press_accepts() {
        let enter = key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(decide(&enter), KeyDecision::Accept);
    }

    #[test]
    fn test_releases_and_other_keys_are_ignored() {
        let ignored = [
            key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release),
            key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Repeat),
            key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Press),
            key(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press),
            key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press),
            Event::FocusGained,
            Event::Resize(80, 24),
        ];
        for event in ignored {
            assert_eq!(decide(&event), KeyDecision::Ignore, "{event:?}");
        }
    }

    #[test]
    fn test_ctrl_c_press_interrupts() {
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        let ctrl_c_release = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Release);
        assert_eq!(decide(&ctrl_c), KeyDecision::Interrupt);
        assert_eq!(decide(&ctrl_c_release), KeyDecision::Ignore);
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&plain_c));
    }

    #[test]
    fn test_input_mode_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: InputMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"key\"").unwrap();
        assert_eq!(parsed.mode, InputMode::Key);
    }
}
