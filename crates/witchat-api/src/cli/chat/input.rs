//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! handling of EOF (Ctrl+D) and interrupt (Ctrl+C).

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted a line.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

impl InputEvent {
    /// A submitted line, kept exactly as typed like web and REST input.
    fn from_line(line: String) -> Self {
        InputEvent::Message(line)
    }

    /// Whether this is a submitted line with nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, InputEvent::Message(text) if text.trim().is_empty())
    }
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new input handler with the given prompt.
    ///
    /// Also returns a `SharedWriter` for printing without clobbering the prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Read a line of input. Read errors end the loop like Ctrl+D.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::from_line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!("readline error: {e}");
                InputEvent::Eof
            }
        }
    }

    /// Restore the terminal before exit.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kept_as_typed() {
        assert_eq!(
            InputEvent::from_line("  hola  ".to_string()),
            InputEvent::Message("  hola  ".to_string())
        );
    }

    #[test]
    fn test_blank_lines() {
        assert!(InputEvent::from_line(String::new()).is_blank());
        assert!(InputEvent::from_line(" \t ".to_string()).is_blank());
        assert!(!InputEvent::from_line(" hola".to_string()).is_blank());
        assert!(!InputEvent::Eof.is_blank());
    }
}
