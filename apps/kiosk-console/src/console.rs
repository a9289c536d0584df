//! # Console
//!
//! The operator line protocol: print a prompt, read one full line, normalize
//! it.
//!
//! Generic over `BufRead` / `Write` so the same flows run against the real
//! terminal and against in-memory buffers in tests.
//!
//! ## Prompt Loop
//! ```text
//!   prompt_until("Enter price for Lower: ", validate)
//!        │
//!        ▼
//!   ┌──► print prompt ──► read line ──► format_input ──► validate ──┐
//!   │                        │               │              │       │
//!   │                        │ EOF           │ Err          │ Err   │ Ok
//!   │                        ▼               │              │       ▼
//!   │                  InputClosed           │              │    value
//!   └────────────────────────────────────────┴──────────────┘
//! ```

use std::io::{BufRead, Write};

use kiosk_core::validation::{format_input, select_from_set, ValidationResult};
use kiosk_core::ValidationError;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// The two answers accepted by [`Console::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmKeys {
    pub yes: char,
    pub no: char,
}

impl Default for ConfirmKeys {
    fn default() -> Self {
        ConfirmKeys { yes: 'Y', no: 'N' }
    }
}

/// Line-oriented operator console.
pub struct Console<R, W> {
    input: R,
    output: W,
    max_len: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console that rejects lines longer than `max_len` characters.
    pub fn new(input: R, output: W, max_len: usize) -> Self {
        Console {
            input,
            output,
            max_len,
        }
    }

    /// Writes text as-is and flushes, so prompts without a newline show up.
    pub fn say(&mut self, text: &str) -> AppResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Writes one line.
    pub fn say_line(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one raw line, newline included.
    ///
    /// ## Errors
    /// `InputClosed` at end of input.
    pub fn read_raw(&mut self) -> AppResult<String> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line)
    }

    /// Reads and normalizes one line.
    ///
    /// The outer `Result` is a console failure, the inner one is a line the
    /// caller should re-prompt for.
    pub fn read_input(&mut self) -> AppResult<ValidationResult<String>> {
        let raw = self.read_raw()?;
        let formatted = format_input(&raw, self.max_len);
        if let Err(ref reason) = formatted {
            debug!(kind = rejection_kind(reason), %reason, "Rejected input line");
        }
        Ok(formatted)
    }

    /// Shows `prompt` and reads one normalized line.
    pub fn prompt(&mut self, prompt: &str) -> AppResult<ValidationResult<String>> {
        self.say(prompt)?;
        self.read_input()
    }

    /// Shows `prompt` until `validate` accepts a normalized line.
    pub fn prompt_until<T, F>(&mut self, prompt: &str, mut validate: F) -> AppResult<T>
    where
        F: FnMut(&str) -> ValidationResult<T>,
    {
        loop {
            let checked = self
                .prompt(prompt)?
                .and_then(|line| validate(&line));

            match checked {
                Ok(value) => return Ok(value),
                Err(reason) => debug!(%reason, "Re-prompting"),
            }
        }
    }

    /// Asks `(y)es or (n)o?` until one of the two keys is typed.
    ///
    /// Never gives up; only a closed input ends the loop.
    pub fn confirm(&mut self, keys: ConfirmKeys) -> AppResult<bool> {
        let prompt = format!(
            "({})es or ({})o?\n",
            keys.yes.to_ascii_lowercase(),
            keys.no.to_ascii_lowercase()
        );
        let answer = self.prompt_until(&prompt, |line| select_from_set(line, &[keys.yes, keys.no]))?;
        Ok(answer == keys.yes)
    }

    /// Hands back the output sink (used by tests to inspect the transcript).
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Describes why a line was turned away, for log fields.
pub fn rejection_kind(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::Required { .. } => "blank",
        ValidationError::TooLong { .. } => "too_long",
        ValidationError::NotANumber { .. } => "not_a_number",
        ValidationError::OutOfRange { .. } => "out_of_range",
        ValidationError::InvalidFormat { .. } => "invalid_format",
        ValidationError::NotAllowed { .. } => "not_allowed",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::validation::validate_zip_code;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), 10)
    }

    fn transcript(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_read_input_normalizes() {
        let mut c = console("lOWER\n");
        assert_eq!(c.read_input().unwrap().unwrap(), "Lower");
    }

    #[test]
    fn test_read_input_rejects_overlong_instead_of_truncating() {
        let mut c = console("abcdefghijklmnop\nok\n");
        assert!(matches!(
            c.read_input().unwrap(),
            Err(ValidationError::TooLong { .. })
        ));
        // the whole line was consumed, nothing left over for the next read
        assert_eq!(c.read_input().unwrap().unwrap(), "Ok");
    }

    #[test]
    fn test_end_of_input_is_reported() {
        let mut c = console("");
        assert!(matches!(c.read_raw(), Err(AppError::InputClosed)));
    }

    #[test]
    fn test_prompt_until_reprompts() {
        let mut c = console("8020\n8A202\n\n80202\n");
        c.prompt_until("zip? ", validate_zip_code).unwrap();
        assert_eq!(transcript(c).matches("zip? ").count(), 4);
    }

    #[test]
    fn test_confirm_retries_until_valid() {
        let mut c = console("maybe\nx\n\ny\n");
        assert!(c.confirm(ConfirmKeys::default()).unwrap());
        assert_eq!(transcript(c).matches("(y)es or (n)o?").count(), 4);

        let mut c = console("N\n");
        assert!(!c.confirm(ConfirmKeys::default()).unwrap());
    }

    #[test]
    fn test_confirm_with_custom_keys() {
        let keys = ConfirmKeys { yes: 'J', no: 'N' };
        let mut c = console("y\nj\n");
        assert!(c.confirm(keys).unwrap());
        assert!(transcript(c).contains("(j)es or (n)o?"));
    }

    #[test]
    fn test_confirm_fails_on_closed_input() {
        let mut c = console("what\n");
        assert!(matches!(
            c.confirm(ConfirmKeys::default()),
            Err(AppError::InputClosed)
        ));
    }

    #[test]
    fn test_rejection_kind() {
        let err = ValidationError::TooLong {
            field: "input".to_string(),
            max: 10,
        };
        assert_eq!(rejection_kind(&err), "too_long");
    }
}
