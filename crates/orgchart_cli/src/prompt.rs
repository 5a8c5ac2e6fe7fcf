//! Line-oriented prompts over any reader/writer pair.
//!
//! Every prompt returns `Ok(None)` once input is exhausted so callers can
//! unwind instead of spinning on EOF.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// One selectable entry in a numbered list.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

pub struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut O {
        &mut self.output
    }

    /// Asks for free text, repeating until a non-blank answer arrives.
    pub fn text(&mut self, message: &str) -> io::Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(Some(answer.to_string()));
            }
            writeln!(self.output, "  A value is required.")?;
        }
    }

    /// Asks until the answer parses as `T`, echoing the parse error on failure.
    pub fn parsed<T>(&mut self, message: &str) -> io::Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "  {err}")?,
            }
        }
    }

    /// Shows a numbered list and returns the value of the picked entry.
    pub fn select<T: Clone>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> io::Result<Option<T>> {
        if choices.is_empty() {
            return Ok(None);
        }

        writeln!(self.output, "? {message}")?;
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, choice.label)?;
        }

        loop {
            let Some(answer) = self.ask(">")? else {
                return Ok(None);
            };
            let picked = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| choices.get(index));
            match picked {
                Some(choice) => return Ok(Some(choice.value.clone())),
                None => writeln!(
                    self.output,
                    "  Please enter a number between 1 and {}.",
                    choices.len()
                )?,
            }
        }
    }

    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Choice, Prompter};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(prompter: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output().clone()).unwrap()
    }

    #[test]
    fn text_repeats_until_non_blank() {
        let mut prompter = prompter("\n   \n  Sales  \n");
        let answer = prompter.text("Name:").unwrap();
        assert_eq!(answer.as_deref(), Some("Sales"));
        assert_eq!(printed(&mut prompter).matches("A value is required.").count(), 2);
    }

    #[test]
    fn parsed_reports_errors_and_retries() {
        let mut prompter = prompter("abc\n42\n");
        let answer: Option<u32> = prompter.parsed("Number:").unwrap();
        assert_eq!(answer, Some(42));
        assert!(printed(&mut prompter).contains("invalid digit"));
    }

    #[test]
    fn select_maps_number_to_value_and_rejects_out_of_range() {
        let choices = vec![Choice::new("Alpha", 10), Choice::new("Beta", 20)];
        let mut prompter = prompter("0\n3\nx\n2\n");
        assert_eq!(prompter.select("Pick:", &choices).unwrap(), Some(20));

        let output = printed(&mut prompter);
        assert!(output.contains("1) Alpha"));
        assert!(output.contains("2) Beta"));
        assert_eq!(
            output
                .matches("Please enter a number between 1 and 2.")
                .count(),
            3
        );
    }

    #[test]
    fn prompts_return_none_at_end_of_input() {
        let mut prompter = prompter("");
        assert_eq!(prompter.text("Name:").unwrap(), None);
        assert_eq!(prompter.parsed::<u32>("Number:").unwrap(), None);
        let choices = vec![Choice::new("Only", ())];
        assert_eq!(prompter.select("Pick:", &choices).unwrap(), None);
    }

    #[test]
    fn select_with_no_choices_returns_none_without_reading() {
        let mut prompter = prompter("1\n");
        let empty: Vec<Choice<u8>> = Vec::new();
        assert_eq!(prompter.select("Pick:", &empty).unwrap(), None);
        assert_eq!(prompter.text("Next:").unwrap().as_deref(), Some("1"));
    }
}
