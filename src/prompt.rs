use crate::errors::Result;
use std::io::{BufRead, Write};

/// Yes/no confirmation from the user
pub trait Confirm {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Only `y` and `yes` count, in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Reads the answer from stdin
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> Result<bool> {
        print!("{} (y/N): ", question);
        std::io::stdout().flush()?;

        let answer = read_answer(&mut std::io::stdin().lock())?;
        if answer.is_none() {
            println!();
        }
        Ok(answer.is_some_and(|answer| is_affirmative(&answer)))
    }
}

/// One line of input, or `None` at EOF
///
/// Bytes that are not UTF-8 are replaced rather than rejected.
pub fn read_answer(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Canned answer for non-interactive use
#[cfg(test)]
pub struct FixedAnswer {
    pub answer: String,
    pub questions: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl FixedAnswer {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            questions: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> usize {
        self.questions.borrow().len()
    }
}

#[cfg(test)]
impl Confirm for FixedAnswer {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(is_affirmative(&self.answer))
    }
}
