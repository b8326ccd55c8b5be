//! Operator interaction surface.
//!
//! The wizard and the deployer only ever talk to the operator through
//! [`Prompt`]; the CLI implements it over stdin/stdout, and tests drive the
//! state machines with [`ScriptedPrompt`].

use crate::error::{PackError, Result};
use std::io;

/// Question shown whenever a step's input was rejected.
pub const REDO_QUESTION: &str = "Do you want to redo the process?";

/// Blocking question-and-answer channel between the state machines and the
/// operator. Every call waits indefinitely; errors are transport errors
/// (e.g. stdin closed), never bad answers.
pub trait Prompt {
    /// Free-text answer with the trailing newline removed.
    fn line(&mut self, question: &str) -> io::Result<String>;

    /// Single choice out of `options`, by index. `None` means the operator
    /// gave something that matches no option.
    fn select(&mut self, question: &str, options: &[&str]) -> io::Result<Option<usize>>;

    /// Strict yes/no answer.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// One-way message to the operator.
    fn notify(&mut self, message: &str);
}

/// One attempt at a collection step.
pub enum Attempt<T> {
    /// Input accepted; the step is done.
    Valid(T),
    /// Input rejected, with the message shown to the operator.
    Invalid(String),
}

/// Runs one collection step under the uniform redo contract.
///
/// Invalid input shows the step's message and asks [`REDO_QUESTION`]; on
/// agreement the same step runs again, otherwise `on_abort` is returned.
/// Transport failures abort with `on_abort` as well.
pub fn collect<T, F>(prompt: &mut dyn Prompt, on_abort: PackError, mut step: F) -> Result<T>
where
    F: FnMut(&mut dyn Prompt) -> io::Result<Attempt<T>>,
{
    loop {
        match step(prompt) {
            Ok(Attempt::Valid(value)) => return Ok(value),
            Ok(Attempt::Invalid(message)) => prompt.notify(&message),
            Err(err) => {
                tracing::error!(%err, "prompt transport failed");
                return Err(on_abort);
            }
        }

        match prompt.confirm(REDO_QUESTION) {
            Ok(true) => continue,
            Ok(false) => return Err(on_abort),
            Err(err) => {
                tracing::error!(%err, "prompt transport failed");
                return Err(on_abort);
            }
        }
    }
}

/// Maps a transport failure to the current step's category.
pub(crate) fn transport<T>(result: io::Result<T>, on_abort: PackError) -> Result<T> {
    result.map_err(|err| {
        tracing::error!(%err, "prompt transport failed");
        on_abort
    })
}

#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedPrompt;

#[cfg(any(test, feature = "test-support"))]
mod scripted {
    use super::Prompt;
    use std::collections::VecDeque;
    use std::io;

    #[derive(Debug)]
    enum Answer {
        Line(String),
        Select(Option<usize>),
        Confirm(bool),
    }

    /// Canned answers for driving the state machines without a terminal.
    ///
    /// Answers are consumed in order and must match the kind of question
    /// asked; a mismatch or an exhausted script yields an I/O error, which
    /// the state machines treat as a lost operator. Everything shown to the
    /// operator is recorded in `transcript`.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<Answer>,
        pub transcript: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a free-text answer.
        pub fn with_line(mut self, answer: &str) -> Self {
            self.answers.push_back(Answer::Line(answer.to_string()));
            self
        }

        /// Queues a menu selection; `None` plays an unrecognized choice.
        pub fn with_select(mut self, choice: Option<usize>) -> Self {
            self.answers.push_back(Answer::Select(choice));
            self
        }

        /// Queues a yes/no answer.
        pub fn with_confirm(mut self, yes: bool) -> Self {
            self.answers.push_back(Answer::Confirm(yes));
            self
        }

        fn next(&mut self, expected: &str) -> io::Result<Answer> {
            self.answers.pop_front().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("scripted prompt exhausted while waiting for {expected}"),
                )
            })
        }

        fn mismatch(expected: &str, got: Answer) -> io::Error {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("scripted prompt expected {expected} answer, script holds {got:?}"),
            )
        }
    }

    impl Prompt for ScriptedPrompt {
        fn line(&mut self, question: &str) -> io::Result<String> {
            self.transcript.push(question.to_string());
            match self.next("line")? {
                Answer::Line(answer) => Ok(answer),
                other => Err(Self::mismatch("line", other)),
            }
        }

        fn select(&mut self, question: &str, options: &[&str]) -> io::Result<Option<usize>> {
            self.transcript.push(question.to_string());
            for option in options {
                self.transcript.push(format!("  {option}"));
            }
            match self.next("select")? {
                Answer::Select(choice) => Ok(choice),
                other => Err(Self::mismatch("select", other)),
            }
        }

        fn confirm(&mut self, question: &str) -> io::Result<bool> {
            self.transcript.push(question.to_string());
            match self.next("confirm")? {
                Answer::Confirm(yes) => Ok(yes),
                other => Err(Self::mismatch("confirm", other)),
            }
        }

        fn notify(&mut self, message: &str) {
            self.transcript.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_returns_valid_input() {
        let mut prompt = ScriptedPrompt::new().with_line("hello");

        let value = collect(&mut prompt, PackError::Header, |p| {
            Ok(Attempt::Valid(p.line("say something")?))
        })
        .unwrap();

        assert_eq!(value, "hello");
    }

    #[test]
    fn collect_retries_when_operator_agrees() {
        let mut prompt = ScriptedPrompt::new()
            .with_line("")
            .with_confirm(true)
            .with_line("second try");

        let value = collect(&mut prompt, PackError::Header, |p| {
            let input = p.line("say something")?;
            Ok(if input.is_empty() {
                Attempt::Invalid("nothing given".to_string())
            } else {
                Attempt::Valid(input)
            })
        })
        .unwrap();

        assert_eq!(value, "second try");
        assert!(prompt.transcript.contains(&"nothing given".to_string()));
    }

    #[test]
    fn collect_aborts_with_category_when_redo_declined() {
        let mut prompt = ScriptedPrompt::new().with_line("").with_confirm(false);

        let result: crate::error::Result<String> = collect(&mut prompt, PackError::Module, |p| {
            let input = p.line("say something")?;
            Ok(if input.is_empty() {
                Attempt::Invalid("nothing given".to_string())
            } else {
                Attempt::Valid(input)
            })
        });

        assert_eq!(result, Err(PackError::Module));
    }

    #[test]
    fn collect_aborts_on_transport_failure() {
        let mut prompt = ScriptedPrompt::new();

        let result: crate::error::Result<String> =
            collect(&mut prompt, PackError::WorkingDir, |p| {
                Ok(Attempt::Valid(p.line("say something")?))
            });

        assert_eq!(result, Err(PackError::WorkingDir));
    }
}
