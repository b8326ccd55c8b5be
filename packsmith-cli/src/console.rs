//! Stdin/stdout implementation of the wizard prompt.

use packsmith_core::wizard::prompt::Prompt;
use std::io::{self, Write};

/// Prompts on stdout, reads answers from stdin. Menus are numbered from 1;
/// confirmations insist on a y/n answer.
pub struct ConsolePrompt;

impl ConsolePrompt {
    fn read_answer(&self) -> io::Result<String> {
        let mut input = String::new();
        let read = io::stdin().read_line(&mut input)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompt for ConsolePrompt {
    fn line(&mut self, question: &str) -> io::Result<String> {
        println!("{question}");
        self.read_answer()
    }

    fn select(&mut self, question: &str, options: &[&str]) -> io::Result<Option<usize>> {
        println!("{question}");
        for (index, option) in options.iter().enumerate() {
            println!("  [{}] {option}", index + 1);
        }
        print!("Select 1-{}: ", options.len());
        io::stdout().flush()?;

        let answer = self.read_answer()?;
        Ok(answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&index| index < options.len()))
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            print!("{question} [y/n]: ");
            io::stdout().flush()?;

            let answer = self.read_answer()?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please answer y or n."),
            }
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}
