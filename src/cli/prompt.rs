use std::io::{self, BufRead, Write};

/// Line-oriented prompts. End of input reads as an empty answer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Uses `given` when present, otherwise asks.
    pub fn value_or_ask(&mut self, given: Option<&str>, question: &str) -> io::Result<String> {
        match given {
            Some(value) => Ok(value.to_string()),
            None => self.ask(question),
        }
    }
}
