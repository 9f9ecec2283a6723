//! Line-oriented prompts for interactive answering.
//!
//! Each prompt re-asks until the input is valid. Running out of input is an
//! error rather than a silent default.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line without asking anything.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("unexpected end of input");
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// A non-empty string.
    pub fn string(&mut self, prompt: &str) -> Result<String> {
        let mut answer = self.ask(prompt)?;
        while answer.is_empty() {
            answer = self.ask("string too short, retry: ")?;
        }
        Ok(answer)
    }

    /// A non-negative integer, at most `max` when given.
    pub fn number(&mut self, prompt: &str, max: Option<u64>) -> Result<u64> {
        let limit = max.map_or_else(|| "…".to_string(), |m| m.to_string());
        let mut answer = self.ask(&format!("{prompt} (0-{limit}): "))?;
        loop {
            if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
                answer = self.ask("please enter only digits: ")?;
                continue;
            }
            let Ok(value) = answer.parse::<u64>() else {
                answer = self.ask("value too large, retry: ")?;
                continue;
            };
            if let Some(m) = max.filter(|&m| value > m) {
                answer = self.ask(&format!("value must be <= {m}: "))?;
                continue;
            }
            return Ok(value);
        }
    }

    /// A yes/no answer.
    pub fn affirm(&mut self, prompt: &str) -> Result<bool> {
        let mut answer = self.ask(&format!("{prompt} (y/n): "))?;
        while answer != "y" && answer != "n" {
            answer = self.ask("answer must be either \"y\" or \"n\": ")?;
        }
        Ok(answer == "y")
    }
}
