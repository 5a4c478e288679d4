//! Shared test fixtures: a scripted stand-in for the terminal.

use silo_registry::Prompt;
use std::collections::VecDeque;
use std::io;

/// Feeds pre-scripted answers to the login flow and records every prompt it
/// was shown. Running out of script is an error, so a test fails if the
/// flow asks for more input than expected.
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
    secrets: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(lines: &[&str], secrets: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            secrets: secrets.iter().map(|s| s.to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn saw_prompt(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(prompt.to_string());
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "prompt script exhausted"))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(prompt.to_string());
        self.secrets
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "secret script exhausted"))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }
}
