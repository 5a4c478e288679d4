//! Terminal interaction seam for the interactive login flow.

use std::io::{self, Write};

/// Blocking terminal I/O. The login flow only ever talks to the operator
/// through this trait, which keeps it scriptable in tests.
pub trait Prompt {
    /// Print `prompt`, read one echoed line, return it trimmed.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print `prompt`, read one line without echoing the input.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;

    /// Print one line of output.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// The real terminal. Prompts block indefinitely; a human is expected to
/// respond.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }
}
