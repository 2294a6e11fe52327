//! Line-oriented reading of piped stdin.
//!
//! With `--passphrase-stdin` the first line is the master passphrase; a
//! command taking `--secret-stdin` reads the entry secret from the next one.

use std::collections::VecDeque;
use std::io::{self, Read};

use secrecy::SecretString;
use zeroize::Zeroizing;

/// The lines of stdin, read once and handed out in order.
pub struct StdinLines {
    lines: VecDeque<Zeroizing<String>>,
}

impl StdinLines {
    pub fn from_stdin() -> anyhow::Result<Self> {
        Self::read_from(io::stdin().lock())
    }

    pub fn read_from<R: Read>(mut reader: R) -> anyhow::Result<Self> {
        let mut buffer = Zeroizing::new(String::new());
        reader
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;

        let lines = buffer
            .lines()
            .map(|line| Zeroizing::new(line.to_string()))
            .collect();
        Ok(Self { lines })
    }

    /// Take the next line. `what` names the value for the error message.
    pub fn next_line(&mut self, what: &str) -> anyhow::Result<SecretString> {
        match self.lines.pop_front() {
            Some(line) if !line.is_empty() => Ok(SecretString::from(line.as_str().to_owned())),
            Some(_) => Err(anyhow::anyhow!("Empty {} on stdin", what)),
            None => Err(anyhow::anyhow!("No {} provided on stdin", what)),
        }
    }
}
