use std::io::{BufRead, Write};

use super::LineSource;
use crate::core::parser::ParseError;
use crate::error::ShellError;

/// Reads lines from any buffered reader, writing the prompt to `out`.
pub struct PipedSource<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> PipedSource<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        PipedSource { reader, out }
    }
}

impl<R: BufRead, W: Write> LineSource for PipedSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.out.write_all(prompt.as_bytes())?;
        self.out.flush()?;

        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        // The whole line is consumed either way, so the next read starts clean.
        String::from_utf8(line)
            .map(Some)
            .map_err(|_| ShellError::Parse(ParseError::InvalidEncoding))
    }
}
