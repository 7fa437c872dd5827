use std::io::{self, IsTerminal};

use crate::error::ShellError;

mod editor;
mod piped;

pub use editor::EditorSource;
pub use piped::PipedSource;

/// Where command lines come from.
pub trait LineSource {
    /// Prints `prompt` and reads one line without its terminator.
    /// `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;
}

/// The line editor on a terminal, plain buffered stdin otherwise.
pub fn open() -> Result<Box<dyn LineSource>, ShellError> {
    if io::stdin().is_terminal() {
        log::debug!("reading commands from the terminal");
        Ok(Box::new(EditorSource::new()?))
    } else {
        log::debug!("reading commands from a pipe or file");
        Ok(Box::new(PipedSource::new(io::stdin().lock(), io::stdout())))
    }
}

/// Lines the loop skips without doing anything: blank lines and comments.
pub fn is_ignored(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_lines() {
        assert!(is_ignored(""));
        assert!(is_ignored("   \t"));
        assert!(is_ignored("# a comment"));
        assert!(is_ignored("#echo hi"));
        assert!(!is_ignored("echo # not a comment"));
        assert!(!is_ignored(" ls"));
    }
}
