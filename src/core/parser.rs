use std::path::{Path, PathBuf};

use nix::unistd::Pid;
use thiserror::Error;

const INPUT_REDIRECT: &str = "<";
const OUTPUT_REDIRECT: &str = ">";
const BACKGROUND: &str = "&";

/// Words that expand to the shell's own pid. Each entry is a prefix that
/// is kept in front of the pid, so `testdir$$` becomes `testdir1234`.
const PID_PLACEHOLDERS: &[&str] = &["", "testdir"];
const PID_TOKEN: &str = "$$";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing filename after '{0}'")]
    MissingRedirectTarget(&'static str),
    #[error("too many arguments (limit is {0})")]
    TooManyArguments(usize),
    #[error("filename too long (limit is {0} bytes)")]
    PathTooLong(usize),
    #[error("no command given")]
    EmptyCommand,
    #[error("input line is not valid UTF-8")]
    InvalidEncoding,
}

/// Bounds enforced while tokenizing.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_args: usize,
    pub max_path: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_args: 512,
            max_path: 4096,
        }
    }
}

/// One parsed input line. Only built by [`Command::parse`], so `args`
/// always holds at least the program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
    background: bool,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Command {
    pub fn program(&self) -> &str {
        &self.args[0]
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// A trailing `&` was given.
    pub fn background(&self) -> bool {
        self.background
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn parse(line: &str, shell_pid: Pid, limits: Limits) -> Result<Self, ParseError> {
        let mut args = Vec::new();
        let mut input = None;
        let mut output = None;

        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            match token {
                INPUT_REDIRECT => {
                    input = Some(redirect_target(&mut tokens, INPUT_REDIRECT, limits)?)
                }
                OUTPUT_REDIRECT => {
                    output = Some(redirect_target(&mut tokens, OUTPUT_REDIRECT, limits)?)
                }
                word => {
                    // one extra slot so a trailing `&` does not count against the limit
                    if args.len() > limits.max_args {
                        return Err(ParseError::TooManyArguments(limits.max_args));
                    }
                    args.push(substitute_pid(word, shell_pid));
                }
            }
        }

        let background = args.last().is_some_and(|last| last == BACKGROUND);
        if background {
            args.pop();
        }
        if args.len() > limits.max_args {
            return Err(ParseError::TooManyArguments(limits.max_args));
        }
        if args.is_empty() {
            return Err(ParseError::EmptyCommand);
        }

        Ok(Command {
            args,
            background,
            input,
            output,
        })
    }
}

fn redirect_target<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    operator: &'static str,
    limits: Limits,
) -> Result<PathBuf, ParseError> {
    let target = tokens
        .next()
        .ok_or(ParseError::MissingRedirectTarget(operator))?;
    if target.len() > limits.max_path {
        return Err(ParseError::PathTooLong(limits.max_path));
    }
    Ok(PathBuf::from(target))
}

fn substitute_pid(word: &str, shell_pid: Pid) -> String {
    match word.strip_suffix(PID_TOKEN) {
        Some(prefix) if PID_PLACEHOLDERS.contains(&prefix) => {
            format!("{}{}", prefix, shell_pid)
        }
        _ => word.to_string(),
    }
}
