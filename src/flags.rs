use clap::Parser;

use crate::core::parser::Limits;

/// A small shell with `cd`, `status` and `exit` built in.
#[derive(Debug, Clone, Parser)]
#[command(name = "smallsh", version, about)]
pub struct Flags {
    /// Do not print a prompt
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Prompt printed before each command
    #[arg(short, long, default_value = ": ")]
    pub prompt: String,

    /// Maximum number of words in one command
    #[arg(long, default_value_t = Limits::default().max_args)]
    pub max_args: usize,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            quiet: false,
            debug: false,
            prompt: ": ".to_string(),
            max_args: Limits::default().max_args,
        }
    }
}

impl Flags {
    pub fn prompt(&self) -> &str {
        if self.quiet {
            ""
        } else {
            &self.prompt
        }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_args: self.max_args,
            ..Limits::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let parsed = Flags::try_parse_from(["smallsh"]).unwrap();
        let default = Flags::default();
        assert_eq!(parsed.prompt, default.prompt);
        assert_eq!(parsed.max_args, default.max_args);
        assert!(!parsed.quiet && !parsed.debug);
        assert_eq!(parsed.prompt(), ": ");
    }

    #[test]
    fn test_flags() {
        let flags =
            Flags::try_parse_from(["smallsh", "-q", "--debug", "--max-args", "16"]).unwrap();
        assert!(flags.quiet);
        assert!(flags.debug);
        assert_eq!(flags.prompt(), "");
        assert_eq!(flags.limits().max_args, 16);
        assert_eq!(flags.limits().max_path, Limits::default().max_path);
    }

    #[test]
    fn test_custom_prompt() {
        let flags = Flags::try_parse_from(["smallsh", "--prompt", "$ "]).unwrap();
        assert_eq!(flags.prompt(), "$ ");
    }

    #[test]
    fn test_bad_value() {
        assert!(Flags::try_parse_from(["smallsh", "--max-args", "many"]).is_err());
    }
}
