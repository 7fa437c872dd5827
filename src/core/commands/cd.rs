use std::env;
use std::path::PathBuf;

use super::CommandError;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// Changes the working directory and returns the new one.
    /// Without a target this goes to `$HOME`.
    pub fn execute(&self, target: Option<&str>) -> Result<PathBuf, CommandError> {
        let path = match target {
            Some(path) => PathBuf::from(path),
            None => home_dir()?,
        };

        env::set_current_dir(&path).map_err(|source| CommandError::ChangeDirectory {
            path: path.display().to_string(),
            source,
        })?;
        Ok(env::current_dir().unwrap_or(path))
    }
}

fn home_dir() -> Result<PathBuf, CommandError> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or(CommandError::HomeDirNotFound)
}
