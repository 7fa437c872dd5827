use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use nix::unistd::dup2;
use thiserror::Error;

const OUTPUT_MODE: u32 = 0o666;

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("cannot open {} for input", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot open {} for output", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The `<` and `>` targets of one command. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirection {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Redirection {
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Redirection { input, output }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }

    /// Rebinds stdin and stdout of the calling process.
    ///
    /// Only meant for a freshly forked child: on error the caller exits
    /// instead of falling back to the inherited streams.
    pub fn apply(&self) -> Result<(), RedirectError> {
        if let Some(path) = &self.input {
            let file = open_input(path)?;
            dup2(file.as_raw_fd(), libc::STDIN_FILENO).map_err(|errno| RedirectError::Input {
                path: path.clone(),
                source: errno.into(),
            })?;
        }
        if let Some(path) = &self.output {
            let file = open_output(path)?;
            dup2(file.as_raw_fd(), libc::STDOUT_FILENO).map_err(|errno| RedirectError::Output {
                path: path.clone(),
                source: errno.into(),
            })?;
        }
        Ok(())
    }
}

/// Files from std are opened close-on-exec; only the dup2'd copy survives exec.
pub fn open_input(path: &Path) -> Result<File, RedirectError> {
    File::open(path).map_err(|source| RedirectError::Input {
        path: path.to_path_buf(),
        source,
    })
}

pub fn open_output(path: &Path) -> Result<File, RedirectError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_MODE)
        .open(path)
        .map_err(|source| RedirectError::Output {
            path: path.to_path_buf(),
            source,
        })
}
