use super::parser::parse_status_reader;
use super::status::RepoStatus;
use crate::config::GitConfig;
use crate::error::StatusError;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Something that can produce a parsed repository status
pub trait StatusSource {
    fn collect(&mut self) -> Result<RepoStatus, StatusError>;
}

/// Runs `git status --porcelain=v1 -b` and parses its output as it streams in
#[derive(Debug, Clone)]
pub struct GitStatusSource {
    program: String,
    no_optional_locks: bool,
    working_dir: Option<PathBuf>,
}

impl Default for GitStatusSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GitStatusSource {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            no_optional_locks: true,
            working_dir: None,
        }
    }

    pub fn from_config(config: &GitConfig) -> Self {
        Self::new()
            .with_program(&config.program)
            .with_no_optional_locks(config.no_optional_locks)
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn with_no_optional_locks(mut self, no_optional_locks: bool) -> Self {
        self.no_optional_locks = no_optional_locks;
        self
    }

    pub fn with_working_dir(mut self, working_dir: Option<PathBuf>) -> Self {
        self.working_dir = working_dir;
        self
    }

    fn args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.no_optional_locks {
            args.push("--no-optional-locks");
        }
        args.extend(["status", "--porcelain=v1", "-b"]);
        args
    }
}

impl StatusSource for GitStatusSource {
    fn collect(&mut self) -> Result<RepoStatus, StatusError> {
        let args = self.args();
        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        log::debug!("Running {} {}", self.program, args.join(" "));

        let mut child = command
            .spawn()
            .map_err(|source| StatusError::SourceUnavailable {
                program: self.program.clone(),
                source,
            })?;

        // git may write a warning per file to stderr; drain it alongside
        // stdout so a full stderr pipe never stalls the child
        let stderr_drain = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                if let Err(e) = stderr.read_to_end(&mut buf) {
                    log::debug!("Failed to read status stderr: {}", e);
                }
                buf
            })
        });

        let parsed = match child.stdout.take() {
            Some(stdout) => parse_status_reader(BufReader::new(stdout)),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "status output was not captured",
            )),
        };

        // Reap the child before looking at what was read
        let exit_status = child.wait()?;
        let stderr = stderr_drain
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !exit_status.success() {
            return Err(StatusError::SourceFailed {
                program: self.program.clone(),
                code: exit_status.code(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            });
        }

        Ok(parsed?)
    }
}

/// Parses porcelain text from an arbitrary reader, e.g. piped stdin
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> StatusSource for ReaderSource<R> {
    fn collect(&mut self) -> Result<RepoStatus, StatusError> {
        Ok(parse_status_reader(&mut self.reader)?)
    }
}
