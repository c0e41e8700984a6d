use std::io;
use thiserror::Error;

/// Hard failures of the status data source
///
/// Parsing and rendering never fail; only getting the status text can.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("failed to start `{program}`: {source}")]
    SourceUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read status output: {0}")]
    ReadFailed(#[from] io::Error),

    #[error("`{program}` exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    SourceFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let first_line = stderr.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        String::new()
    } else {
        format!(": {}", first_line)
    }
}
