//! Porcelain v1 status parser
//!
//! Turns the output of `git status --porcelain=v1 -b` into a [`RepoStatus`].
//! Line 0 is the branch header, every following line is `XY <path>`.
//!
//! Header shapes handled:
//! - `## No commits yet on main`
//! - `## main`
//! - `## main...origin/main`
//! - `## main...origin/main [ahead 2]`
//! - `## main...origin/main [behind 1]`
//! - `## main...origin/main [ahead 1, behind 3]`
//!
//! Tokens are addressed by position, so branch names with spaces are not
//! supported. Nothing in here fails: a malformed header leaves the branch
//! empty, a bad count becomes 0, an unknown status code is skipped.

use super::status::{ChangeKind, RepoStatus};
use std::io::{self, BufRead};
use std::num::IntErrorKind;

/// Header prefix git prints for a branch without any commit
pub const UNBORN_PREFIX: &str = "## No commits yet on ";

/// Separator between local and upstream branch in the header
const UPSTREAM_SEPARATOR: &str = "...";

/// Status code of an untracked path
const UNTRACKED_CODE: (char, char) = ('?', '?');

/// Parse the branch header line into `status`
pub fn parse_header(line: &str, status: &mut RepoStatus) {
    if let Some(name) = line.strip_prefix(UNBORN_PREFIX) {
        status.branch_name = name.to_string();
        return;
    }

    let tokens: Vec<&str> = line.split(' ').collect();

    let Some(branch) = tokens.get(1) else {
        log::debug!("Malformed status header, no branch token: {:?}", line);
        return;
    };

    status.branch_name = match branch.find(UPSTREAM_SEPARATOR) {
        Some(pos) => branch[..pos].to_string(),
        None => branch.to_string(),
    };

    match tokens.len() {
        // ## main...origin/main [ahead 2]
        4 => {
            let count = parse_count(tokens[3]);
            if tokens[2].contains("ahead") {
                status.commits_ahead = count;
            } else {
                status.commits_behind = count;
            }
        }
        // ## main...origin/main [ahead 1, behind 3]
        6 => {
            status.commits_ahead = parse_count(tokens[3]);
            status.commits_behind = parse_count(tokens[5]);
        }
        _ => {}
    }
}

/// Parse a count token such as `2]` or `1,`
///
/// One trailing punctuation character is dropped before conversion.
/// Counts too large for `u32` saturate; anything that still is not a
/// number counts as zero.
fn parse_count(token: &str) -> u32 {
    let digits = match token.chars().last() {
        Some(last) if last.is_ascii_punctuation() => &token[..token.len() - last.len_utf8()],
        _ => token,
    };

    match digits.parse::<u32>() {
        Ok(count) => count,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => {
            log::debug!("Unparseable commit count {:?}, using 0", token);
            0
        }
    }
}

/// Parse one `XY <path>` change line into `status`
///
/// The index column (X) and the working-tree column (Y) are looked up
/// independently, so `AM` counts once on each side.
pub fn parse_change_line(line: &str, status: &mut RepoStatus) {
    let mut chars = line.chars();
    let (Some(index_code), Some(working_code)) = (chars.next(), chars.next()) else {
        log::trace!("Ignoring short status line {:?}", line);
        return;
    };

    if (index_code, working_code) == UNTRACKED_CODE {
        status.record_working(ChangeKind::Added);
        return;
    }

    let working = ChangeKind::from_working_code(working_code);
    let index = ChangeKind::from_index_code(index_code);

    if working.is_none() && index.is_none() {
        log::trace!("Ignoring status code '{}{}'", index_code, working_code);
        return;
    }

    if let Some(kind) = working {
        status.record_working(kind);
    }
    if let Some(kind) = index {
        status.record_index(kind);
    }
}

/// Folds status lines, in order, into one [`RepoStatus`]
#[derive(Debug, Default)]
pub struct StatusParser {
    status: RepoStatus,
    lines_seen: usize,
}

impl StatusParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of status output (without its newline)
    pub fn feed(&mut self, line: &str) {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if self.lines_seen == 0 {
            parse_header(line, &mut self.status);
        } else {
            parse_change_line(line, &mut self.status);
        }

        self.lines_seen += 1;
    }

    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Finish parsing and hand out the accumulated summary
    pub fn finish(self) -> RepoStatus {
        self.status
    }
}

/// Parse a complete status output held in memory
pub fn parse_status_output(output: &str) -> RepoStatus {
    let mut parser = StatusParser::new();
    for line in output.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Parse status output from a reader, one line at a time
///
/// Each line is parsed before the next one is read. Invalid UTF-8 is
/// replaced rather than treated as a read error.
pub fn parse_status_reader<R: BufRead>(mut reader: R) -> io::Result<RepoStatus> {
    let mut parser = StatusParser::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        parser.feed(line.strip_suffix('\n').unwrap_or(&line));
    }

    log::trace!("Parsed {} status lines", parser.lines_seen());
    Ok(parser.finish())
}
