//! Terminal capability gate
//!
//! The prompt line carries ANSI escapes and non-ASCII arrows, so it is only
//! printed when a user is looking at an interactive, UTF-8 capable display.

use std::io::{self, IsTerminal};

/// Locale variables in lookup order; the first non-empty one wins
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCheck {
    pub interactive: bool,
    pub utf8: bool,
}

impl TerminalCheck {
    /// Inspect the current process
    ///
    /// Prompts capture stdout (`$(gitline)`) and often silence stderr
    /// (`$(gitline 2>/dev/null)`), so any one standard stream attached to a
    /// terminal counts as interactive.
    pub fn detect() -> Self {
        Self {
            interactive: any_terminal(
                io::stdin().is_terminal(),
                io::stdout().is_terminal(),
                io::stderr().is_terminal(),
            ),
            utf8: detect_utf8(|name| std::env::var(name).ok()),
        }
    }

    pub fn is_capable(&self) -> bool {
        self.interactive && self.utf8
    }
}

pub fn any_terminal(stdin: bool, stdout: bool, stderr: bool) -> bool {
    stdin || stdout || stderr
}

#[cfg(windows)]
fn detect_utf8<F>(_lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    // Windows consoles get UTF-8 output through the console API
    true
}

#[cfg(not(windows))]
fn detect_utf8<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    locale_is_utf8(lookup)
}

/// Decide from `LC_ALL` / `LC_CTYPE` / `LANG` whether the locale is UTF-8
pub fn locale_is_utf8<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let locale = LOCALE_VARS
        .iter()
        .filter_map(|&name| lookup(name))
        .find(|value| !value.is_empty());

    match locale {
        Some(value) => {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        }
        None => false,
    }
}
