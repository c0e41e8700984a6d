//! Prompt segment rendering
//!
//! Produces the final prompt text from a [`RepoStatus`]:
//!
//! ```text
//! [main ≡]
//! [main ↑2 +1 ~1 -0]
//! [main ↑1 ↓3 +1 ~0 -0]
//! [main +1 ~0 -0 | +0 ~2 -0]
//! ```
//!
//! Segments are appended in a fixed order and only when their condition
//! holds. Each segment is painted with its own style from the [`Palette`].

use super::status::{ChangeCounts, RepoStatus};
use ansi_term::{Colour, Style};

/// Unicode arrow for commits ahead of upstream
pub const AHEAD_ICON: &str = "\u{2191}"; // ↑

/// Unicode arrow for commits behind upstream
pub const BEHIND_ICON: &str = "\u{2193}"; // ↓

/// Unicode identical-to sign for a branch in sync with upstream
pub const IN_SYNC_ICON: &str = "\u{2261}"; // ≡

/// Separator between the index and working-tree segments
pub const SEGMENT_SEPARATOR: &str = " |";

/// Per-segment styles used by [`render_prompt`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bracket: Style,
    pub branch: Style,
    /// Ahead, behind and in-sync markers
    pub divergence: Style,
    pub index: Style,
    pub working: Style,
    pub separator: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bracket: Colour::Yellow.normal(),
            branch: Colour::Blue.normal(),
            divergence: Colour::Cyan.normal(),
            index: Colour::Green.normal(),
            working: Colour::Red.normal(),
            separator: Colour::Yellow.normal(),
        }
    }
}

impl Palette {
    /// Palette without any escape sequences
    pub fn plain() -> Self {
        Self {
            bracket: Style::new(),
            branch: Style::new(),
            divergence: Style::new(),
            index: Style::new(),
            working: Style::new(),
            separator: Style::new(),
        }
    }

    pub fn with_color(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::plain()
        }
    }
}

/// Render the prompt segment for `status`
pub fn render_prompt(status: &RepoStatus, palette: &Palette) -> String {
    let mut out = String::new();

    push_painted(&mut out, palette.bracket, "[");
    push_painted(&mut out, palette.branch, &status.branch_name);

    if status.commits_ahead > 0 {
        let marker = format!(" {}{}", AHEAD_ICON, status.commits_ahead);
        push_painted(&mut out, palette.divergence, &marker);
    }
    if status.commits_behind > 0 {
        let marker = format!(" {}{}", BEHIND_ICON, status.commits_behind);
        push_painted(&mut out, palette.divergence, &marker);
    }
    if status.is_in_sync() {
        let marker = format!(" {}", IN_SYNC_ICON);
        push_painted(&mut out, palette.divergence, &marker);
    }

    if status.show_index {
        push_painted(&mut out, palette.index, &format_counts(&status.index));
    }

    if status.show_working {
        if status.show_index {
            push_painted(&mut out, palette.separator, SEGMENT_SEPARATOR);
        }
        push_painted(&mut out, palette.working, &format_counts(&status.working));
    }

    push_painted(&mut out, palette.bracket, "]");
    out
}

/// ` +added ~modified -removed`
fn format_counts(counts: &ChangeCounts) -> String {
    format!(" +{} ~{} -{}", counts.added, counts.modified, counts.removed)
}

fn push_painted(out: &mut String, style: Style, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(&style.paint(text).to_string());
}

/// Strip ANSI escape sequences from text (for testing)
#[cfg(test)]
fn strip_ansi(text: &str) -> String {
    let mut result = String::new();
    let mut in_escape = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            in_escape = true;
            if chars.peek() == Some(&'[') {
                chars.next();
            }
        } else if in_escape {
            if ch.is_alphabetic() {
                in_escape = false;
            }
        } else {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::ChangeKind;

    fn status_on(branch: &str) -> RepoStatus {
        RepoStatus {
            branch_name: branch.to_string(),
            ..RepoStatus::default()
        }
    }

    fn plain(status: &RepoStatus) -> String {
        render_prompt(status, &Palette::plain())
    }

    #[test]
    fn test_render_clean_in_sync() {
        assert_eq!(plain(&status_on("main")), "[main ≡]");
    }

    #[test]
    fn test_render_ahead_with_index() {
        let mut status = status_on("main");
        status.commits_ahead = 2;
        status.record_index(ChangeKind::Modified);
        status.record_index(ChangeKind::Added);

        assert_eq!(plain(&status), "[main ↑2 +1 ~1 -0]");
    }

    #[test]
    fn test_render_diverged_with_untracked() {
        let mut status = status_on("main");
        status.commits_ahead = 1;
        status.commits_behind = 3;
        status.record_working(ChangeKind::Added);

        assert_eq!(plain(&status), "[main ↑1 ↓3 +1 ~0 -0]");
    }

    #[test]
    fn test_render_behind_only() {
        let mut status = status_on("dev");
        status.commits_behind = 5;

        assert_eq!(plain(&status), "[dev ↓5]");
    }

    #[test]
    fn test_render_both_segments_with_separator() {
        let mut status = status_on("main");
        status.record_working(ChangeKind::Modified);
        status.record_index(ChangeKind::Added);
        status.record_working(ChangeKind::Modified);

        assert_eq!(plain(&status), "[main ≡ +1 ~0 -0 | +0 ~2 -0]");
    }

    #[test]
    fn test_render_empty_branch() {
        assert_eq!(plain(&RepoStatus::new()), "[ ≡]");
    }

    #[test]
    fn test_render_colored_segments() {
        let mut status = status_on("main");
        status.commits_ahead = 1;
        status.record_index(ChangeKind::Added);
        status.record_working(ChangeKind::Removed);

        let line = render_prompt(&status, &Palette::default());

        assert!(line.starts_with("\x1b[33m[\x1b[0m"));
        assert!(line.contains("\x1b[34mmain\x1b[0m"));
        assert!(line.contains("\x1b[36m ↑1\x1b[0m"));
        assert!(line.contains("\x1b[32m +1 ~0 -0\x1b[0m"));
        assert!(line.contains("\x1b[33m |\x1b[0m"));
        assert!(line.contains("\x1b[31m +0 ~0 -1\x1b[0m"));
        assert!(line.ends_with("\x1b[33m]\x1b[0m"));
        assert_eq!(strip_ansi(&line), plain(&status));
    }

    #[test]
    fn test_default_palette_is_distinct() {
        let palette = Palette::default();
        let styles = [
            palette.bracket,
            palette.branch,
            palette.divergence,
            palette.index,
            palette.working,
        ];

        for (i, a) in styles.iter().enumerate() {
            for b in styles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_plain_palette_has_no_escapes() {
        let mut status = status_on("main");
        status.record_index(ChangeKind::Added);
        status.record_working(ChangeKind::Added);

        assert!(!render_prompt(&status, &Palette::with_color(false)).contains('\x1b'));
        assert!(render_prompt(&status, &Palette::with_color(true)).contains('\x1b'));
    }

    #[test]
    fn test_segment_absence_and_separator_law() {
        for (show_index, show_working) in [(false, false), (true, false), (false, true), (true, true)] {
            let mut status = status_on("main");
            if show_index {
                status.record_index(ChangeKind::Modified);
            }
            if show_working {
                status.record_working(ChangeKind::Modified);
            }

            let line = plain(&status);
            assert_eq!(line.contains('~'), show_index || show_working);
            assert_eq!(line.contains(SEGMENT_SEPARATOR), show_index && show_working);
            assert_eq!(line.matches(" +").count(), show_index as usize + show_working as usize);
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut status = status_on("topic");
        status.commits_behind = 2;
        status.record_working(ChangeKind::Added);

        let palette = Palette::default();
        assert_eq!(render_prompt(&status, &palette), render_prompt(&status, &palette));
    }
}
