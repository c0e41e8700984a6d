//! Command-line flow: terminal gate, config, status source, output
//!
//! `run` returns the process exit code instead of exiting so every path can
//! be driven from tests with an in-memory stdin and output buffer.

use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, InitResult};
use crate::core::{render_prompt, GitStatusSource, Palette, ReaderSource, StatusSource};
use crate::error::StatusError;
use crate::terminal::TerminalCheck;
use std::io::{BufRead, Write};

pub const EXIT_SUCCESS: u8 = 0;
/// The status command could not be run or reported failure
pub const EXIT_SOURCE_FAILURE: u8 = 1;
/// Output would not reach an interactive UTF-8 terminal
pub const EXIT_NOT_A_TERMINAL: u8 = 2;

pub fn run<R, W>(cli: &Cli, terminal: TerminalCheck, stdin: R, out: &mut W) -> u8
where
    R: BufRead,
    W: Write,
{
    if cli.is_config_command() {
        return match run_config_command(cli, out) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("gitline: {}", e);
                EXIT_SOURCE_FAILURE
            }
        };
    }

    if !cli.force && !cli.json && !terminal.is_capable() {
        log::info!("Skipping prompt output: {:?}", terminal);
        return EXIT_NOT_A_TERMINAL;
    }

    let config = ConfigLoader::load(cli.config.as_deref());

    let collected = if cli.stdin {
        ReaderSource::new(stdin).collect()
    } else {
        GitStatusSource::from_config(&config.git)
            .with_working_dir(cli.dir.clone())
            .collect()
    };

    let status = match collected {
        Ok(status) => status,
        Err(e) => {
            match &e {
                // Routine outside a repository
                StatusError::SourceFailed { .. } => log::debug!("No status: {}", e),
                _ => log::error!("{}", e),
            }
            return EXIT_SOURCE_FAILURE;
        }
    };

    log::debug!(
        "Branch {:?}: {} staged, {} unstaged",
        status.branch_name,
        status.index.total(),
        status.working.total()
    );

    let output = if cli.json {
        match serde_json::to_string(&status) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize status: {}", e);
                return EXIT_SOURCE_FAILURE;
            }
        }
    } else {
        let palette = Palette::with_color(config.output.color && !cli.no_color);
        render_prompt(&status, &palette)
    };

    let written = out.write_all(output.as_bytes());
    if let Err(e) = written.and_then(|_| out.flush()) {
        log::debug!("Failed to write prompt: {}", e);
    }

    EXIT_SUCCESS
}

fn run_config_command<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    if cli.init {
        let result = match &cli.config {
            Some(path) => Config::init_at(path)?,
            None => Config::init()?,
        };
        match result {
            InitResult::Created(path) => writeln!(out, "Created config at {}", path.display())?,
            InitResult::AlreadyExists(path) => {
                writeln!(out, "Config already exists at {}", path.display())?
            }
        }
    }

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => Config::load()?,
    };

    if cli.check {
        config.check()?;
        writeln!(out, "✓ Configuration valid")?;
    }

    if cli.print {
        config.print(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RepoStatus;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const TERMINAL: TerminalCheck = TerminalCheck {
        interactive: true,
        utf8: true,
    };

    const NO_TERMINAL: TerminalCheck = TerminalCheck {
        interactive: false,
        utf8: true,
    };

    const PORCELAIN: &str = "## main...origin/main [ahead 2]\nM  file1.txt\nA  file2.txt\n";

    fn setup_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp dir")
    }

    /// Parse `args` with `--config` pointing into `dir` so the user's config is never read
    fn cli(dir: &Path, args: &[&str]) -> Cli {
        let config = dir.join("config.toml");
        let mut argv = vec!["gitline", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_with(cli: &Cli, terminal: TerminalCheck, stdin: &str) -> (u8, String) {
        let mut out = Vec::new();
        let code = run(cli, terminal, stdin.as_bytes(), &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_stdin_renders_prompt() {
        let dir = setup_temp_dir();
        let cli = cli(dir.path(), &["--stdin", "--no-color"]);

        let (code, out) = run_with(&cli, TERMINAL, PORCELAIN);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "[main ↑2 +1 ~1 -0]");
    }

    #[test]
    fn test_colored_by_default() {
        let dir = setup_temp_dir();
        let cli = cli(dir.path(), &["--stdin"]);

        let (code, out) = run_with(&cli, TERMINAL, PORCELAIN);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.starts_with("\x1b[33m[\x1b[0m"));
    }

    #[test]
    fn test_color_disabled_in_config() {
        let dir = setup_temp_dir();
        fs::write(dir.path().join("config.toml"), "[output]\ncolor = false\n").unwrap();
        let cli = cli(dir.path(), &["--stdin"]);

        let (_, out) = run_with(&cli, TERMINAL, PORCELAIN);
        assert_eq!(out, "[main ↑2 +1 ~1 -0]");
    }

    #[test]
    fn test_not_a_terminal_exits_without_output() {
        let dir = setup_temp_dir();
        let cli = cli(dir.path(), &["--stdin"]);

        let (code, out) = run_with(&cli, NO_TERMINAL, PORCELAIN);
        assert_eq!(code, EXIT_NOT_A_TERMINAL);
        assert!(out.is_empty());

        let non_utf8 = TerminalCheck {
            interactive: true,
            utf8: false,
        };
        let (code, _) = run_with(&cli, non_utf8, PORCELAIN);
        assert_eq!(code, EXIT_NOT_A_TERMINAL);
    }

    #[test]
    fn test_force_skips_terminal_gate() {
        let dir = setup_temp_dir();
        let cli = cli(dir.path(), &["--stdin", "--no-color", "--force"]);

        let (code, out) = run_with(&cli, NO_TERMINAL, PORCELAIN);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "[main ↑2 +1 ~1 -0]");
    }

    #[test]
    fn test_json_output_skips_gate() {
        let dir = setup_temp_dir();
        let cli = cli(dir.path(), &["--stdin", "--json"]);

        let (code, out) = run_with(&cli, NO_TERMINAL, PORCELAIN);
        assert_eq!(code, EXIT_SUCCESS);

        let status: RepoStatus = serde_json::from_str(&out).unwrap();
        assert_eq!(status.branch_name, "main");
        assert_eq!(status.commits_ahead, 2);
        assert_eq!(status.index.added, 1);
        assert_eq!(status.index.modified, 1);
        assert!(status.show_index);
        assert!(!status.show_working);
    }

    #[test]
    fn test_missing_program_is_source_failure() {
        let dir = setup_temp_dir();
        fs::write(
            dir.path().join("config.toml"),
            "[git]\nprogram = \"gitline-no-such-program-4b1d\"\n",
        )
        .unwrap();
        let cli = cli(dir.path(), &[]);

        let (code, out) = run_with(&cli, TERMINAL, "");
        assert_eq!(code, EXIT_SOURCE_FAILURE);
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_source_failure() {
        let dir = setup_temp_dir();
        fs::write(dir.path().join("config.toml"), "[git]\nprogram = \"false\"\n").unwrap();
        let cli = cli(dir.path(), &[]);

        let (code, out) = run_with(&cli, TERMINAL, "");
        assert_eq!(code, EXIT_SOURCE_FAILURE);
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_program_runs_in_requested_dir() {
        // `sh status ...` runs the script named `status` from the -C directory
        let dir = setup_temp_dir();
        let repo = dir.path().join("repo");
        fs::create_dir(&repo).unwrap();
        fs::write(
            repo.join("status"),
            "printf '## main...origin/main [ahead 1, behind 3]\\n?? newfile.txt\\n'\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[git]\nprogram = \"sh\"\nno_optional_locks = false\n",
        )
        .unwrap();
        let cli = cli(dir.path(), &["-C", repo.to_str().unwrap(), "--no-color"]);

        let (code, out) = run_with(&cli, TERMINAL, "");
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "[main ↑1 ↓3 +1 ~0 -0]");
    }

    #[test]
    fn test_config_commands() {
        let dir = setup_temp_dir();
        let cli = cli(dir.path(), &["--init", "--check", "--print"]);

        let (code, out) = run_with(&cli, NO_TERMINAL, "");
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.contains("Created config at"));
        assert!(out.contains("✓ Configuration valid"));
        assert!(out.contains("program = \"git\""));
        assert!(dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_config_check_failure() {
        let dir = setup_temp_dir();
        fs::write(dir.path().join("config.toml"), "[git]\nprogram = \"\"\n").unwrap();
        let cli = cli(dir.path(), &["--check"]);

        let (code, out) = run_with(&cli, TERMINAL, "");
        assert_eq!(code, EXIT_SOURCE_FAILURE);
        assert!(out.is_empty());
    }
}
