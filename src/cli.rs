use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitline")]
#[command(version, about = "Compact, color-coded git status segment for shell prompts")]
pub struct Cli {
    /// Repository directory to inspect (defaults to the current directory)
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Read `git status --porcelain=v1 -b` output from stdin instead of running git
    #[arg(long)]
    pub stdin: bool,

    /// Render without ANSI colors
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print even when not attached to an interactive UTF-8 terminal
    #[arg(short, long)]
    pub force: bool,

    /// Print the parsed status as JSON instead of the prompt segment
    #[arg(long)]
    pub json: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initialize the config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration validity
    #[arg(long = "check")]
    pub check: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Config maintenance flags run instead of rendering
    pub fn is_config_command(&self) -> bool {
        self.init || self.check || self.print
    }
}
