use super::types::Config;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of config initialization
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Config was created at the given path
    Created(PathBuf),
    /// Config already existed at the given path
    AlreadyExists(PathBuf),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config from `path`, or from the default location when `None`
    ///
    /// A file that cannot be read or parsed is reported and replaced by the
    /// defaults, so a broken config never takes the prompt down.
    pub fn load(path: Option<&Path>) -> Config {
        let result = match path {
            Some(path) => Self::load_from_path(path),
            None => Config::load(),
        };

        result.unwrap_or_else(|e| {
            log::warn!("Ignoring unusable config, using defaults: {}", e);
            Config::default()
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        ConfigLoader::load_from_path(config_path)
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(Self::get_config_path())
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.config/gitline/config.toml on Linux)
    pub fn get_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("gitline").join("config.toml")
        } else {
            PathBuf::from(".gitline/config.toml")
        }
    }

    /// Create the default config at the default location
    pub fn init() -> Result<InitResult, Box<dyn std::error::Error>> {
        Self::init_at(Self::get_config_path())
    }

    /// Create the default config at `path` unless a file is already there
    pub fn init_at<P: AsRef<Path>>(path: P) -> Result<InitResult, Box<dyn std::error::Error>> {
        let path = path.as_ref();

        if path.exists() {
            return Ok(InitResult::AlreadyExists(path.to_path_buf()));
        }

        Config::default().save_to(path)?;
        Ok(InitResult::Created(path.to_path_buf()))
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.git.program.trim().is_empty() {
            return Err("git.program must not be empty".into());
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print<W: Write>(&self, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        writeln!(out, "{}", content)?;
        Ok(())
    }
}
