use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_interval() -> u64 {
    60
}

fn default_max_items() -> usize {
    10
}

fn default_program() -> String {
    "notmuch".to_string()
}

fn default_sync_command() -> Vec<String> {
    vec!["mbsync".to_string(), "-aq".to_string()]
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Seconds between poll ticks.
    #[serde(default = "default_interval")]
    pub update_interval_secs: u64,

    /// How many rows the dropdown summary shows at most.
    #[serde(default = "default_max_items")]
    pub max_summary_items: usize,

    /// The indexer executable.
    #[serde(default = "default_program")]
    pub notmuch_program: String,

    /// Program + args run on force refresh, output ignored.
    #[serde(default = "default_sync_command")]
    pub sync_command: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            update_interval_secs: default_interval(),
            max_summary_items: default_max_items(),
            notmuch_program: default_program(),
            sync_command: default_sync_command(),
        }
    }
}

impl Settings {
    /// Poll interval as a duration; an interval of 0 would spin, so it reads as 1s.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs.max(1))
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow!("no config dir available"))?
        .join("rs_mail_applet"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn load_settings() -> Result<Settings> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        // create a template config for users to edit
        let tom = toml::to_string_pretty(&Settings::default())?;
        fs::write(path, tom)?;
        return Err(anyhow!(
            "Created template config at {} — edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&s)?;
    Ok(settings)
}
