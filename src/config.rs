use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;

use crate::api::ScoreSource;
use crate::util::dates;
use crate::Error;

const CONFIG_FILE_NAME: &str = "scoreboard.toml";

#[derive(Debug, Deserialize, Clone)]
struct FileConfig {
    pub source: String,
    pub output_dir: String,
    #[serde(default = "default_recent_games_limit")]
    pub recent_games_limit: usize,
    pub scheduler: SchedulerConfig,
    pub log: FileLogConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct FileLogConfig {
    pub level: String,
    pub path: String,
    pub json_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub source: ScoreSource,
    pub output_dir: PathBuf,
    pub recent_games_limit: usize,
    pub scheduler: SchedulerConfig,
    pub log: LogConfig,
}

fn default_recent_games_limit() -> usize {
    10
}

fn expand_tilde(path: &str) -> Result<PathBuf, Error> {
    if path.starts_with("~/") {
        let home = env::var("HOME")?;
        Ok(PathBuf::from(path.replacen("~", &home, 1)))
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Loads `scoreboard.toml` from the directory holding the executable.
pub fn load_config() -> Result<AppConfig, Error> {
    let exe_path = env::current_exe()?;
    let config_path = match exe_path.parent() {
        Some(dir) => dir.join(CONFIG_FILE_NAME),
        _ => return Err("failed to determine executable directory".into()),
    };

    if !config_path.is_file() {
        return Err(format!(
            "Config file does not exist or is not a file: {}",
            config_path.display()
        )
        .into());
    }

    let s = fs::read_to_string(&config_path)?;
    parse_config(&s)
}

pub(crate) fn parse_config(s: &str) -> Result<AppConfig, Error> {
    let cfg: FileConfig = toml::from_str(s)?;

    if cfg.scheduler.interval_secs == 0 {
        return Err("scheduler.interval_secs must be greater than zero".into());
    }
    if cfg.recent_games_limit == 0 {
        return Err("recent_games_limit must be greater than zero".into());
    }

    let source = if ScoreSource::is_remote(&cfg.source) {
        // A request never outlives the poll interval.
        ScoreSource::http(&cfg.source, Duration::from_secs(cfg.scheduler.interval_secs))
    } else {
        ScoreSource::file(expand_tilde(&cfg.source)?)
    };

    let output_dir = expand_tilde(&cfg.output_dir)?;
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(format!("Output path exists but is not a directory: {}", cfg.output_dir).into());
    }

    Ok(AppConfig {
        source,
        output_dir,
        recent_games_limit: cfg.recent_games_limit,
        scheduler: cfg.scheduler,
        log: build_log_config(cfg.log)?,
    })
}

fn build_log_config(file_log: FileLogConfig) -> Result<LogConfig, Error> {
    let path = log_file_replacements(&file_log.path)?;
    check_log_path(&path, &file_log.path)?;

    let json_path = log_file_replacements(&file_log.json_path)?;
    check_log_path(&json_path, &file_log.json_path)?;

    Ok(LogConfig {
        level: file_log.level,
        path,
        json_path,
    })
}

fn check_log_path(path: &Path, configured: &str) -> Result<(), Error> {
    // A bare file name has an empty parent: the working directory.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(format!("Log file directory does not exist: {}", parent.display()).into());
        }
    }
    if path.exists() && !path.is_file() {
        return Err(format!("Log path exists but is not a file: {}", configured).into());
    }
    Ok(())
}

fn log_file_replacements(cfg_path: &str) -> Result<PathBuf, Error> {
    let date_str = dates::local_date_yyyy_mm_dd();
    let replaced = cfg_path.replace("{DATE}", &date_str);
    expand_tilde(&replaced)
}
