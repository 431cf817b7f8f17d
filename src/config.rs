//! Settings resolution.
//!
//! Each value is taken from the first source that provides it: command-line
//! flag, environment variable, `<config_dir>/poeprice/config.json`, built-in
//! default.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{client::API_URL, runtime::Runtime};

pub const DEFAULT_LEAGUE: &str = "Standard";
pub const LEAGUE_ENV: &str = "POEPRICE_LEAGUE";
pub const API_URL_ENV: &str = "POEPRICE_API_URL";

/// On-disk config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    league: Option<String>,
    api_url: Option<String>,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env(&'static str),
    File(PathBuf),
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Flag => write!(f, "command line"),
            Source::Env(name) => write!(f, "environment ({})", name),
            Source::File(path) => write!(f, "config file ({})", path.display()),
            Source::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub league: Resolved,
    pub api_url: Resolved,
}

impl Settings {
    #[tracing::instrument(skip(runtime))]
    pub fn resolve<R: Runtime>(
        runtime: &R,
        league: Option<String>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let (file, file_path) = match config_file_path(runtime) {
            Some(path) if runtime.exists(&path) => {
                debug!("Loading config from {:?}", path);
                (load_config_file(runtime, &path)?, Some(path))
            }
            _ => (ConfigFile::default(), None),
        };

        let league = pick(
            runtime,
            league,
            LEAGUE_ENV,
            file.league,
            file_path.as_ref(),
            DEFAULT_LEAGUE,
        );
        let api_url = pick(
            runtime,
            api_url,
            API_URL_ENV,
            file.api_url,
            file_path.as_ref(),
            API_URL,
        );

        debug!("Resolved league {:?} from {}", league.value, league.source);
        Ok(Self { league, api_url })
    }
}

/// `<config_dir>/poeprice/config.json`, if the platform has a config dir.
pub fn config_file_path<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    runtime
        .config_dir()
        .map(|dir| dir.join("poeprice").join("config.json"))
}

fn load_config_file<R: Runtime>(runtime: &R, path: &Path) -> Result<ConfigFile> {
    let content = runtime.read_to_string(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn pick<R: Runtime>(
    runtime: &R,
    flag: Option<String>,
    env_name: &'static str,
    file_value: Option<String>,
    file_path: Option<&PathBuf>,
    default: &str,
) -> Resolved {
    // Blank values anywhere count as unset
    let present = |v: &String| !v.trim().is_empty();

    if let Some(value) = flag.filter(present) {
        return Resolved {
            value,
            source: Source::Flag,
        };
    }
    if let Some(value) = runtime.env_var(env_name).ok().filter(present) {
        return Resolved {
            value,
            source: Source::Env(env_name),
        };
    }
    if let (Some(value), Some(path)) = (file_value.filter(present), file_path) {
        return Resolved {
            value,
            source: Source::File(path.clone()),
        };
    }
    Resolved {
        value: default.to_string(),
        source: Source::Default,
    }
}
