use crate::dirs::PoolyticsDirs;
use log::LevelFilter;
use std::env::{self, VarError};
use std::{path::PathBuf, str::FromStr};
use strum_macros::{Display, EnumString};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq)]
pub enum Env {
    #[strum(serialize = "dev")]
    Dev,

    #[strum(serialize = "uat")]
    Uat,

    #[strum(serialize = "prod")]
    Prod,
}

/// Settings every command needs: environment, logging and the store layout.
#[derive(Clone, Debug)]
pub struct Config {
    pub env: Env,

    pub log_level: LevelFilter,

    pub dirs: PoolyticsDirs,
}

/// Pool API endpoints, only required by the snapshot commands.
#[derive(Clone, Debug)]
pub struct PoolApiConfig {
    pub revenue_url: String,
    pub workers_url: String,
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: Vec<String>,
}

/// Everything `send-report` needs on top of [`Config`].
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    pub template_path: PathBuf,
    pub subject: String,
    pub organization: String,
    pub smtp: SmtpConfig,
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        Ok(_) | Err(VarError::NotPresent) => Err(Error::Missing(name)),
        Err(VarError::NotUnicode(v)) => Err(Error::Invalid {
            name,
            value: v.to_string_lossy().into_owned(),
        }),
    }
}

fn optional<F>(lookup: &F, name: &'static str) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match required(lookup, name) {
        Ok(v) => Ok(Some(v)),
        Err(Error::Missing(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
{
    match optional(lookup, name)? {
        Some(v) => v.trim().parse::<T>().map_err(|_| Error::Invalid { name, value: v }),
        None => Ok(default),
    }
}

/// Loads `.env` if one exists. A missing file is not an error, the process
/// environment may already carry everything.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        load_dotenv();
        Self::from_lookup(|k| env::var(k))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let env = parsed(&lookup, "ENV", Env::Dev)?;
        let log_level = parsed(&lookup, "LOG_LEVEL", LevelFilter::Info)?;

        let data_dir = PathBuf::from(required(&lookup, "DATA_DIR")?);
        let revenue_dir = required(&lookup, "REVENUE_DIR")?;
        let report_dir = required(&lookup, "REPORT_DIR")?;
        let hashrate_dir =
            optional(&lookup, "HASHRATE_DIR")?.unwrap_or_else(|| "hashrate".to_string());
        let log_dir = optional(&lookup, "LOG_DIR")?.map(PathBuf::from);

        let dirs = PoolyticsDirs::new(data_dir, &revenue_dir, &report_dir, &hashrate_dir, log_dir);

        Ok(Config {
            env,
            log_level,
            dirs,
        })
    }
}

impl PoolApiConfig {
    pub fn from_env() -> Result<Self, Error> {
        load_dotenv();
        Self::from_lookup(|k| env::var(k))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        Ok(PoolApiConfig {
            revenue_url: required(&lookup, "API_URL_BASE")?,
            workers_url: required(&lookup, "API_URL_WORKERS")?,
        })
    }
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self, Error> {
        load_dotenv();
        Self::from_lookup(|k| env::var(k))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let template_dir = PathBuf::from(required(&lookup, "TEMPLATE_DIR")?);
        let template_path = template_dir.join(required(&lookup, "TEMPLATE_FILE_NAME")?);

        let subject =
            optional(&lookup, "MSG_SUBJECT")?.unwrap_or_else(|| "Revenue report".to_string());
        let organization =
            optional(&lookup, "MSG_ORGANIZATION")?.unwrap_or_else(|| "Mining pool".to_string());

        let port_raw = required(&lookup, "SMTP_PORT")?;
        let port = port_raw.trim().parse::<u16>().map_err(|_| Error::Invalid {
            name: "SMTP_PORT",
            value: port_raw.clone(),
        })?;

        let to: Vec<String> = required(&lookup, "SMTP_TO")?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if to.is_empty() {
            return Err(Error::Missing("SMTP_TO"));
        }

        let smtp = SmtpConfig {
            host: required(&lookup, "SMTP_HOST")?,
            port,
            username: required(&lookup, "SMTP_USERNAME")?,
            password: required(&lookup, "SMTP_PASSWORD")?,
            from: required(&lookup, "SMTP_FROM")?,
            to,
        };

        Ok(NotifierConfig {
            template_path,
            subject,
            organization,
            smtp,
        })
    }
}
