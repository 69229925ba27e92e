use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::h2h::MatchLimit;
use crate::league::League;

pub const DEFAULT_API_BASE: &str = "https://v3.football.api-sports.io";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_API_LAST: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    #[default]
    Csv,
    Json,
    Api,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceKind::Csv),
            "json" => Ok(SourceKind::Json),
            "api" => Ok(SourceKind::Api),
            other => Err(format!("unknown data source {other:?}")),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Csv => "csv",
            SourceKind::Json => "json",
            SourceKind::Api => "api",
        })
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Fixtures requested per head-to-head call.
    pub last: u32,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: None,
            last: DEFAULT_API_LAST,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceKind,
    pub data_dir: PathBuf,
    pub league: League,
    pub limit: MatchLimit,
    pub sample_fallback: bool,
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            league: League::default(),
            limit: MatchLimit::All,
            sample_fallback: true,
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `H2H_*` variables. Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let source = env_parse("H2H_SOURCE").unwrap_or(defaults.source);
        let data_dir = env_string("H2H_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let league = env_parse("H2H_LEAGUE").unwrap_or(defaults.league);
        let limit = env_parse("H2H_MATCH_COUNT").unwrap_or(defaults.limit);
        let sample_fallback = env_bool("H2H_SAMPLE_FALLBACK", defaults.sample_fallback);

        let base_url = env_string("H2H_API_BASE")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api.base_url);
        let api_key = env_string("H2H_API_KEY");
        let last = env::var("H2H_API_LAST")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_API_LAST)
            .clamp(1, 50);
        let timeout_secs = env::var("H2H_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);

        Self {
            source,
            data_dir,
            league,
            limit,
            sample_fallback,
            api: ApiConfig {
                base_url,
                api_key,
                last,
                timeout: Duration::from_secs(timeout_secs),
            },
        }
    }
}

/// Loads `.env.local` first so it wins over `.env`.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|s| s.parse::<T>().ok())
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
