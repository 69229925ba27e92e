use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use crate::annotations::{CardRecord, InjuryRecord};
use crate::api_source;
use crate::config::{AppConfig, SourceKind};
use crate::csv_source;
use crate::h2h::{MatchRecord, TeamQuery};
use crate::json_source;
use crate::league::League;
use crate::sample;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Csv(PathBuf),
    Json(PathBuf),
    Api,
    Sample,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Csv(path) => write!(f, "csv {}", path.display()),
            DataOrigin::Json(dir) => write!(f, "json {}", dir.display()),
            DataOrigin::Api => f.write_str("api"),
            DataOrigin::Sample => f.write_str("sample data"),
        }
    }
}

/// Everything one search needs, already normalized into match records.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub matches: Vec<MatchRecord>,
    pub cards: Vec<CardRecord>,
    pub injuries: Vec<InjuryRecord>,
    pub origin: DataOrigin,
}

pub fn sample_dataset() -> DataSet {
    DataSet {
        matches: sample::sample_matches(),
        cards: sample::sample_cards(),
        injuries: Vec::new(),
        origin: DataOrigin::Sample,
    }
}

fn load_from_source(cfg: &AppConfig, league: League, query: &TeamQuery) -> Result<DataSet> {
    match cfg.source {
        SourceKind::Csv => {
            let matches = csv_source::load_league_csv(&cfg.data_dir, league)?;
            Ok(DataSet {
                matches,
                cards: Vec::new(),
                injuries: Vec::new(),
                origin: DataOrigin::Csv(league.csv_path(&cfg.data_dir)),
            })
        }
        SourceKind::Json => {
            let bundle = json_source::load_json_dir(&cfg.data_dir)?;
            Ok(DataSet {
                matches: bundle.matches,
                cards: bundle.cards,
                injuries: bundle.injuries,
                origin: DataOrigin::Json(cfg.data_dir.clone()),
            })
        }
        SourceKind::Api => {
            let bundle = api_source::load_from_api(&cfg.api, query)?;
            Ok(DataSet {
                matches: bundle.matches,
                cards: bundle.cards,
                injuries: bundle.injuries,
                origin: DataOrigin::Api,
            })
        }
    }
}

/// Loads from the configured source. When that fails and sample fallback is
/// enabled, the built-in sample set is returned instead of the error.
pub fn load_dataset(cfg: &AppConfig, league: League, query: &TeamQuery) -> Result<DataSet> {
    match load_from_source(cfg, league, query) {
        Ok(data) => {
            info!(origin = %data.origin, matches = data.matches.len(), "data loaded");
            Ok(data)
        }
        Err(err) if cfg.sample_fallback => {
            warn!(source = %cfg.source, "{err:#}; using sample data");
            Ok(sample_dataset())
        }
        Err(err) => Err(err),
    }
}
