use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::annotations::{CardRecord, InjuryRecord};
use crate::h2h::{MatchRecord, UNKNOWN_DATE};

pub const MATCHES_FILE: &str = "matches.json";
pub const CARDS_FILE: &str = "cards.json";
pub const INJURIES_FILE: &str = "injuries.json";

#[derive(Debug, Deserialize)]
struct JsonMatch {
    #[serde(default)]
    date: Option<String>,
    home_team: String,
    away_team: String,
    #[serde(default)]
    home_score: Value,
    #[serde(default)]
    away_score: Value,
    #[serde(default)]
    competition: Option<String>,
}

impl From<JsonMatch> for MatchRecord {
    fn from(raw: JsonMatch) -> Self {
        MatchRecord::new(
            raw.date.as_deref().unwrap_or(UNKNOWN_DATE),
            raw.home_team.trim(),
            raw.away_team.trim(),
            score_value(&raw.home_score),
            score_value(&raw.away_score),
            raw.competition,
        )
    }
}

/// Goals may arrive as a number, a numeric string or null; anything else is 0.
fn score_value(v: &Value) -> u32 {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

fn parse_list<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).with_context(|| format!("invalid {what} json"))
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let rows: Vec<JsonMatch> = parse_list(raw, "matches")?;
    Ok(rows.into_iter().map(MatchRecord::from).collect())
}

pub fn parse_cards_json(raw: &str) -> Result<Vec<CardRecord>> {
    parse_list(raw, "cards")
}

pub fn parse_injuries_json(raw: &str) -> Result<Vec<InjuryRecord>> {
    parse_list(raw, "injuries")
}

#[derive(Debug, Clone, Default)]
pub struct JsonBundle {
    pub matches: Vec<MatchRecord>,
    pub cards: Vec<CardRecord>,
    pub injuries: Vec<InjuryRecord>,
}

/// `matches.json` must exist; the card and injury files are optional.
pub fn load_json_dir(dir: &Path) -> Result<JsonBundle> {
    let matches_path = dir.join(MATCHES_FILE);
    let raw = fs::read_to_string(&matches_path)
        .with_context(|| format!("failed to read {}", matches_path.display()))?;
    let matches = parse_matches_json(&raw)?;

    let cards = match read_optional(&dir.join(CARDS_FILE))? {
        Some(raw) => parse_cards_json(&raw)?,
        None => Vec::new(),
    };
    let injuries = match read_optional(&dir.join(INJURIES_FILE))? {
        Some(raw) => parse_injuries_json(&raw)?,
        None => Vec::new(),
    };

    debug!(
        dir = %dir.display(),
        matches = matches.len(),
        cards = cards.len(),
        injuries = injuries.len(),
        "loaded json data"
    );
    Ok(JsonBundle {
        matches,
        cards,
        injuries,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
