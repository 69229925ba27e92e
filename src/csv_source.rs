use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::h2h::{MatchRecord, UNKNOWN_DATE};
use crate::league::League;

/// Column positions resolved from the header row by substring match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: Option<usize>,
    home: usize,
    away: usize,
    score: Option<usize>,
    // football-data.co.uk style split full-time goals
    home_goals: Option<usize>,
    away_goals: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |pred: fn(&str) -> bool| headers.iter().position(pred);

        let home = find(|h| h.contains("Home") || h.contains("Team 1"))
            .ok_or_else(|| anyhow!("csv header has no home team column"))?;
        let away = find(|h| h.contains("Away") || h.contains("Team 2"))
            .ok_or_else(|| anyhow!("csv header has no away team column"))?;

        Ok(Self {
            date: find(|h| h.contains("Date")),
            home,
            away,
            score: find(|h| h.contains("FT") || h.contains("Score")),
            home_goals: find(|h| h == "FTHG"),
            away_goals: find(|h| h == "FTAG"),
        })
    }

    fn goals(&self, row: &StringRecord) -> (u32, u32) {
        if let (Some(h), Some(a)) = (self.home_goals, self.away_goals) {
            let parse = |idx: usize| row.get(idx).and_then(|s| s.parse::<u32>().ok());
            if let (Some(home), Some(away)) = (parse(h), parse(a)) {
                return (home, away);
            }
        }
        self.score
            .and_then(|idx| row.get(idx))
            .and_then(parse_score_pair)
            .unwrap_or((0, 0))
    }
}

/// Parses a header-led table of fixtures. Every row is labelled with
/// `competition`; rows without both team names are skipped.
pub fn parse_matches_csv(text: &str, competition: &str) -> Result<Vec<MatchRecord>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers().context("invalid csv header")?.clone();
    let columns = Columns::locate(&headers)?;
    debug!(?columns, "csv columns");

    let mut out = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(line = idx + 2, %err, "skipping malformed csv row");
                continue;
            }
        };
        let home = row.get(columns.home).unwrap_or_default();
        let away = row.get(columns.away).unwrap_or_default();
        if home.is_empty() || away.is_empty() {
            continue;
        }
        let date = columns
            .date
            .and_then(|i| row.get(i))
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_DATE);
        let (home_goals, away_goals) = columns.goals(&row);

        out.push(MatchRecord::new(
            date,
            home,
            away,
            home_goals,
            away_goals,
            Some(competition.to_string()),
        ));
    }
    Ok(out)
}

pub fn load_league_csv(data_dir: &Path, league: League) -> Result<Vec<MatchRecord>> {
    let path = league.csv_path(data_dir);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let matches = parse_matches_csv(&raw, league.label())
        .with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), count = matches.len(), "loaded csv fixtures");
    Ok(matches)
}

/// First two digit runs of a score cell, e.g. `"2-1"` or `"2 : 1"`.
fn parse_score_pair(raw: &str) -> Option<(u32, u32)> {
    let mut nums = raw
        .split(|ch: char| !ch.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u32>().ok());
    let home = nums.next()?;
    let away = nums.next()?;
    Some((home, away))
}
