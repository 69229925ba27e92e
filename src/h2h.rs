//! Head-to-head filtering and statistics over a snapshot of match records.
//!
//! Team matching is case-insensitive substring containment, so a query of
//! `"barcelona"` selects `"FC Barcelona"`. Two distinct clubs that share a
//! fragment (say `"United"`) both match; nothing here tries to disambiguate.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

pub const UNKNOWN_COMPETITION: &str = "Unknown";
pub const UNKNOWN_DATE: &str = "Unknown date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDate {
    pub raw: String,
    pub day: Option<NaiveDate>,
}

impl MatchDate {
    /// Keeps the text as supplied and extracts a calendar day when the text is
    /// one of the formats the data sources use.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::unknown();
        }
        Self {
            raw: raw.to_string(),
            day: parse_day(raw),
        }
    }

    pub fn unknown() -> Self {
        Self {
            raw: UNKNOWN_DATE.to_string(),
            day: None,
        }
    }
}

impl fmt::Display for MatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%a %b %d %Y",
        "%a %b %e %Y",
        "%d/%m/%y",
        "%d/%m/%Y",
        "%d.%m.%Y",
        "%b %d %Y",
    ];

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in FORMATS {
        if let Ok(day) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(day);
        }
    }
    // "2024-04-21T20:00" and friends: fall back to the leading date part.
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: MatchDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub competition: String,
}

impl MatchRecord {
    pub fn new(
        date: &str,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u32,
        away_goals: u32,
        competition: Option<String>,
    ) -> Self {
        let competition = competition
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_COMPETITION.to_string());
        Self {
            date: MatchDate::parse(date),
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
            competition,
        }
    }

    pub fn score_label(&self) -> String {
        format!("{}-{}", self.home_goals, self.away_goals)
    }

    pub fn total_goals(&self) -> u32 {
        self.home_goals.saturating_add(self.away_goals)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("please enter both teams")]
    EmptyTeam,
}

/// Two trimmed, non-empty team name fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamQuery {
    team_a: String,
    team_b: String,
}

impl TeamQuery {
    pub fn new(team_a: &str, team_b: &str) -> Result<Self, QueryError> {
        let team_a = team_a.trim();
        let team_b = team_b.trim();
        if team_a.is_empty() || team_b.is_empty() {
            return Err(QueryError::EmptyTeam);
        }
        Ok(Self {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
        })
    }

    pub fn team_a(&self) -> &str {
        &self.team_a
    }

    pub fn team_b(&self) -> &str {
        &self.team_b
    }

    pub fn swapped(&self) -> Self {
        Self {
            team_a: self.team_b.clone(),
            team_b: self.team_a.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchLimit {
    #[default]
    All,
    Last(usize),
}

impl MatchLimit {
    pub fn apply<T>(self, items: &mut Vec<T>) {
        if let MatchLimit::Last(n) = self {
            items.truncate(n);
        }
    }
}

impl FromStr for MatchLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MatchLimit::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(MatchLimit::Last(n)),
            _ => Err(format!("invalid match count {s:?} (expected a positive number or \"all\")")),
        }
    }
}

impl fmt::Display for MatchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLimit::All => f.write_str("all"),
            MatchLimit::Last(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamStats {
    pub wins: u32,
    pub draws: u32,
    pub goals_for: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadToHeadStats {
    pub team_a: TeamStats,
    pub team_b: TeamStats,
    pub total_matches: usize,
}

impl HeadToHeadStats {
    pub fn draws(&self) -> u32 {
        self.team_a.draws
    }

    pub fn losses_a(&self) -> u32 {
        self.team_b.wins
    }

    pub fn losses_b(&self) -> u32 {
        self.team_a.wins
    }

    pub fn goals_against_a(&self) -> u32 {
        self.team_b.goals_for
    }

    pub fn goals_against_b(&self) -> u32 {
        self.team_a.goals_for
    }

    pub fn total_goals(&self) -> u32 {
        self.team_a.goals_for.saturating_add(self.team_b.goals_for)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHeadResult {
    pub team_a: String,
    pub team_b: String,
    pub matches: Vec<MatchRecord>,
    pub stats: HeadToHeadStats,
}

impl HeadToHeadResult {
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Case-insensitive containment test used for every team comparison.
pub fn team_matches(name: &str, fragment: &str) -> bool {
    contains_folded(name, &fragment.to_lowercase())
}

// `folded` is already lowercased; the aggregator folds each fragment once
// per query instead of once per record.
fn contains_folded(name: &str, folded: &str) -> bool {
    name.to_lowercase().contains(folded)
}

pub fn filter_head_to_head(
    matches: &[MatchRecord],
    team_a: &str,
    team_b: &str,
) -> Vec<MatchRecord> {
    let a = team_a.to_lowercase();
    let b = team_b.to_lowercase();

    let mut out: Vec<MatchRecord> = matches
        .iter()
        .filter(|m| {
            let (home, away) = (m.home_team.as_str(), m.away_team.as_str());
            (contains_folded(home, &a) && contains_folded(away, &b))
                || (contains_folded(home, &b) && contains_folded(away, &a))
        })
        .cloned()
        .collect();

    // sort_by is stable, so same-day fixtures keep their input order.
    out.sort_by(|x, y| newest_first(x.date.day, y.date.day));
    out
}

fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Only `team_a` decides orientation; a record that does not name A in the
/// home slot counts A as the away side.
pub fn compute_stats(matches: &[MatchRecord], team_a: &str, _team_b: &str) -> HeadToHeadStats {
    let a = team_a.to_lowercase();

    let mut stats = HeadToHeadStats {
        total_matches: matches.len(),
        ..HeadToHeadStats::default()
    };
    let mut draws = 0u32;

    for m in matches {
        let a_is_home = contains_folded(&m.home_team, &a);
        let (home, away) = if a_is_home {
            (&mut stats.team_a, &mut stats.team_b)
        } else {
            (&mut stats.team_b, &mut stats.team_a)
        };

        match m.home_goals.cmp(&m.away_goals) {
            Ordering::Greater => home.wins += 1,
            Ordering::Less => away.wins += 1,
            Ordering::Equal => draws += 1,
        }
        // Source scores are unbounded; tallies saturate at u32::MAX.
        home.goals_for = home.goals_for.saturating_add(m.home_goals);
        away.goals_for = away.goals_for.saturating_add(m.away_goals);
    }

    stats.team_a.draws = draws;
    stats.team_b.draws = draws;
    stats
}

pub fn head_to_head(
    matches: &[MatchRecord],
    query: &TeamQuery,
    limit: MatchLimit,
) -> HeadToHeadResult {
    let mut selected = filter_head_to_head(matches, query.team_a(), query.team_b());
    limit.apply(&mut selected);
    let stats = compute_stats(&selected, query.team_a(), query.team_b());
    HeadToHeadResult {
        team_a: query.team_a().to_string(),
        team_b: query.team_b().to_string(),
        matches: selected,
        stats,
    }
}
