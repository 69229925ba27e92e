//! Per-match card and injury annotations, joined to fixtures by exact
//! `(date, home team, away team)` text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::h2h::MatchRecord;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
}

impl MatchKey {
    pub fn new(date: &str, home_team: &str, away_team: &str) -> Self {
        Self {
            date: date.trim().to_string(),
            home_team: home_team.trim().to_string(),
            away_team: away_team.trim().to_string(),
        }
    }

    pub fn for_match(m: &MatchRecord) -> Self {
        Self::new(&m.date.raw, &m.home_team, &m.away_team)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSheet {
    #[serde(default)]
    pub home_yellow: Vec<String>,
    #[serde(default)]
    pub away_yellow: Vec<String>,
    #[serde(default)]
    pub home_red: Vec<String>,
    #[serde(default)]
    pub away_red: Vec<String>,
}

impl CardSheet {
    pub fn is_empty(&self) -> bool {
        self.home_yellow.is_empty()
            && self.away_yellow.is_empty()
            && self.home_red.is_empty()
            && self.away_red.is_empty()
    }

    pub fn yellow_count(&self) -> usize {
        self.home_yellow.len() + self.away_yellow.len()
    }

    pub fn red_count(&self) -> usize {
        self.home_red.len() + self.away_red.len()
    }

    fn merge(&mut self, other: CardSheet) {
        self.home_yellow.extend(other.home_yellow);
        self.away_yellow.extend(other.away_yellow);
        self.home_red.extend(other.home_red);
        self.away_red.extend(other.away_red);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(flatten)]
    pub cards: CardSheet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub team: String,
    pub player: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Annotations {
    cards: HashMap<MatchKey, CardSheet>,
    injuries: HashMap<MatchKey, Vec<InjuryRecord>>,
}

impl Annotations {
    pub fn new(cards: Vec<CardRecord>, injuries: Vec<InjuryRecord>) -> Self {
        let mut out = Self::default();
        for record in cards {
            let key = MatchKey::new(&record.date, &record.home_team, &record.away_team);
            out.cards.entry(key).or_default().merge(record.cards);
        }
        for record in injuries {
            let key = MatchKey::new(&record.date, &record.home_team, &record.away_team);
            out.injuries.entry(key).or_default().push(record);
        }
        out
    }

    /// Card sheet for a fixture; an empty sheet when none was recorded.
    pub fn cards_for(&self, m: &MatchRecord) -> CardSheet {
        self.cards
            .get(&MatchKey::for_match(m))
            .cloned()
            .unwrap_or_default()
    }

    pub fn injuries_for(&self, m: &MatchRecord) -> &[InjuryRecord] {
        self.injuries
            .get(&MatchKey::for_match(m))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.injuries.is_empty()
    }
}
