//! API-Football (v3) compatible head-to-head source.

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::annotations::{CardRecord, CardSheet, InjuryRecord};
use crate::config::ApiConfig;
use crate::h2h::{MatchRecord, TeamQuery, team_matches};
use crate::http_client::{fetch_text, http_client};

const API_KEY_HEADER: &str = "x-apisports-key";

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    errors: Value,
    #[serde(default)]
    response: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiTeam {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    team: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    fixture: FixtureInfo,
    #[serde(default)]
    league: Option<LeagueInfo>,
    teams: FixtureTeams,
    #[serde(default)]
    goals: Option<FixtureGoals>,
}

#[derive(Debug, Deserialize)]
struct FixtureInfo {
    id: u64,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeagueInfo {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureTeams {
    home: ApiTeam,
    away: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct FixtureGoals {
    home: Option<u32>,
    away: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    team: NamedRef,
    #[serde(default)]
    player: NamedRef,
}

#[derive(Debug, Default, Deserialize)]
struct NamedRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InjuryEntry {
    player: InjuredPlayer,
    #[serde(default)]
    team: NamedRef,
}

#[derive(Debug, Deserialize)]
struct InjuredPlayer {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFixture {
    pub id: u64,
    pub record: MatchRecord,
}

#[derive(Debug, Clone, Default)]
pub struct ApiBundle {
    pub matches: Vec<MatchRecord>,
    pub cards: Vec<CardRecord>,
    pub injuries: Vec<InjuryRecord>,
}

fn parse_envelope<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let env: Envelope<T> =
        serde_json::from_str(trimmed).with_context(|| format!("invalid {what} json"))?;
    let has_errors = match &env.errors {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    };
    if has_errors {
        return Err(anyhow!("api error for {what}: {}", env.errors));
    }
    Ok(env.response)
}

pub fn parse_team_search_json(raw: &str) -> Result<Vec<ApiTeam>> {
    let entries: Vec<TeamEntry> = parse_envelope(raw, "team search")?;
    Ok(entries.into_iter().map(|e| e.team).collect())
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<ApiFixture>> {
    let entries: Vec<FixtureEntry> = parse_envelope(raw, "fixtures")?;
    Ok(entries
        .into_iter()
        .map(|e| {
            let (home_goals, away_goals) = e
                .goals
                .map(|g| (g.home.unwrap_or(0), g.away.unwrap_or(0)))
                .unwrap_or((0, 0));
            ApiFixture {
                id: e.fixture.id,
                record: MatchRecord::new(
                    e.fixture.date.as_deref().unwrap_or_default(),
                    e.teams.home.name,
                    e.teams.away.name,
                    home_goals,
                    away_goals,
                    e.league.and_then(|l| l.name),
                ),
            }
        })
        .collect())
}

/// Card events for one fixture. Second yellows count as reds.
pub fn parse_fixture_cards_json(raw: &str, fixture: &MatchRecord) -> Result<CardSheet> {
    let events: Vec<EventEntry> = parse_envelope(raw, "fixture events")?;
    let mut sheet = CardSheet::default();
    for event in events {
        if !event.kind.eq_ignore_ascii_case("card") {
            continue;
        }
        let Some(player) = event.player.name.filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        let home = event.team.name.as_deref() == Some(fixture.home_team.as_str());
        let detail = event.detail.to_ascii_lowercase();
        let red = detail.contains("red") || detail.contains("second yellow");
        let slot = match (home, red) {
            (true, false) => &mut sheet.home_yellow,
            (false, false) => &mut sheet.away_yellow,
            (true, true) => &mut sheet.home_red,
            (false, true) => &mut sheet.away_red,
        };
        slot.push(player);
    }
    Ok(sheet)
}

pub fn parse_injuries_response_json(raw: &str, fixture: &MatchRecord) -> Result<Vec<InjuryRecord>> {
    let entries: Vec<InjuryEntry> = parse_envelope(raw, "injuries")?;
    Ok(entries
        .into_iter()
        .filter_map(|e| {
            let player = e.player.name.filter(|n| !n.trim().is_empty())?;
            Some(InjuryRecord {
                date: fixture.date.raw.clone(),
                home_team: fixture.home_team.clone(),
                away_team: fixture.away_team.clone(),
                team: e.team.name.unwrap_or_default(),
                player,
                reason: e.player.reason,
            })
        })
        .collect())
}

/// Prefers an exact (case-insensitive) name, then the first containing name.
/// Names that do not contain the fragment are never picked: their fixtures
/// would be dropped by the head-to-head filter.
fn pick_team(candidates: Vec<ApiTeam>, name: &str) -> Option<ApiTeam> {
    if let Some(idx) = candidates
        .iter()
        .position(|t| t.name.eq_ignore_ascii_case(name))
    {
        return candidates.into_iter().nth(idx);
    }
    candidates.into_iter().find(|t| team_matches(&t.name, name))
}

pub struct ApiSource<'a> {
    client: &'a Client,
    cfg: &'a ApiConfig,
    api_key: &'a str,
}

impl<'a> ApiSource<'a> {
    pub fn new(client: &'a Client, cfg: &'a ApiConfig) -> Result<Self> {
        let Some(api_key) = cfg.api_key.as_deref() else {
            return Err(anyhow!("H2H_API_KEY missing"));
        };
        Ok(Self {
            client,
            cfg,
            api_key,
        })
    }

    fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let base = format!("{}/{}", self.cfg.base_url.trim_end_matches('/'), path);
        let url = Url::parse_with_params(&base, params)
            .with_context(|| format!("invalid api url {base}"))?;
        fetch_text(self.client, url.as_str(), &[(API_KEY_HEADER, self.api_key)])
    }

    pub fn search_team(&self, name: &str) -> Result<ApiTeam> {
        let body = self
            .get("teams", &[("search", name.to_string())])
            .context("team search request failed")?;
        let teams = parse_team_search_json(&body)?;
        let found = teams.len();
        pick_team(teams, name)
            .ok_or_else(|| anyhow!("no team matching {name:?} among {found} api results"))
    }

    pub fn head_to_head(&self, team_a: &ApiTeam, team_b: &ApiTeam) -> Result<Vec<ApiFixture>> {
        let body = self
            .get(
                "fixtures/headtohead",
                &[
                    ("h2h", format!("{}-{}", team_a.id, team_b.id)),
                    ("last", self.cfg.last.to_string()),
                ],
            )
            .context("head-to-head request failed")?;
        parse_fixtures_json(&body)
    }

    pub fn fixture_cards(&self, fixture: &ApiFixture) -> Result<CardSheet> {
        let body = self
            .get("fixtures/events", &[("fixture", fixture.id.to_string())])
            .context("fixture events request failed")?;
        parse_fixture_cards_json(&body, &fixture.record)
    }

    pub fn fixture_injuries(&self, fixture: &ApiFixture) -> Result<Vec<InjuryRecord>> {
        let body = self
            .get("injuries", &[("fixture", fixture.id.to_string())])
            .context("injuries request failed")?;
        parse_injuries_response_json(&body, &fixture.record)
    }
}

/// Resolves both teams, pulls their shared fixtures and decorates each with
/// cards and injuries. Annotation failures are logged and skipped.
pub fn load_from_api(cfg: &ApiConfig, query: &TeamQuery) -> Result<ApiBundle> {
    let client = http_client(cfg.timeout)?;
    let api = ApiSource::new(client, cfg)?;

    let team_a = api.search_team(query.team_a())?;
    let team_b = api.search_team(query.team_b())?;
    info!(a = %team_a.name, b = %team_b.name, "resolved api teams");

    let fixtures = api.head_to_head(&team_a, &team_b)?;
    let mut bundle = ApiBundle::default();
    for fixture in fixtures {
        match api.fixture_cards(&fixture) {
            Ok(cards) if !cards.is_empty() => bundle.cards.push(CardRecord {
                date: fixture.record.date.raw.clone(),
                home_team: fixture.record.home_team.clone(),
                away_team: fixture.record.away_team.clone(),
                cards,
            }),
            Ok(_) => {}
            Err(err) => warn!(fixture = fixture.id, "cards unavailable: {err:#}"),
        }
        match api.fixture_injuries(&fixture) {
            Ok(injuries) => bundle.injuries.extend(injuries),
            Err(err) => warn!(fixture = fixture.id, "injuries unavailable: {err:#}"),
        }
        bundle.matches.push(fixture.record);
    }
    debug!(count = bundle.matches.len(), "loaded api fixtures");
    Ok(bundle)
}
