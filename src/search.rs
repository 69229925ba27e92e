use anyhow::Result;
use tracing::info;

use crate::annotations::Annotations;
use crate::config::AppConfig;
use crate::h2h::{self, HeadToHeadResult, MatchLimit, TeamQuery};
use crate::league::League;
use crate::loader::{self, DataOrigin, DataSet};

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: HeadToHeadResult,
    pub annotations: Annotations,
    pub origin: DataOrigin,
}

pub fn search_dataset(data: DataSet, query: &TeamQuery, limit: MatchLimit) -> SearchOutcome {
    let result = h2h::head_to_head(&data.matches, query, limit);
    SearchOutcome {
        result,
        annotations: Annotations::new(data.cards, data.injuries),
        origin: data.origin,
    }
}

pub fn run_search(
    cfg: &AppConfig,
    league: League,
    query: &TeamQuery,
    limit: MatchLimit,
) -> Result<SearchOutcome> {
    let data = loader::load_dataset(cfg, league, query)?;
    let outcome = search_dataset(data, query, limit);
    info!(
        a = query.team_a(),
        b = query.team_b(),
        league = league.key(),
        found = outcome.result.total_matches(),
        "search complete"
    );
    Ok(outcome)
}
