use std::collections::VecDeque;

use crate::config::AppConfig;
use crate::h2h::{MatchLimit, QueryError, TeamQuery};
use crate::league::League;
use crate::search::SearchOutcome;

pub const NO_MATCHES: &str = "No matches found between these teams";
pub const LIMIT_CHOICES: [MatchLimit; 4] = [
    MatchLimit::Last(5),
    MatchLimit::Last(10),
    MatchLimit::Last(20),
    MatchLimit::All,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TeamA,
    TeamB,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub team_a: String,
    pub team_b: String,
    pub focus: Field,
    pub league: League,
    pub limit: MatchLimit,
    pub loading: bool,
    pub latest_request: u64,
    pub outcome: Option<SearchOutcome>,
    pub error: Option<String>,
    pub scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

#[derive(Debug, Clone)]
pub enum SearchCommand {
    Run {
        request_id: u64,
        league: League,
        query: TeamQuery,
        limit: MatchLimit,
    },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SearchDone {
        request_id: u64,
        outcome: Box<SearchOutcome>,
    },
    SearchFailed {
        request_id: u64,
        error: String,
    },
    Log(String),
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            team_a: String::new(),
            team_b: String::new(),
            focus: Field::TeamA,
            league: cfg.league,
            limit: cfg.limit,
            loading: false,
            latest_request: 0,
            outcome: None,
            error: None,
            scroll: 0,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::TeamA => &mut self.team_a,
            Field::TeamB => &mut self.team_b,
        }
    }

    pub fn input_char(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::TeamA => Field::TeamB,
            Field::TeamB => Field::TeamA,
        };
    }

    pub fn swap_teams(&mut self) {
        std::mem::swap(&mut self.team_a, &mut self.team_b);
    }

    pub fn cycle_league(&mut self) {
        self.league = self.league.next();
    }

    pub fn cycle_limit(&mut self) {
        let idx = LIMIT_CHOICES
            .iter()
            .position(|l| *l == self.limit)
            .map(|i| (i + 1) % LIMIT_CHOICES.len())
            .unwrap_or(0);
        self.limit = LIMIT_CHOICES[idx];
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Validates the inputs and issues a new request id. Older in-flight
    /// results are ignored once a newer request exists.
    pub fn begin_search(&mut self) -> Result<SearchCommand, QueryError> {
        let query = match TeamQuery::new(&self.team_a, &self.team_b) {
            Ok(query) => query,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };
        self.latest_request += 1;
        self.loading = true;
        self.error = None;
        self.scroll = 0;
        Ok(SearchCommand::Run {
            request_id: self.latest_request,
            league: self.league,
            query,
            limit: self.limit,
        })
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SearchDone {
            request_id,
            outcome,
        } => {
            if request_id != state.latest_request {
                state.push_log(format!("[INFO] Dropped stale result #{request_id}"));
                return;
            }
            state.loading = false;
            state.scroll = 0;
            state.push_log(format!(
                "[INFO] {} matches from {}",
                outcome.result.total_matches(),
                outcome.origin
            ));
            if outcome.result.is_empty() {
                state.outcome = None;
                state.error = Some(NO_MATCHES.to_string());
            } else {
                state.outcome = Some(*outcome);
                state.error = None;
            }
        }
        Delta::SearchFailed { request_id, error } => {
            if request_id != state.latest_request {
                return;
            }
            state.loading = false;
            state.push_log(format!("[WARN] Search failed: {error}"));
            state.error = Some(format!("Error: {error}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
