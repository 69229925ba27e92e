use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use h2h_terminal::config::{self, AppConfig, SourceKind};
use h2h_terminal::h2h::{MatchLimit, TeamQuery};
use h2h_terminal::league::League;
use h2h_terminal::render;
use h2h_terminal::search;
use h2h_terminal::state::NO_MATCHES;

#[derive(Debug, clap::Parser, Clone)]
#[command(about = "Head-to-head match history between two football teams")]
struct Args {
    /// first team (any part of the name, case-insensitive)
    team_a: String,

    /// second team
    team_b: String,

    /// league: espana, england or champions
    #[clap(short = 'l', long)]
    league: Option<League>,

    /// number of most recent matches to show, or "all"
    #[clap(short = 'n', long = "count")]
    count: Option<MatchLimit>,

    /// data source: csv, json or api
    #[clap(short = 's', long)]
    source: Option<SourceKind>,

    /// directory holding the csv/json data
    #[clap(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// fail instead of falling back to the built-in sample data
    #[clap(long)]
    no_fallback: bool,
}

impl Args {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(league) = self.league {
            cfg.league = league;
        }
        if let Some(count) = self.count {
            cfg.limit = count;
        }
        if let Some(source) = self.source {
            cfg.source = source;
        }
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        if self.no_fallback {
            cfg.sample_fallback = false;
        }
    }
}

fn main() -> Result<ExitCode> {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!("args: {args:?}");
    let mut cfg = AppConfig::from_env();
    args.apply(&mut cfg);

    let query = TeamQuery::new(&args.team_a, &args.team_b)?;
    let outcome = search::run_search(&cfg, cfg.league, &query, cfg.limit)?;
    if outcome.result.is_empty() {
        eprintln!("{NO_MATCHES}");
        return Ok(ExitCode::FAILURE);
    }

    print!("{}", render::render_report(&outcome.result, &outcome.annotations));
    println!();
    println!("Source: {}", outcome.origin);
    Ok(ExitCode::SUCCESS)
}
