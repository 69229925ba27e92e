use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::config::AppConfig;
use crate::search;
use crate::state::{Delta, SearchCommand};

/// Runs searches off the UI thread. Commands queued behind a newer one are
/// skipped, so only the latest request does any loading.
pub fn spawn_search_worker(
    cfg: AppConfig,
    tx: Sender<Delta>,
    cmd_rx: Receiver<SearchCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(mut cmd) = cmd_rx.recv() {
            while let Ok(newer) = cmd_rx.try_recv() {
                cmd = newer;
            }

            let SearchCommand::Run {
                request_id,
                league,
                query,
                limit,
            } = cmd;
            let delta = match search::run_search(&cfg, league, &query, limit) {
                Ok(outcome) => Delta::SearchDone {
                    request_id,
                    outcome: Box::new(outcome),
                },
                Err(err) => Delta::SearchFailed {
                    request_id,
                    error: format!("{err:#}"),
                },
            };
            if tx.send(delta).is_err() {
                break;
            }
        }
    })
}
