//! Built-in fixtures used when no data source can be read.

use crate::annotations::{CardRecord, CardSheet};
use crate::h2h::MatchRecord;

pub fn sample_matches() -> Vec<MatchRecord> {
    [
        ("2024-04-21", "Real Madrid", "Barcelona", 3, 2, "La Liga"),
        ("2024-01-14", "Barcelona", "Real Madrid", 1, 4, "Super Cup"),
        ("2023-10-28", "Barcelona", "Real Madrid", 1, 2, "La Liga"),
        ("2023-03-19", "Barcelona", "Real Madrid", 2, 1, "La Liga"),
        ("2023-03-02", "Real Madrid", "Barcelona", 0, 1, "Copa del Rey"),
    ]
    .into_iter()
    .map(|(date, home, away, hg, ag, comp)| {
        MatchRecord::new(date, home, away, hg, ag, Some(comp.to_string()))
    })
    .collect()
}

pub fn sample_cards() -> Vec<CardRecord> {
    let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let card = |date: &str, home: &str, away: &str, hy: &[&str], ay: &[&str]| CardRecord {
        date: date.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        cards: CardSheet {
            home_yellow: names(hy),
            away_yellow: names(ay),
            home_red: Vec::new(),
            away_red: Vec::new(),
        },
    };

    vec![
        card(
            "2024-04-21",
            "Real Madrid",
            "Barcelona",
            &["Vinicius Jr.", "Modric"],
            &["Pedri"],
        ),
        card(
            "2024-01-14",
            "Barcelona",
            "Real Madrid",
            &["Lewandowski", "Araujo"],
            &["Carvajal"],
        ),
        card(
            "2023-10-28",
            "Barcelona",
            "Real Madrid",
            &["Gavi"],
            &["Kroos", "Rüdiger"],
        ),
    ]
}
