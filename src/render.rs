//! Plain-text rendering of head-to-head results.

use crate::annotations::{Annotations, CardSheet, InjuryRecord};
use crate::h2h::{HeadToHeadResult, MatchDate, MatchRecord};

/// `M/D/YYYY` for parsed dates, the raw text otherwise.
pub fn format_date(date: &MatchDate) -> String {
    match date.day {
        Some(day) => day.format("%-m/%-d/%Y").to_string(),
        None => date.raw.clone(),
    }
}

pub fn stats_lines(result: &HeadToHeadResult) -> Vec<(String, u32)> {
    let s = &result.stats;
    vec![
        (format!("{} Wins", result.team_a), s.team_a.wins),
        ("Draws".to_string(), s.draws()),
        (format!("{} Wins", result.team_b), s.team_b.wins),
        ("Total Goals".to_string(), s.total_goals()),
        (format!("{} Goals", result.team_a), s.team_a.goals_for),
        (format!("{} Goals", result.team_b), s.team_b.goals_for),
    ]
}

/// Yellow cards before red, home before away.
pub fn card_labels(cards: &CardSheet) -> Vec<String> {
    let yellow = cards
        .home_yellow
        .iter()
        .chain(&cards.away_yellow)
        .map(|p| format!("[Y] {p}"));
    let red = cards
        .home_red
        .iter()
        .chain(&cards.away_red)
        .map(|p| format!("[R] {p}"));
    yellow.chain(red).collect()
}

pub fn injury_label(injury: &InjuryRecord) -> String {
    match injury.reason.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(reason) => format!("{} ({}): {}", injury.player, injury.team, reason),
        None => format!("{} ({})", injury.player, injury.team),
    }
}

pub fn match_headline(m: &MatchRecord) -> String {
    format!(
        "{}  {} {} {}",
        format_date(&m.date),
        m.home_team,
        m.score_label(),
        m.away_team
    )
}

/// Statistics block followed by one block per match, newline-terminated.
pub fn render_report(result: &HeadToHeadResult, annotations: &Annotations) -> String {
    let mut lines = vec![
        format!("Head-to-head: {} vs {}", result.team_a, result.team_b),
        format!("Matches: {}", result.total_matches()),
        String::new(),
        "Statistics".to_string(),
    ];
    lines.extend(
        stats_lines(result)
            .into_iter()
            .map(|(label, value)| format!("  {label:<28} {value:>4}")),
    );

    lines.push(String::new());
    lines.push("Matches".to_string());
    for m in &result.matches {
        lines.push(format!("  {}", match_headline(m)));
        lines.push(format!("    Competition: {}", m.competition));

        let cards = card_labels(&annotations.cards_for(m));
        if !cards.is_empty() {
            lines.push(format!("    Cards: {}", cards.join(", ")));
        }
        let injuries = annotations.injuries_for(m);
        if !injuries.is_empty() {
            let labels: Vec<String> = injuries.iter().map(injury_label).collect();
            lines.push(format!("    Injuries: {}", labels.join(", ")));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
