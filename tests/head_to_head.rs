use h2h_terminal::h2h::{
    MatchLimit, MatchRecord, QueryError, TeamQuery, compute_stats, filter_head_to_head,
    head_to_head, team_matches,
};

fn rec(date: &str, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
    MatchRecord::new(date, home, away, hg, ag, Some("La Liga".to_string()))
}

fn clasico_history() -> Vec<MatchRecord> {
    vec![
        rec("2023-03-19", "Barcelona", "Real Madrid", 2, 1),
        rec("2024-04-21", "Real Madrid", "Barcelona", 3, 2),
        rec("2023-10-28", "Barcelona", "Real Madrid", 1, 2),
        rec("2023-11-05", "Real Madrid", "Rayo Vallecano", 0, 0),
        rec("2024-01-14", "Barcelona", "Real Madrid", 1, 4),
        rec("2023-03-02", "Real Madrid", "Barcelona", 0, 1),
        rec("2023-09-02", "Barcelona", "Osasuna", 2, 2),
    ]
}

#[test]
fn single_match_stats_for_home_winner() {
    let matches = vec![rec("2024-04-21", "Real Madrid", "Barcelona", 3, 2)];
    let filtered = filter_head_to_head(&matches, "Real Madrid", "Barcelona");
    assert_eq!(filtered.len(), 1);

    let stats = compute_stats(&filtered, "Real Madrid", "Barcelona");
    assert_eq!(stats.team_a.wins, 1);
    assert_eq!(stats.team_b.wins, 0);
    assert_eq!(stats.draws(), 0);
    assert_eq!(stats.team_a.goals_for, 3);
    assert_eq!(stats.team_b.goals_for, 2);
    assert_eq!(stats.total_matches, 1);
}

#[test]
fn swapped_query_mirrors_stats() {
    let matches = vec![rec("2024-04-21", "Real Madrid", "Barcelona", 3, 2)];
    let filtered = filter_head_to_head(&matches, "Barcelona", "Real Madrid");
    let stats = compute_stats(&filtered, "Barcelona", "Real Madrid");
    assert_eq!(stats.team_a.wins, 0);
    assert_eq!(stats.team_b.wins, 1);
    assert_eq!(stats.team_a.goals_for, 2);
    assert_eq!(stats.team_b.goals_for, 3);
}

#[test]
fn draw_counts_once_and_leaves_wins_alone() {
    let matches = vec![
        rec("2024-04-21", "Real Madrid", "Barcelona", 3, 2),
        rec("2023-10-28", "Barcelona", "Real Madrid", 2, 2),
    ];
    let filtered = filter_head_to_head(&matches, "Real Madrid", "Barcelona");
    let stats = compute_stats(&filtered, "Real Madrid", "Barcelona");
    assert_eq!(stats.draws(), 1);
    assert_eq!(stats.team_a.draws, stats.team_b.draws);
    assert_eq!(stats.team_a.wins, 1);
    assert_eq!(stats.team_b.wins, 0);
}

#[test]
fn no_shared_matches_is_empty_not_error() {
    let matches = clasico_history();
    let query = TeamQuery::new("Valencia", "Sevilla").expect("valid query");
    let result = head_to_head(&matches, &query, MatchLimit::All);
    assert!(result.is_empty());
    assert_eq!(result.stats.team_a.wins, 0);
    assert_eq!(result.stats.team_b.wins, 0);
    assert_eq!(result.stats.draws(), 0);
    assert_eq!(result.stats.total_goals(), 0);
    assert_eq!(result.stats.total_matches, 0);
}

#[test]
fn partial_case_insensitive_match() {
    let matches = vec![rec("2024-04-21", "Real Madrid CF", "FC Barcelona", 3, 2)];
    let filtered = filter_head_to_head(&matches, "real madrid", "barcelona");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].away_team, "FC Barcelona");
}

#[test]
fn filter_is_symmetric_and_sorted_newest_first() {
    let matches = clasico_history();
    let ab = filter_head_to_head(&matches, "Real Madrid", "Barcelona");
    let ba = filter_head_to_head(&matches, "Barcelona", "Real Madrid");
    assert_eq!(ab, ba);

    let dates: Vec<&str> = ab.iter().map(|m| m.date.raw.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "2024-04-21",
            "2024-01-14",
            "2023-10-28",
            "2023-03-19",
            "2023-03-02"
        ]
    );
}

#[test]
fn same_day_fixtures_keep_input_order() {
    let matches = vec![
        rec("2023-05-01", "Alpha", "Beta", 1, 0),
        rec("2023-05-01", "Beta", "Alpha", 0, 3),
        rec("2024-05-01", "Alpha", "Beta", 2, 2),
        rec("2023-05-01", "Alpha", "Beta", 5, 5),
    ];
    let filtered = filter_head_to_head(&matches, "Alpha", "Beta");
    let scores: Vec<String> = filtered.iter().map(MatchRecord::score_label).collect();
    assert_eq!(scores, vec!["2-2", "1-0", "0-3", "5-5"]);
}

#[test]
fn undated_matches_sort_after_dated_ones() {
    let matches = vec![
        rec("", "Alpha", "Beta", 9, 9),
        rec("2020-01-01", "Alpha", "Beta", 1, 1),
    ];
    let filtered = filter_head_to_head(&matches, "Alpha", "Beta");
    assert_eq!(filtered[0].date.raw, "2020-01-01");
    assert_eq!(filtered[1].date.raw, "Unknown date");
}

#[test]
fn wins_and_draws_sum_to_total() {
    let matches = clasico_history();
    let filtered = filter_head_to_head(&matches, "Real Madrid", "Barcelona");
    let stats = compute_stats(&filtered, "Real Madrid", "Barcelona");
    assert_eq!(
        (stats.team_a.wins + stats.team_b.wins + stats.draws()) as usize,
        stats.total_matches
    );
    assert_eq!(stats.team_a.wins, 3);
    assert_eq!(stats.team_b.wins, 2);
    assert_eq!(stats.losses_a(), 2);
    assert_eq!(stats.losses_b(), 3);
    assert_eq!(stats.goals_against_a(), stats.team_b.goals_for);
    assert_eq!(stats.goals_against_b(), 10);
}

#[test]
fn goal_tallies_cover_every_goal() {
    let matches = clasico_history();
    let filtered = filter_head_to_head(&matches, "Real Madrid", "Barcelona");
    let stats = compute_stats(&filtered, "Real Madrid", "Barcelona");
    let expected: u32 = filtered.iter().map(MatchRecord::total_goals).sum();
    assert_eq!(stats.team_a.goals_for + stats.team_b.goals_for, expected);
    assert_eq!(stats.team_a.goals_for, 3 + 4 + 2 + 1);
    assert_eq!(stats.team_b.goals_for, 2 + 1 + 1 + 2 + 1);
}

#[test]
fn compute_stats_is_idempotent() {
    let matches = clasico_history();
    let filtered = filter_head_to_head(&matches, "Real Madrid", "Barcelona");
    let first = compute_stats(&filtered, "Real Madrid", "Barcelona");
    let second = compute_stats(&filtered, "Real Madrid", "Barcelona");
    assert_eq!(first, second);
}

#[test]
fn overlapping_fragments_fall_back_to_a_as_away() {
    // "United" names both clubs, so A is found in the home slot; a fragment
    // that appears in neither slot treats A as the away side.
    let matches = vec![rec("2024-03-17", "Manchester United", "Newcastle United", 2, 0)];
    let filtered = filter_head_to_head(&matches, "United", "United");
    assert_eq!(filtered.len(), 1);
    let stats = compute_stats(&filtered, "United", "United");
    assert_eq!(stats.team_a.wins, 1);
    assert_eq!(stats.team_a.goals_for, 2);

    let stats = compute_stats(&filtered, "Liverpool", "Newcastle");
    assert_eq!(stats.team_a.wins, 0);
    assert_eq!(stats.team_b.wins, 1);
    assert_eq!(stats.team_a.goals_for, 0);
    assert_eq!(stats.team_b.goals_for, 2);
}

#[test]
fn limit_keeps_most_recent_and_stats_follow() {
    let matches = clasico_history();
    let query = TeamQuery::new(" Real Madrid ", "Barcelona").expect("valid query");
    let result = head_to_head(&matches, &query, MatchLimit::Last(2));
    assert_eq!(result.team_a, "Real Madrid");
    assert_eq!(result.total_matches(), 2);
    assert_eq!(result.matches[0].date.raw, "2024-04-21");
    assert_eq!(result.stats.total_matches, 2);
    assert_eq!(result.stats.team_a.wins, 2);
    assert_eq!(result.stats.team_a.goals_for, 7);
    assert_eq!(result.stats.team_b.goals_for, 3);
}

#[test]
fn empty_team_names_are_rejected() {
    assert_eq!(TeamQuery::new("  ", "Barcelona"), Err(QueryError::EmptyTeam));
    assert_eq!(TeamQuery::new("Real Madrid", ""), Err(QueryError::EmptyTeam));
    let q = TeamQuery::new("a", "b").expect("valid query").swapped();
    assert_eq!((q.team_a(), q.team_b()), ("b", "a"));
}

#[test]
fn missing_competition_uses_sentinel() {
    let m = MatchRecord::new("2024-01-01", "A", "B", 0, 0, None);
    assert_eq!(m.competition, "Unknown");
    let m = MatchRecord::new("2024-01-01", "A", "B", 0, 0, Some("  ".to_string()));
    assert_eq!(m.competition, "Unknown");
}

#[test]
fn oversized_scores_saturate_instead_of_overflowing() {
    let matches = vec![
        rec("2024-04-21", "Alpha", "Beta", 4_000_000_000, 1),
        rec("2023-04-21", "Alpha", "Beta", 4_000_000_000, 2),
    ];
    let filtered = filter_head_to_head(&matches, "Alpha", "Beta");
    let stats = compute_stats(&filtered, "Alpha", "Beta");
    assert_eq!(stats.team_a.wins, 2);
    assert_eq!(stats.team_a.goals_for, u32::MAX);
    assert_eq!(stats.team_b.goals_for, 3);
    assert_eq!(stats.total_goals(), u32::MAX);

    let huge = rec("2024-01-01", "Alpha", "Beta", u32::MAX, u32::MAX);
    assert_eq!(huge.total_goals(), u32::MAX);
}

#[test]
fn filter_and_stats_share_the_containment_rule() {
    let matches = vec![rec("2024-02-25", "Atlético Madrid", "Real Madrid CF", 1, 1)];
    let filtered = filter_head_to_head(&matches, "ATLÉTICO", "real MADRID");
    assert_eq!(filtered.len(), 1);
    assert!(team_matches("Atlético Madrid", "ATLÉTICO"));
    assert!(!team_matches("Real Madrid CF", "ATLÉTICO"));

    let stats = compute_stats(&filtered, "ATLÉTICO", "real MADRID");
    assert_eq!(stats.draws(), 1);
    assert_eq!(stats.team_a.goals_for, 1);
}
