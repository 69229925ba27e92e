use std::fs;
use std::path::PathBuf;

use h2h_terminal::annotations::Annotations;
use h2h_terminal::api_source::{
    parse_fixture_cards_json, parse_fixtures_json, parse_injuries_response_json,
    parse_team_search_json,
};
use h2h_terminal::csv_source::parse_matches_csv;
use h2h_terminal::h2h::{
    MatchLimit, TeamQuery, compute_stats, filter_head_to_head, head_to_head,
};
use h2h_terminal::json_source::{
    load_json_dir, parse_cards_json, parse_injuries_json, parse_matches_json,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file should be readable")
}

#[test]
fn parses_footballcsv_fixture() {
    let raw = read_fixture("espana/esp.1.csv");
    let rows = parse_matches_csv(&raw, "La Liga").expect("fixture should parse");
    assert_eq!(rows.len(), 5);

    assert_eq!(rows[0].home_team, "UD Almería");
    assert_eq!(rows[0].away_team, "Rayo Vallecano");
    assert_eq!((rows[0].home_goals, rows[0].away_goals), (0, 2));
    assert_eq!(rows[0].competition, "La Liga");
    assert!(rows[0].date.day.is_some());

    let athletic = &rows[4];
    assert_eq!(athletic.home_team, "Athletic Club, Bilbao");
    assert_eq!(athletic.away_team, "Girona FC");
    assert_eq!(athletic.score_label(), "0-0");
}

#[test]
fn csv_fixture_feeds_head_to_head() {
    let raw = read_fixture("espana/esp.1.csv");
    let rows = parse_matches_csv(&raw, "La Liga").expect("fixture should parse");
    let query = TeamQuery::new("barcelona", "real madrid").expect("valid query");
    let result = head_to_head(&rows, &query, MatchLimit::All);

    assert_eq!(result.total_matches(), 2);
    assert_eq!(result.matches[0].date.raw, "Sun Apr 21 2024");
    assert_eq!(result.matches[1].date.raw, "Sat Oct 28 2023");
    assert_eq!(result.stats.team_a.wins, 0);
    assert_eq!(result.stats.team_b.wins, 2);
    assert_eq!(result.stats.team_a.goals_for, 3);
    assert_eq!(result.stats.team_b.goals_for, 5);
}

#[test]
fn parses_split_goal_columns() {
    let raw = read_fixture("football_data.csv");
    let rows = parse_matches_csv(&raw, "La Liga").expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].home_team, "Real Madrid");
    assert_eq!(rows[0].score_label(), "3-2");
    assert_eq!(rows[1].score_label(), "1-2");
    assert_eq!(
        rows[0].date.day,
        chrono::NaiveDate::from_ymd_opt(2024, 4, 21)
    );
    // non-numeric goals fall back to the score cell and then to 0-0
    assert_eq!(rows[2].score_label(), "0-0");
}

#[test]
fn csv_without_team_columns_is_an_error() {
    let err = parse_matches_csv("Date,Score\n2024-01-01,1-0\n", "La Liga");
    assert!(err.is_err());
    assert!(
        parse_matches_csv("  ", "La Liga")
            .expect("blank input should parse")
            .is_empty()
    );
}

#[test]
fn parses_json_matches_fixture() {
    let raw = read_fixture("json/matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].score_label(), "3-2");
    assert_eq!(rows[1].score_label(), "1-4");
    assert_eq!(rows[2].score_label(), "0-2");
    assert_eq!(rows[2].competition, "Unknown");
    assert_eq!(rows[3].date.raw, "Unknown date");
    assert!(rows[3].date.day.is_none());
    assert_eq!(rows[3].score_label(), "0-0");
}

#[test]
fn parses_json_annotation_fixtures() {
    let cards = parse_cards_json(&read_fixture("json/cards.json")).expect("cards should parse");
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].cards.home_yellow, vec!["Vinicius Jr.", "Modric"]);
    assert!(cards[0].cards.home_red.is_empty());
    assert_eq!(cards[1].cards.away_red, vec!["Carvajal"]);

    let injuries =
        parse_injuries_json(&read_fixture("json/injuries.json")).expect("injuries should parse");
    assert_eq!(injuries.len(), 2);
    assert_eq!(injuries[0].reason.as_deref(), Some("Knee Injury"));
    assert_eq!(injuries[1].reason, None);
}

#[test]
fn json_dir_joins_annotations_to_matches() {
    let bundle = load_json_dir(&fixture_path("json")).expect("json dir should load");
    assert_eq!(bundle.matches.len(), 4);

    let annotations = Annotations::new(bundle.cards, bundle.injuries);
    let clasico = &bundle.matches[0];
    assert_eq!(annotations.cards_for(clasico).yellow_count(), 3);
    assert_eq!(annotations.injuries_for(clasico).len(), 2);

    let athletic = &bundle.matches[2];
    assert!(annotations.cards_for(athletic).is_empty());
    assert!(annotations.injuries_for(athletic).is_empty());
}

#[test]
fn json_null_is_empty() {
    assert!(parse_matches_json("null").expect("null should parse").is_empty());
    assert!(parse_cards_json("").expect("empty should parse").is_empty());
    assert!(parse_injuries_json("null").expect("null should parse").is_empty());
}

#[test]
fn parses_api_team_search_fixture() {
    let teams = parse_team_search_json(&read_fixture("api_teams.json")).expect("should parse");
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1].id, 529);
    assert_eq!(teams[1].name, "Barcelona");
}

#[test]
fn parses_api_head_to_head_fixture() {
    let fixtures = parse_fixtures_json(&read_fixture("api_h2h.json")).expect("should parse");
    assert_eq!(fixtures.len(), 2);

    let first = &fixtures[0];
    assert_eq!(first.id, 1038236);
    assert_eq!(first.record.home_team, "Real Madrid");
    assert_eq!(first.record.score_label(), "3-2");
    assert_eq!(first.record.competition, "La Liga");
    assert_eq!(
        first.record.date.day,
        chrono::NaiveDate::from_ymd_opt(2024, 4, 21)
    );

    // unplayed or unreported goals come through as 0-0
    assert_eq!(fixtures[1].record.score_label(), "0-0");
    assert_eq!(fixtures[1].record.competition, "Super Cup");
}

#[test]
fn parses_api_events_into_card_sheet() {
    let fixtures = parse_fixtures_json(&read_fixture("api_h2h.json")).expect("should parse");
    let sheet = parse_fixture_cards_json(&read_fixture("api_events.json"), &fixtures[0].record)
        .expect("events should parse");
    assert_eq!(sheet.home_yellow, vec!["Vinicius Junior"]);
    assert_eq!(sheet.away_yellow, vec!["Pedri"]);
    assert_eq!(sheet.home_red, vec!["Rudiger"]);
    assert_eq!(sheet.away_red, vec!["Araujo"]);
}

#[test]
fn parses_api_injuries_and_skips_unnamed_players() {
    let fixtures = parse_fixtures_json(&read_fixture("api_h2h.json")).expect("should parse");
    let injuries =
        parse_injuries_response_json(&read_fixture("api_injuries.json"), &fixtures[0].record)
            .expect("injuries should parse");
    assert_eq!(injuries.len(), 1);
    assert_eq!(injuries[0].player, "Gavi");
    assert_eq!(injuries[0].team, "Barcelona");
    assert_eq!(injuries[0].home_team, "Real Madrid");
    assert_eq!(injuries[0].date, fixtures[0].record.date.raw);
}

#[test]
fn api_error_envelope_is_an_error() {
    let err = parse_team_search_json(&read_fixture("api_error.json"))
        .expect_err("errors object should fail");
    assert!(format!("{err:#}").contains("application key"));
    assert!(parse_fixtures_json("null").expect("null should parse").is_empty());
}

#[test]
fn api_envelope_without_response_is_empty() {
    let teams = parse_team_search_json(r#"{"get": "teams", "errors": []}"#)
        .expect("missing response should parse");
    assert!(teams.is_empty());
    let fixtures = parse_fixtures_json(r#"{"errors": {}, "results": 0}"#)
        .expect("missing response should parse");
    assert!(fixtures.is_empty());
}

#[test]
fn json_scores_near_u32_max_do_not_overflow_stats() {
    let raw = r#"[
        {"date": "2024-04-21", "home_team": "Alpha FC", "away_team": "Beta FC", "home_score": 4000000000, "away_score": 0},
        {"date": "2024-04-28", "home_team": "Alpha FC", "away_team": "Beta FC", "home_score": 4000000000, "away_score": "1"}
    ]"#;
    let rows = parse_matches_json(raw).expect("large scores should parse");
    let filtered = filter_head_to_head(&rows, "alpha", "beta");
    let stats = compute_stats(&filtered, "alpha", "beta");
    assert_eq!(stats.total_matches, 2);
    assert_eq!(stats.team_a.goals_for, u32::MAX);
    assert_eq!(stats.team_b.goals_for, 1);
}
