//! Series performance against a mocked vlr.gg.
//!
//! The performance tab and the series overview are served by wiremock from
//! the fixture page, so these tests exercise the full fetch, team tag
//! resolution and parsing flow without touching the network.

use std::time::Duration;

use wiremock::{
    matchers::{method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

use vlr_performance::{GameId, MapPerformance, VlrClient};

const FIXTURE: &str = include_str!("fixtures/series_performance.html");
const SERIES_ID: u32 = 542210;
const TIMEOUT: Option<Duration> = Some(Duration::from_secs(2));

fn performance_tab(body: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/{SERIES_ID}")))
        .and(query_param("game", "all"))
        .and(query_param("tab", "performance"))
        .respond_with(body)
}

fn overview(body: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/{SERIES_ID}")))
        .and(query_param_is_missing("tab"))
        .respond_with(body)
}

fn client(server: &MockServer) -> VlrClient {
    VlrClient::new().with_base_url(server.uri())
}

fn ids(maps: &[MapPerformance]) -> Vec<Option<GameId>> {
    maps.iter().map(|m| m.game_id).collect()
}

#[tokio::test]
async fn test_series_performance_from_fixture() {
    let server = MockServer::start().await;
    performance_tab(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(1)
        .mount(&server)
        .await;
    // Both header ids resolve, so the overview is never needed.
    overview(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(0)
        .mount(&server)
        .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, None, TIMEOUT)
        .await;

    assert_eq!(
        ids(&maps),
        vec![
            Some(GameId::All),
            Some(GameId::Map(233386)),
            Some(GameId::Map(233387))
        ]
    );
    assert!(maps.iter().all(MapPerformance::has_data));

    let entry = &maps[0].kill_matrix[0];
    assert_eq!(entry.killer_team_id, Some(1034));
    assert_eq!(entry.victim_team_id, Some(474));

    let players = &maps[0].player_performances;
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].multi_2k, Some(2));
}

#[tokio::test]
async fn test_limit_caps_maps() {
    let server = MockServer::start().await;
    performance_tab(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .mount(&server)
        .await;

    let client = client(&server);
    let one = client.get_series_performance(SERIES_ID, Some(1), TIMEOUT).await;
    assert_eq!(ids(&one), vec![Some(GameId::All)]);

    let many = client.get_series_performance(SERIES_ID, Some(10), TIMEOUT).await;
    assert_eq!(many.len(), 3);
}

#[tokio::test]
async fn test_zero_limit_issues_no_request() {
    let server = MockServer::start().await;
    performance_tab(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(0)
        .mount(&server)
        .await;
    overview(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(0)
        .mount(&server)
        .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, Some(0), TIMEOUT)
        .await;
    assert!(maps.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_yields_empty() {
    let server = MockServer::start().await;
    performance_tab(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, None, TIMEOUT)
        .await;
    assert!(maps.is_empty());
}

#[tokio::test]
async fn test_rate_limited_yields_empty() {
    let server = MockServer::start().await;
    performance_tab(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, None, TIMEOUT)
        .await;
    assert!(maps.is_empty());
}

#[tokio::test]
async fn test_page_without_stats_yields_empty() {
    let server = MockServer::start().await;
    performance_tab(
        ResponseTemplate::new(200).set_body_string("<html><body><p>Match not found</p></body></html>"),
    )
    .mount(&server)
    .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, None, TIMEOUT)
        .await;
    assert!(maps.is_empty());
}

#[tokio::test]
async fn test_overview_backfills_missing_team_id() {
    let server = MockServer::start().await;
    let without_liquid_link = FIXTURE.replace(r#"href="/team/474/team-liquid""#, r##"href="#""##);
    performance_tab(ResponseTemplate::new(200).set_body_string(without_liquid_link))
        .expect(1)
        .mount(&server)
        .await;
    overview(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, None, TIMEOUT)
        .await;

    let entry = &maps[0].kill_matrix[0];
    assert_eq!(entry.killer_team_id, Some(1034));
    assert_eq!(entry.victim_team_short.as_deref(), Some("TL"));
    assert_eq!(entry.victim_team_id, Some(474));
}

#[tokio::test]
async fn test_failed_overview_leaves_team_unresolved() {
    let server = MockServer::start().await;
    let without_liquid_link = FIXTURE.replace(r#"href="/team/474/team-liquid""#, r##"href="#""##);
    performance_tab(ResponseTemplate::new(200).set_body_string(without_liquid_link))
        .mount(&server)
        .await;
    overview(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let maps = client(&server)
        .get_series_performance(SERIES_ID, None, TIMEOUT)
        .await;

    assert_eq!(maps.len(), 3);
    let entry = &maps[0].kill_matrix[0];
    assert_eq!(entry.killer_team_id, Some(1034));
    assert_eq!(entry.victim_team_short.as_deref(), Some("TL"));
    assert_eq!(entry.victim_team_id, None);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let server = MockServer::start().await;
    performance_tab(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.get_series_performance(SERIES_ID, None, TIMEOUT).await;
    let second = client.get_series_performance(SERIES_ID, None, TIMEOUT).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_check_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    assert!(client(&server).check_status(TIMEOUT).await);

    let down = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;
    assert!(!client(&down).check_status(TIMEOUT).await);
}
