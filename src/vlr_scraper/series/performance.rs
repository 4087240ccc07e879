use std::collections::HashMap;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{GameId, KillMatrixEntry, MapPerformance, MatrixKind};
use crate::util::join_url;
use crate::vlr_scraper::{self, direct_text};

use super::games::{enumerate_games, parse_game_id, ALL_MAPS_NAME};
use super::matrix::parse_kill_matrix;
use super::player_table::parse_player_performances;
use super::team_tags::{parse_header_teams, HeaderTeams, TeamTags, TEAM_TAG_ALIASES};

#[instrument(skip(client))]
pub(crate) async fn get_series_performance(
    client: &reqwest::Client,
    base_url: &str,
    series_id: u32,
    limit: Option<usize>,
    timeout: Duration,
) -> Vec<MapPerformance> {
    if limit == Some(0) {
        return Vec::new();
    }

    let url = join_url(base_url, &format!("/{series_id}?game=all&tab=performance"));
    let body = match vlr_scraper::fetch_text(client, &url, timeout).await {
        Ok(body) => body,
        Err(e) => {
            debug!(series_id, error = %e, "failed to fetch performance tab");
            return Vec::new();
        }
    };

    let Some(header) = scan_performance_page(&body) else {
        debug!(series_id, "performance page has no stats container");
        return Vec::new();
    };

    let overview = if header.is_complete() {
        None
    } else {
        fetch_overview_teams(client, base_url, series_id, timeout).await
    };
    let tags = TeamTags::build(&header, overview.as_ref(), TEAM_TAG_ALIASES);
    debug!(series_id, tags = tags.len(), "resolved team tags");

    let document = Html::parse_document(&body);
    let result = parse_performance(&document, &tags, limit).unwrap_or_else(|e| {
        debug!(series_id, error = %e, "failed to parse performance tab");
        Vec::new()
    });
    debug!(series_id, maps = result.len(), "parsed series performance");
    result
}

/// Header teams of a performance page, or `None` when the page has no stats.
fn scan_performance_page(body: &str) -> Option<HeaderTeams> {
    let document = Html::parse_document(body);
    let stats_selector = Selector::parse(".vm-stats").ok()?;
    document.select(&stats_selector).next()?;
    Some(parse_header_teams(&document).unwrap_or_default())
}

/// Team ids from the series overview page. Any failure just means no backfill.
async fn fetch_overview_teams(
    client: &reqwest::Client,
    base_url: &str,
    series_id: u32,
    timeout: Duration,
) -> Option<HeaderTeams> {
    let url = join_url(base_url, &format!("/{series_id}"));
    match vlr_scraper::fetch_text(client, &url, timeout).await {
        Ok(body) => parse_header_teams(&Html::parse_document(&body))
            .inspect_err(|e| debug!(series_id, error = %e, "failed to parse overview header"))
            .ok(),
        Err(e) => {
            debug!(series_id, error = %e, "failed to fetch series overview");
            None
        }
    }
}

/// Extract every game of an already fetched performance page, in tab order,
/// keeping only games with at least one non-empty table.
pub(crate) fn parse_performance(
    document: &Html,
    tags: &TeamTags,
    limit: Option<usize>,
) -> Result<Vec<MapPerformance>> {
    let stats_selector = Selector::parse(".vm-stats")?;
    let Some(stats_root) = document.select(&stats_selector).next() else {
        return Ok(Vec::new());
    };

    let plan = enumerate_games(&stats_root)?;
    debug!(games = ?plan.order, "enumerated games");

    let section_selector = Selector::parse(".vm-stats-game")?;
    let sections: HashMap<&str, ElementRef> = stats_root
        .select(&section_selector)
        .map(|section| {
            (
                section.value().attr("data-game-id").unwrap_or_default(),
                section,
            )
        })
        .collect();

    let mut result = Vec::new();
    for raw_id in &plan.order {
        if limit.is_some_and(|limit| result.len() >= limit) {
            break;
        }
        let Some(section) = sections.get(raw_id.as_str()) else {
            continue;
        };

        let game_id = parse_game_id(raw_id);
        let map_name = match game_id {
            Some(GameId::All) => Some(ALL_MAPS_NAME.to_string()),
            Some(id) => plan.names.get(&id).cloned().filter(|n| !n.is_empty()),
            None => None,
        };
        let map_name = match map_name {
            Some(name) => Some(name),
            None => header_map_name(section)?,
        };

        let performance = parse_game(section, game_id, map_name, tags);
        debug!(
            game = raw_id.as_str(),
            kills = performance.kill_matrix.len(),
            fkfd = performance.fkfd_matrix.len(),
            op = performance.op_matrix.len(),
            players = performance.player_performances.len(),
            "parsed game"
        );
        if performance.has_data() {
            result.push(performance);
        }
    }

    Ok(result)
}

fn parse_game(
    section: &ElementRef,
    game_id: Option<GameId>,
    map_name: Option<String>,
    tags: &TeamTags,
) -> MapPerformance {
    let matrix = |kind: MatrixKind| -> Vec<KillMatrixEntry> {
        parse_kill_matrix(section, kind, tags).unwrap_or_else(|e| {
            debug!(%kind, error = %e, "failed to parse kill matrix");
            Vec::new()
        })
    };
    let kill_matrix = matrix(MatrixKind::Normal);
    let fkfd_matrix = matrix(MatrixKind::FirstKillFirstDeath);
    let op_matrix = matrix(MatrixKind::Operator);

    let player_performances = parse_player_performances(section, tags).unwrap_or_else(|e| {
        debug!(error = %e, "failed to parse performance table");
        Vec::new()
    });

    MapPerformance {
        game_id,
        map_name,
        kill_matrix,
        fkfd_matrix,
        op_matrix,
        player_performances,
    }
}

/// Map name printed in the game header, used when the tabs carry none.
fn header_map_name(section: &ElementRef) -> Result<Option<String>> {
    let map_selector = Selector::parse(".vm-stats-game-header .map span")?;
    Ok(section
        .select(&map_selector)
        .next()
        .and_then(|span| direct_text(&span)))
}
