use std::collections::HashMap;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use scraper::{CaseSensitivity, ElementRef, Selector};

use crate::error::Result;
use crate::model::GameId;
use crate::vlr_scraper::element_text;

pub(crate) const ALL_GAMES: &str = "all";
pub(crate) const ALL_MAPS_NAME: &str = "All Maps";

static RE_MAP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*").expect("invalid regex: map number"));

/// The game sections to parse, in order, and the display name of each game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GamePlan {
    pub order: Vec<String>,
    pub names: HashMap<GameId, String>,
}

/// `"all"` for the aggregate, a plain digit string for a map, `None` otherwise.
pub(crate) fn parse_game_id(raw: &str) -> Option<GameId> {
    if raw == ALL_GAMES {
        return Some(GameId::All);
    }
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().map(GameId::Map)
}

fn is_map_id(raw: &str) -> bool {
    matches!(parse_game_id(raw), Some(GameId::Map(_)))
}

pub(crate) fn enumerate_games(stats_root: &ElementRef) -> Result<GamePlan> {
    let names = game_names(stats_root)?;

    let nav_selector = Selector::parse(".vm-stats-gamesnav .vm-stats-gamesnav-item")?;
    let nav_ids = stats_root
        .select(&nav_selector)
        .filter_map(|item| item.value().attr("data-game-id"))
        .filter(|id| !id.is_empty())
        .collect_vec();

    let mut order = if nav_ids.is_empty() {
        let section_selector = Selector::parse(".vm-stats-game")?;
        stats_root
            .select(&section_selector)
            .map(|section| {
                section
                    .value()
                    .attr("data-game-id")
                    .unwrap_or_default()
                    .to_string()
            })
            .collect_vec()
    } else {
        order_nav_ids(&nav_ids)
    };

    // A single map never gets an aggregate view, whatever the tabs say.
    if order.iter().filter(|id| is_map_id(id)).count() <= 1 {
        order.retain(|id| id != ALL_GAMES);
    }

    Ok(GamePlan { order, names })
}

/// Aggregate first (when there is more than one map), then maps by ascending id.
fn order_nav_ids(nav_ids: &[&str]) -> Vec<String> {
    let has_all = nav_ids.contains(&ALL_GAMES);
    let map_ids = nav_ids
        .iter()
        .filter_map(|id| match parse_game_id(id) {
            Some(GameId::Map(n)) => Some((n, id.to_string())),
            _ => None,
        })
        .sorted_by_key(|(n, _)| *n)
        .map(|(_, id)| id)
        .collect_vec();

    let mut order = Vec::with_capacity(map_ids.len() + 1);
    if has_all && map_ids.len() > 1 {
        order.push(ALL_GAMES.to_string());
    }
    order.extend(map_ids);
    order
}

/// Display names from every element carrying a game id, except the content
/// sections themselves.
fn game_names(stats_root: &ElementRef) -> Result<HashMap<GameId, String>> {
    let carrier_selector = Selector::parse("[data-game-id]")?;
    let mut names = HashMap::new();
    for carrier in stats_root.select(&carrier_selector) {
        if carrier
            .value()
            .has_class("vm-stats-game", CaseSensitivity::CaseSensitive)
        {
            continue;
        }
        let Some(game_id) = carrier.value().attr("data-game-id").and_then(parse_game_id) else {
            continue;
        };
        let text = element_text(&carrier);
        if text.is_empty() {
            continue;
        }
        let name = match game_id {
            GameId::All => ALL_MAPS_NAME.to_string(),
            GameId::Map(_) => RE_MAP_NUMBER.replace(&text, "").trim().to_string(),
        };
        names.insert(game_id, name);
    }
    Ok(names)
}
