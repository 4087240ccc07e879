use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::Result;
use crate::model::{ClutchDetail, MultiKillDetail, PlayerPerformance, RoundDetail};
use crate::vlr_scraper::{attr, direct_text, element_text};

use super::team_tags::TeamTags;
use super::{parse_count, parse_participant};

/// Stat-square modifiers marking a multi-kill cell.
const MULTI_KILL_MODIFIERS: &[&str] = &["mod-a", "mod-b", "mod-c", "mod-d"];
/// Stat-square modifiers marking a clutch cell.
const CLUTCH_MODIFIERS: &[&str] = &["mod-e", "mod-f", "mod-g", "mod-h", "mod-i"];

const MIN_PLAYER_CELLS: usize = 7;

/// One way of recognising the performance table. Candidates are visited in
/// selector order and the first table satisfying `matches` wins.
struct TableStrategy {
    name: &'static str,
    candidates: &'static [&'static str],
    matches: fn(&ElementRef) -> Result<bool>,
}

/// Most specific first; each entry accepts more markup than the one before.
const TABLE_STRATEGIES: &[TableStrategy] = &[
    TableStrategy {
        name: "perf-notable",
        candidates: &["table.wf-table-inset", "table"],
        matches: has_perf_notable,
    },
    TableStrategy {
        name: "team-and-popable",
        candidates: &["table"],
        matches: has_team_and_popable,
    },
    TableStrategy {
        name: "team-and-stat-marker",
        candidates: &["table"],
        matches: has_team_and_stat_marker,
    },
    TableStrategy {
        name: "wide-player-row",
        candidates: &["table"],
        matches: has_wide_player_row,
    },
];

fn contains(table: &ElementRef, css: &str) -> Result<bool> {
    let selector = Selector::parse(css)?;
    Ok(table.select(&selector).next().is_some())
}

fn has_perf_notable(table: &ElementRef) -> Result<bool> {
    contains(table, ".vm-perf-notable")
}

fn has_team_and_popable(table: &ElementRef) -> Result<bool> {
    Ok(contains(table, ".team")? && contains(table, ".wf-popable")?)
}

fn has_team_and_stat_marker(table: &ElementRef) -> Result<bool> {
    Ok(contains(table, ".team")?
        && (contains(table, ".vm-perf-notable")?
            || contains(table, ".wf-popable")?
            || contains(table, ".stats-sq.mod-d")?))
}

fn has_wide_player_row(table: &ElementRef) -> Result<bool> {
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("td")?;
    for row in table.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() >= MIN_PLAYER_CELLS && contains(&cells[0], ".team")? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Locate the per-player performance table of a game section, returning it
/// together with the name of the strategy that found it.
pub(crate) fn find_performance_table<'a>(
    game: &ElementRef<'a>,
) -> Result<Option<(ElementRef<'a>, &'static str)>> {
    for strategy in TABLE_STRATEGIES {
        for css in strategy.candidates {
            let selector = Selector::parse(css)?;
            for table in game.select(&selector) {
                if (strategy.matches)(&table)? {
                    return Ok(Some((table, strategy.name)));
                }
            }
        }
    }
    Ok(None)
}

pub(crate) fn parse_player_performances(
    game: &ElementRef,
    tags: &TeamTags,
) -> Result<Vec<PlayerPerformance>> {
    let Some((table, strategy)) = find_performance_table(game)? else {
        return Ok(Vec::new());
    };
    debug!(strategy, "found performance table");

    let tbody_selector = Selector::parse("tbody")?;
    let row_selector = Selector::parse("tr")?;
    let header_cell_selector = Selector::parse("th")?;
    let cell_selector = Selector::parse("td")?;
    let img_selector = Selector::parse("img")?;

    let container = table.select(&tbody_selector).next().unwrap_or(table);
    let mut performances = Vec::new();
    for row in container.select(&row_selector) {
        if row.select(&header_cell_selector).next().is_some() {
            continue;
        }
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < MIN_PLAYER_CELLS {
            continue;
        }
        let Some(player) = parse_participant(&cells[0], tags)? else {
            continue;
        };

        let agent = cells[1]
            .select(&img_selector)
            .next()
            .and_then(|img| attr(&img, "src"))
            .and_then(agent_from_src);

        let detailed = |idx: usize| -> Result<DetailedStat> {
            cells
                .get(idx)
                .map(parse_detailed_stat_cell)
                .transpose()
                .map(Option::unwrap_or_default)
        };
        let plain = |idx: usize| -> Result<Option<u32>> {
            Ok(cells
                .get(idx)
                .map(parse_stat_cell)
                .transpose()?
                .flatten())
        };

        let multi_2k = detailed(2)?;
        let multi_3k = detailed(3)?;
        let multi_4k = detailed(4)?;
        let multi_5k = detailed(5)?;
        let clutch_1v1 = detailed(6)?;
        let clutch_1v2 = detailed(7)?;
        let clutch_1v3 = detailed(8)?;
        let clutch_1v4 = detailed(9)?;
        let clutch_1v5 = detailed(10)?;

        performances.push(PlayerPerformance {
            name: player.name,
            team_short: player.team_short,
            team_id: player.team_id,
            agent,
            multi_2k: multi_2k.count,
            multi_3k: multi_3k.count,
            multi_4k: multi_4k.count,
            multi_5k: multi_5k.count,
            clutch_1v1: clutch_1v1.count,
            clutch_1v2: clutch_1v2.count,
            clutch_1v3: clutch_1v3.count,
            clutch_1v4: clutch_1v4.count,
            clutch_1v5: clutch_1v5.count,
            econ: plain(11)?,
            plants: plain(12)?,
            defuses: plain(13)?,
            multi_2k_details: multi_2k.details,
            multi_3k_details: multi_3k.details,
            multi_4k_details: multi_4k.details,
            multi_5k_details: multi_5k.details,
            clutch_1v1_details: clutch_1v1.details,
            clutch_1v2_details: clutch_1v2.details,
            clutch_1v3_details: clutch_1v3.details,
            clutch_1v4_details: clutch_1v4.details,
            clutch_1v5_details: clutch_1v5.details,
        });
    }

    Ok(performances)
}

/// `/img/vlr/game/agents/kayo.png` -> `Kayo`.
fn agent_from_src(src: &str) -> Option<String> {
    let file = src.split(['?', '#']).next()?.rsplit('/').next()?;
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    let mut chars = stem.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
}

/// A stat square's count and the rounds listed in its popover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DetailedStat {
    pub count: Option<u32>,
    pub details: Option<Vec<RoundDetail>>,
}

pub(crate) fn parse_detailed_stat_cell(cell: &ElementRef) -> Result<DetailedStat> {
    let stats_sq_selector = Selector::parse(".stats-sq")?;
    let Some(stat_sq) = cell.select(&stats_sq_selector).next() else {
        return Ok(DetailedStat::default());
    };

    let count = direct_text(&stat_sq)
        .and_then(|text| parse_count(&text))
        .or_else(|| {
            element_text(&stat_sq)
                .split_whitespace()
                .next()
                .and_then(parse_count)
        });

    let popover_selector = Selector::parse(".wf-popable-contents")?;
    let details = match stat_sq.select(&popover_selector).next() {
        Some(popover) => parse_popover_rounds(&stat_sq, &popover)?,
        None => Vec::new(),
    };

    Ok(DetailedStat {
        count,
        details: Some(details).filter(|d| !d.is_empty()),
    })
}

fn parse_popover_rounds(stat_sq: &ElementRef, popover: &ElementRef) -> Result<Vec<RoundDetail>> {
    let round_selector = Selector::parse("div[style*='white-space: nowrap']")?;
    let span_selector = Selector::parse("span")?;
    let victim_selector = Selector::parse("div[style*='display: flex; align-items: center']")?;

    let has_modifier = |modifiers: &[&str]| {
        stat_sq
            .value()
            .classes()
            .any(|class| modifiers.contains(&class))
    };
    let is_multi_kill = has_modifier(MULTI_KILL_MODIFIERS);
    let is_clutch = has_modifier(CLUTCH_MODIFIERS);

    let mut details = Vec::new();
    for round_div in popover.select(&round_selector) {
        let round_label = round_div.select(&span_selector).next().unwrap_or(round_div);
        let Some(round_number) = parse_count(&element_text(&round_label)).filter(|n| *n > 0)
        else {
            continue;
        };

        let Some(block) = round_div.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        // The victim label is "<agent> <player>"; keep the player.
        let players_killed: Vec<String> = block
            .select(&victim_selector)
            .filter_map(|victim| {
                element_text(&victim)
                    .split_whitespace()
                    .last()
                    .map(str::to_string)
            })
            .collect();
        if players_killed.is_empty() {
            continue;
        }

        if is_multi_kill {
            details.push(RoundDetail::MultiKill(MultiKillDetail {
                round_number,
                players_killed,
            }));
        } else if is_clutch {
            details.push(RoundDetail::Clutch(ClutchDetail {
                round_number,
                players_killed,
            }));
        }
    }
    Ok(details)
}

fn parse_stat_cell(cell: &ElementRef) -> Result<Option<u32>> {
    let stats_sq_selector = Selector::parse(".stats-sq")?;
    Ok(cell
        .select(&stats_sq_selector)
        .next()
        .and_then(|sq| parse_count(&element_text(&sq))))
}
