use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::model::{KillMatrixEntry, MatrixKind};
use crate::util::parse_int;
use crate::vlr_scraper::element_text;

use super::team_tags::TeamTags;
use super::{parse_count, parse_participant, Participant};

/// Parse one kill matrix of a game section.
///
/// The first row lists the victims, every following row starts with a killer
/// and holds one `kills / deaths / differential` cell per victim. Entries are
/// returned row-major in page order.
pub(crate) fn parse_kill_matrix(
    game: &ElementRef,
    kind: MatrixKind,
    tags: &TeamTags,
) -> Result<Vec<KillMatrixEntry>> {
    let table_selector = Selector::parse(&format!("table.wf-table-inset.mod-matrix.{kind}"))?;
    let Some(table) = game.select(&table_selector).next() else {
        return Ok(Vec::new());
    };

    let tbody_selector = Selector::parse("tbody")?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("td")?;
    let stats_sq_selector = Selector::parse(".stats-sq")?;

    let container = table.select(&tbody_selector).next().unwrap_or(table);
    let rows: Vec<ElementRef> = container.select(&row_selector).collect();
    let Some((header, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let mut victims: Vec<Participant> = Vec::new();
    for cell in header.select(&cell_selector).skip(1) {
        if let Some(victim) = parse_participant(&cell, tags)? {
            victims.push(victim);
        }
    }

    let mut entries = Vec::new();
    for row in body {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let Some((killer_cell, stat_cells)) = cells.split_first() else {
            continue;
        };
        let Some(killer) = parse_participant(killer_cell, tags)? else {
            continue;
        };

        for (stat_cell, victim) in stat_cells.iter().zip(&victims) {
            let values: Vec<String> = stat_cell
                .select(&stats_sq_selector)
                .map(|sq| element_text(&sq))
                .collect();
            let [kills, deaths, differential, ..] = values.as_slice() else {
                continue;
            };

            let kills = parse_count(kills);
            let deaths = parse_count(deaths);
            if kills.is_none() && deaths.is_none() {
                continue;
            }
            let differential = parse_int(differential).and_then(|v| i32::try_from(v).ok());

            entries.push(KillMatrixEntry {
                killer_name: killer.name.clone(),
                victim_name: victim.name.clone(),
                killer_team_short: killer.team_short.clone(),
                killer_team_id: killer.team_id,
                victim_team_short: victim.team_short.clone(),
                victim_team_id: victim.team_id,
                kills,
                deaths,
                differential,
            });
        }
    }

    Ok(entries)
}
