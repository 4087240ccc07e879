pub(crate) mod games;
pub(crate) mod matrix;
pub(crate) mod performance;
pub(crate) mod player_table;
pub(crate) mod team_tags;

use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::util::parse_int;
use crate::vlr_scraper::{direct_text, select_text};

use self::team_tags::TeamTags;

/// A player cell as rendered in the matrix headers and the performance table:
/// `div.team > div` holds the name as its own text and the tag in `.team-tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Participant {
    pub name: String,
    pub team_short: Option<String>,
    pub team_id: Option<u32>,
}

pub(crate) fn parse_participant(cell: &ElementRef, tags: &TeamTags) -> Result<Option<Participant>> {
    let name_selector = Selector::parse(".team div")?;
    let tag_selector = Selector::parse(".team-tag")?;

    let Some(name_div) = cell.select(&name_selector).next() else {
        return Ok(None);
    };
    let Some(name) = direct_text(&name_div) else {
        return Ok(None);
    };

    let team_short = Some(select_text(&name_div, &tag_selector)).filter(|t| !t.is_empty());
    let team_id = team_short.as_deref().and_then(|tag| tags.get(tag));

    Ok(Some(Participant {
        name,
        team_short,
        team_id,
    }))
}

/// Parse a non-negative counter; negative or garbage text yields `None`.
pub(crate) fn parse_count(text: &str) -> Option<u32> {
    parse_int(text).and_then(|v| u32::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn test_parse_participant() {
        let document = Html::parse_fragment(
            r#"<table><tr><td class="p">
                 <div class="team">
                   <img src="/img/vlr/game/agents/omen.png">
                   <div>s0m <div class="team-tag ge-text-faded">NRG</div></div>
                 </div>
               </td></tr></table>"#,
        );
        let cell_selector = Selector::parse("td.p").unwrap();
        let cell = document.select(&cell_selector).next().unwrap();

        let tags = TeamTags::from_pairs([("NRG", 1034)]);
        let participant = parse_participant(&cell, &tags).unwrap().unwrap();
        assert_eq!(participant.name, "s0m");
        assert_eq!(participant.team_short.as_deref(), Some("NRG"));
        assert_eq!(participant.team_id, Some(1034));
    }

    #[test]
    fn test_parse_participant_without_name() {
        let document = Html::parse_fragment(
            r#"<table><tr><td class="p"><div class="team"><div><span class="team-tag">NRG</span></div></div></td></tr></table>"#,
        );
        let cell_selector = Selector::parse("td.p").unwrap();
        let cell = document.select(&cell_selector).next().unwrap();

        let tags = TeamTags::default();
        assert_eq!(parse_participant(&cell, &tags).unwrap(), None);
    }

    #[test]
    fn test_parse_count_rejects_negative() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count(""), None);
    }
}
