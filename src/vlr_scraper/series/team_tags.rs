use std::collections::HashMap;

use scraper::{Html, Selector};

use crate::error::Result;
use crate::util::extract_id_from_url;
use crate::vlr_scraper::{attr, element_text};

/// Abbreviations used in performance tables, keyed to the full team name
/// they stand for. An alias is only applied once its full name has an id.
pub(crate) const TEAM_TAG_ALIASES: &[(&str, &str)] = &[
    ("TL", "TEAM LIQUID"),
    ("DRX", "DRX"),
    ("FNC", "FNC ESPORTS"),
    ("G2", "G2"),
    ("ENCE", "ENCE"),
    ("LOUD", "LOUD"),
    ("PRX", "PAPER REX"),
    ("T1", "T1"),
    ("GEN", "GEN.G"),
    ("LEV", "LEVIATAN"),
    ("KRÜ", "KRÜ ESPORTS"),
    ("KPR", "KATARU"),
    ("ZETA", "ZETA DIVISION"),
    ("TF", "TWO ALPHA"),
    ("FUT", "FUTURO"),
    ("KC", "KEYD STARS"),
    ("INF", "INFINITE ESPORTS"),
    ("GX", "GIANTX"),
    ("NRG", "NRG"),
    ("SEN", "SENPAI ESPORTS"),
    ("ACN", "AVANTARIA CINCO"),
    ("KBM", "KBM PLUG'N PLAY"),
    ("FUR", "FURIA ESPORTS"),
    ("BAD", "BAD NEWS EAGLES"),
    ("C9", "CLOUD9"),
    ("EG", "EVIL GENIUSES"),
    ("OPTC", "OPTC"),
    ("TSM", "TSM"),
    ("100T", "100 THIEVES"),
    ("BBL", "BIGBEN LOUNGE"),
    ("GIA", "GIANTX"),
    ("RENA", "RENASCENCE"),
    ("VIT", "VITALITY"),
    ("GL", "GOLDEN GORILLAS"),
];

/// Header names that double as the tag shown in the tables.
const HEADER_NAME_TAGS: &[(&str, &str)] = &[("TEAM LIQUID", "TL"), ("DRX", "DRX")];

/// Both sides of a match header: team ids from the team links and display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HeaderTeams {
    pub ids: [Option<u32>; 2],
    pub names: [Option<String>; 2],
}

impl HeaderTeams {
    pub(crate) fn is_complete(&self) -> bool {
        self.ids.iter().all(Option::is_some)
    }

    /// Fill in ids this header is missing from `other`. Ids already known
    /// are kept; names are taken from `other` when it has both.
    pub(crate) fn backfill(&mut self, other: &HeaderTeams) {
        for (id, other_id) in self.ids.iter_mut().zip(other.ids) {
            if id.is_none() {
                *id = other_id;
            }
        }
        if other.names.iter().all(Option::is_some) {
            self.names = other.names.clone();
        }
    }
}

pub(crate) fn parse_header_teams(document: &Html) -> Result<HeaderTeams> {
    let header_selector = Selector::parse(".wf-card.match-header")?;
    let Some(header) = document.select(&header_selector).next() else {
        return Ok(HeaderTeams::default());
    };

    let mut teams = HeaderTeams::default();
    for (side, class) in ["mod-1", "mod-2"].into_iter().enumerate() {
        let link_selector = Selector::parse(&format!(".match-header-link.{class}"))?;
        teams.ids[side] = header
            .select(&link_selector)
            .next()
            .and_then(|link| attr(&link, "href"))
            .and_then(|href| extract_id_from_url(href, "team"));
    }

    let title_selector = Selector::parse(".wf-title-med")?;
    let titles: Vec<String> = header
        .select(&title_selector)
        .map(|e| element_text(&e))
        .collect();
    if titles.len() >= 2 {
        for (side, title) in titles.into_iter().take(2).enumerate() {
            teams.names[side] = Some(title).filter(|t| !t.is_empty());
        }
    }

    Ok(teams)
}

/// Upper-cased team tag (or full name) to team id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TeamTags {
    ids: HashMap<String, u32>,
}

impl TeamTags {
    /// Build the lookup from the page header, an optional overview header
    /// used to backfill missing ids, and a static alias table.
    pub(crate) fn build(
        primary: &HeaderTeams,
        overview: Option<&HeaderTeams>,
        aliases: &[(&str, &str)],
    ) -> Self {
        let mut tags = TeamTags::default();
        tags.register(primary);
        if let Some(overview) = overview {
            let mut merged = primary.clone();
            merged.backfill(overview);
            tags.register(&merged);
        }
        tags.apply_aliases(aliases);
        tags
    }

    fn register(&mut self, teams: &HeaderTeams) {
        for (name, id) in teams.names.iter().zip(teams.ids) {
            let Some(name) = name else { continue };
            let Some(id) = id else { continue };
            let upper = name.trim().to_uppercase();
            if let Some((_, tag)) = HEADER_NAME_TAGS.iter().find(|(full, _)| *full == upper) {
                self.ids.insert(tag.to_string(), id);
            }
            self.ids.insert(upper, id);
        }
    }

    fn apply_aliases(&mut self, aliases: &[(&str, &str)]) {
        for (alias, full_name) in aliases {
            if self.ids.contains_key(*alias) {
                continue;
            }
            if let Some(&id) = self.ids.get(&full_name.to_uppercase()) {
                self.ids.insert(alias.to_string(), id);
            }
        }
    }

    /// Team id for a tag as printed on the page, matched case-insensitively.
    pub(crate) fn get(&self, tag: &str) -> Option<u32> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        self.ids.get(&tag.to_uppercase()).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    pub(crate) fn from_pairs<const N: usize>(pairs: [(&str, u32); N]) -> Self {
        TeamTags {
            ids: pairs
                .into_iter()
                .map(|(tag, id)| (tag.to_string(), id))
                .collect(),
        }
    }
}
