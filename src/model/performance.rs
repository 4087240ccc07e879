use serde::{Serialize, Serializer};

/// Identifies a game section of a series: a single map or the aggregate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameId {
    /// A played map, keyed by vlr.gg's per-map game id.
    Map(u32),
    /// The synthetic "All Maps" aggregate.
    All,
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GameId::Map(id) => serializer.serialize_u32(*id),
            GameId::All => serializer.serialize_str("All"),
        }
    }
}

/// The three kill-relationship tables shown on a performance tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MatrixKind {
    /// All kills.
    #[strum(serialize = "mod-normal")]
    Normal,
    /// First kills against first deaths.
    #[strum(serialize = "mod-fkfd")]
    FirstKillFirstDeath,
    /// Operator kills.
    #[strum(serialize = "mod-op")]
    Operator,
}

/// Performance statistics for a single map (or the "All Maps" aggregate).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPerformance {
    pub game_id: Option<GameId>,
    pub map_name: Option<String>,
    pub kill_matrix: Vec<KillMatrixEntry>,
    pub fkfd_matrix: Vec<KillMatrixEntry>,
    pub op_matrix: Vec<KillMatrixEntry>,
    pub player_performances: Vec<PlayerPerformance>,
}

impl MapPerformance {
    /// Whether any of the four collections carries data.
    pub fn has_data(&self) -> bool {
        !self.kill_matrix.is_empty()
            || !self.fkfd_matrix.is_empty()
            || !self.op_matrix.is_empty()
            || !self.player_performances.is_empty()
    }
}

/// One killer/victim pairing of a kill matrix.
///
/// `differential` is the value printed on the page; it is not recomputed
/// from `kills` and `deaths`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillMatrixEntry {
    pub killer_name: String,
    pub victim_name: String,
    pub killer_team_short: Option<String>,
    pub killer_team_id: Option<u32>,
    pub victim_team_short: Option<String>,
    pub victim_team_id: Option<u32>,
    pub kills: Option<u32>,
    pub deaths: Option<u32>,
    pub differential: Option<i32>,
}

/// A round in which the player got a multi-kill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiKillDetail {
    pub round_number: u32,
    pub players_killed: Vec<String>,
}

/// A round in which the player won a clutch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClutchDetail {
    pub round_number: u32,
    pub players_killed: Vec<String>,
}

/// A single round listed in a stat popover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundDetail {
    MultiKill(MultiKillDetail),
    Clutch(ClutchDetail),
}

impl RoundDetail {
    pub fn round_number(&self) -> u32 {
        match self {
            RoundDetail::MultiKill(d) => d.round_number,
            RoundDetail::Clutch(d) => d.round_number,
        }
    }

    pub fn players_killed(&self) -> &[String] {
        match self {
            RoundDetail::MultiKill(d) => &d.players_killed,
            RoundDetail::Clutch(d) => &d.players_killed,
        }
    }
}

/// Per-player multi-kill, clutch and economy stats for one map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerPerformance {
    pub name: String,
    pub team_short: Option<String>,
    pub team_id: Option<u32>,
    pub agent: Option<String>,
    pub multi_2k: Option<u32>,
    pub multi_3k: Option<u32>,
    pub multi_4k: Option<u32>,
    pub multi_5k: Option<u32>,
    pub clutch_1v1: Option<u32>,
    pub clutch_1v2: Option<u32>,
    pub clutch_1v3: Option<u32>,
    pub clutch_1v4: Option<u32>,
    pub clutch_1v5: Option<u32>,
    pub econ: Option<u32>,
    pub plants: Option<u32>,
    pub defuses: Option<u32>,
    pub multi_2k_details: Option<Vec<RoundDetail>>,
    pub multi_3k_details: Option<Vec<RoundDetail>>,
    pub multi_4k_details: Option<Vec<RoundDetail>>,
    pub multi_5k_details: Option<Vec<RoundDetail>>,
    pub clutch_1v1_details: Option<Vec<RoundDetail>>,
    pub clutch_1v2_details: Option<Vec<RoundDetail>>,
    pub clutch_1v3_details: Option<Vec<RoundDetail>>,
    pub clutch_1v4_details: Option<Vec<RoundDetail>>,
    pub clutch_1v5_details: Option<Vec<RoundDetail>>,
}
