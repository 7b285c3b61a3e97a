//! Tiles of the nightly plan and the sky conditions they can be observed in.

use std::fmt;

use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

/// Survey-wide tile number (`TILEID` in the footprint tables).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(i64);

impl TileId {
    pub const fn new(value: i64) -> Self {
        TileId(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sky brightness class a tile may be observed under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObservingCondition {
    Dark,
    Gray,
    Bright,
}

impl ObservingCondition {
    pub const ALL: [ObservingCondition; 3] = [
        ObservingCondition::Dark,
        ObservingCondition::Gray,
        ObservingCondition::Bright,
    ];

    /// Bit used by the legacy integer mask (`DARK=1, GRAY=2, BRIGHT=4`).
    pub const fn bit(self) -> u8 {
        match self {
            ObservingCondition::Dark => 1,
            ObservingCondition::Gray => 2,
            ObservingCondition::Bright => 4,
        }
    }
}

impl fmt::Display for ObservingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObservingCondition::Dark => "DARK",
            ObservingCondition::Gray => "GRAY",
            ObservingCondition::Bright => "BRIGHT",
        };
        f.write_str(label)
    }
}

/// Set of [`ObservingCondition`]s a tile supports.
///
/// Serialized as a list of condition names, e.g. `["DARK", "GRAY"]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "Vec<ObservingCondition>",
    into = "Vec<ObservingCondition>"
)]
pub struct ConditionSet {
    bits: u8,
}

impl ConditionSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn only(condition: ObservingCondition) -> Self {
        Self {
            bits: condition.bit(),
        }
    }

    /// Builds a set from the legacy bitmask, ignoring unknown bits.
    pub fn from_bits(bits: u8) -> Self {
        let known = ObservingCondition::ALL
            .iter()
            .fold(0u8, |acc, c| acc | c.bit());
        Self { bits: bits & known }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub fn insert(&mut self, condition: ObservingCondition) {
        self.bits |= condition.bit();
    }

    pub fn with(mut self, condition: ObservingCondition) -> Self {
        self.insert(condition);
        self
    }

    pub const fn contains(&self, condition: ObservingCondition) -> bool {
        self.bits & condition.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ObservingCondition> + '_ {
        ObservingCondition::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }
}

impl FromIterator<ObservingCondition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = ObservingCondition>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ConditionSet::empty(), |set, c| set.with(c))
    }
}

impl From<Vec<ObservingCondition>> for ConditionSet {
    fn from(conditions: Vec<ObservingCondition>) -> Self {
        conditions.into_iter().collect()
    }
}

impl From<ConditionSet> for Vec<ObservingCondition> {
    fn from(set: ConditionSet) -> Self {
        set.iter().collect()
    }
}

/// One row of the nightly plan: a fixed sky pointing with its LST window.
///
/// `lst_min > lst_max` describes a window wrapping through 0°.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub ra: Degrees,
    pub dec: Degrees,
    pub lst_min: Degrees,
    pub lst_max: Degrees,
    pub max_exposure: Seconds,
    pub program: String,
    /// Median E(B-V) dust extinction over the tile.
    pub ebmv: f64,
    pub conditions: ConditionSet,
    pub status: i32,
}

impl Tile {
    /// Creates a DARK tile with no extinction, status `-1` (not yet observed).
    pub fn new(
        id: TileId,
        ra: Degrees,
        dec: Degrees,
        lst_min: Degrees,
        lst_max: Degrees,
        max_exposure: Seconds,
    ) -> Self {
        Self {
            id,
            ra,
            dec,
            lst_min,
            lst_max,
            max_exposure,
            program: "DARK".to_string(),
            ebmv: 0.0,
            conditions: ConditionSet::only(ObservingCondition::Dark),
            status: -1,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_ebmv(mut self, ebmv: f64) -> Self {
        self.ebmv = ebmv;
        self
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    pub fn supports(&self, condition: ObservingCondition) -> bool {
        self.conditions.contains(condition)
    }
}
