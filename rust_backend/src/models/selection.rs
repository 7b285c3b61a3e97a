//! Per-call selection inputs and the selector's answer.

use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

use super::plan::NightPlan;
use super::tile::{ConditionSet, Tile, TileId};

/// A telescope pointing in equatorial coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pointing {
    pub ra: Degrees,
    pub dec: Degrees,
}

impl Pointing {
    pub fn new(ra: Degrees, dec: Degrees) -> Self {
        Self { ra, dec }
    }

    pub fn from_degrees(ra: f64, dec: f64) -> Self {
        Self::new(Degrees::new(ra), Degrees::new(dec))
    }
}

impl From<&Tile> for Pointing {
    fn from(tile: &Tile) -> Self {
        Self::new(tile.ra, tile.dec)
    }
}

/// Moon position relative to a candidate pointing.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonGeometry {
    /// Angular distance between the Moon and the pointing.
    pub distance: Degrees,
    pub altitude: Degrees,
    pub azimuth: Degrees,
}

/// Transient state supplied fresh for each selection call.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Current time (UTC MJD).
    pub mjd: f64,
    /// Where the telescope points now.
    pub previous: Pointing,
    /// Whether the slew to the next tile costs time.
    pub slew: bool,
    /// Illuminated fraction of the Moon, in `[0, 1]`.
    pub moon_fraction: f64,
}

impl SelectionContext {
    pub fn new(mjd: f64, previous: Pointing, slew: bool, moon_fraction: f64) -> Self {
        Self {
            mjd,
            previous,
            slew,
            moon_fraction,
        }
    }

    /// Context using the Moon fraction recorded in the plan.
    pub fn for_plan(plan: &NightPlan, mjd: f64, previous: Pointing, slew: bool) -> Self {
        Self::new(mjd, previous, slew, plan.moon_fraction)
    }
}

/// The chosen tile, enriched with the conditions it was chosen under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTile {
    pub id: TileId,
    pub ra: Degrees,
    pub dec: Degrees,
    pub program: String,
    pub ebmv: f64,
    pub max_exposure: Seconds,
    pub conditions: ConditionSet,
    pub status: i32,
    pub moon_fraction: f64,
    pub moon_distance: Degrees,
    pub moon_altitude: Degrees,
    /// Reference S/N² the exposure calculator scales against.
    pub reference_sn2: f64,
    /// Realized exposure time; unknown until the tile is observed.
    pub exposure: Option<Seconds>,
    /// Realized S/N²; unknown until the tile is observed.
    pub observed_sn2: Option<f64>,
}

impl SelectedTile {
    pub fn from_tile(tile: &Tile, moon: &MoonGeometry, moon_fraction: f64, reference_sn2: f64) -> Self {
        Self {
            id: tile.id,
            ra: tile.ra,
            dec: tile.dec,
            program: tile.program.clone(),
            ebmv: tile.ebmv,
            max_exposure: tile.max_exposure,
            conditions: tile.conditions,
            status: tile.status,
            moon_fraction,
            moon_distance: moon.distance,
            moon_altitude: moon.altitude,
            reference_sn2,
            exposure: None,
            observed_sn2: None,
        }
    }

    pub fn pointing(&self) -> Pointing {
        Pointing::new(self.ra, self.dec)
    }
}

/// Outcome of one selection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// A tile was chosen; `overhead` is the setup time to reach it.
    Selected {
        tile: SelectedTile,
        overhead: Seconds,
    },
    /// No tile of the plan is observable right now.
    NoEligibleTile,
}

impl Selection {
    /// Setup time to reach the selected tile, or 0 s when nothing was chosen.
    pub fn overhead(&self) -> Seconds {
        match self {
            Selection::Selected { overhead, .. } => *overhead,
            Selection::NoEligibleTile => Seconds::new(0.0),
        }
    }

    pub fn tile(&self) -> Option<&SelectedTile> {
        match self {
            Selection::Selected { tile, .. } => Some(tile),
            Selection::NoEligibleTile => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }
}
