//! The nightly plan handed to the selector and the set of completed tiles.

use std::collections::HashSet;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileId};
use crate::error::{SchedulerError, SchedulerResult};
use crate::geometry::wrap_degrees;

/// Half-width of a design LST window around the design hour angle.
pub const DESIGN_WINDOW_HALF_WIDTH_DEG: f64 = 15.0;

/// Ordered candidate tiles for one night.
///
/// Plan order is the tie-break priority: the selector takes the first eligible
/// tile, never a "better" later one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NightPlan {
    /// Illuminated fraction of the Moon for the night, in `[0, 1]`.
    pub moon_fraction: f64,
    pub tiles: Vec<Tile>,
}

impl NightPlan {
    /// Builds a plan and validates it.
    pub fn new(moon_fraction: f64, tiles: Vec<Tile>) -> SchedulerResult<Self> {
        let plan = Self {
            moon_fraction,
            tiles,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Checks the plan for values the selector cannot reason about.
    ///
    /// An empty plan is valid.
    pub fn validate(&self) -> SchedulerResult<()> {
        if !(0.0..=1.0).contains(&self.moon_fraction) {
            return Err(SchedulerError::InvalidPlan(format!(
                "moon fraction {} outside [0, 1]",
                self.moon_fraction
            )));
        }

        let mut seen = HashSet::with_capacity(self.tiles.len());
        for tile in &self.tiles {
            if !seen.insert(tile.id) {
                return Err(SchedulerError::InvalidPlan(format!(
                    "duplicate tile id {}",
                    tile.id
                )));
            }

            let numbers = [
                ("ra", tile.ra.value()),
                ("dec", tile.dec.value()),
                ("lst_min", tile.lst_min.value()),
                ("lst_max", tile.lst_max.value()),
                ("max_exposure", tile.max_exposure.value()),
                ("ebmv", tile.ebmv),
            ];
            if let Some((field, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
                return Err(SchedulerError::InvalidPlan(format!(
                    "tile {}: {} is not finite ({})",
                    tile.id, field, value
                )));
            }

            if !(-90.0..=90.0).contains(&tile.dec.value()) {
                return Err(SchedulerError::InvalidPlan(format!(
                    "tile {}: declination {} outside [-90, 90]",
                    tile.id,
                    tile.dec.value()
                )));
            }

            if tile.max_exposure.value() < 0.0 {
                return Err(SchedulerError::InvalidPlan(format!(
                    "tile {}: negative max exposure {}",
                    tile.id,
                    tile.max_exposure.value()
                )));
            }
        }

        Ok(())
    }
}

/// Tiles completed so far in the survey.
///
/// The selector only reads it; callers add the tile they just observed before
/// asking for the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedSet {
    ids: HashSet<TileId>,
}

impl ObservedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the tile was already recorded.
    pub fn insert(&mut self, id: TileId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<TileId> for ObservedSet {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<TileId> for ObservedSet {
    fn extend<I: IntoIterator<Item = TileId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

/// Design LST window of a tile from the airmass it should be observed at.
///
/// The design hour angle solves `1/X = sin φ sin δ + cos φ cos δ cos H`; the
/// cosine is clamped so unreachable airmasses pin the window to the meridian
/// or the anti-meridian. The window spans ±15° around `RA + H` and is returned
/// as `(lst_min, lst_max)` wrapped to `[0, 360)`.
pub fn design_lst_window(
    ra: Degrees,
    dec: Degrees,
    design_airmass: f64,
    latitude: Degrees,
) -> (Degrees, Degrees) {
    let phi = latitude.value().to_radians();
    let delta = dec.value().to_radians();

    let cos_ha = ((1.0 / design_airmass) - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());
    let hour_angle = cos_ha.clamp(-1.0, 1.0).acos().to_degrees();

    let centre = ra.value() + hour_angle;
    let lst_min = wrap_degrees(Degrees::new(centre - DESIGN_WINDOW_HALF_WIDTH_DEG));
    let lst_max = wrap_degrees(Degrees::new(centre + DESIGN_WINDOW_HALF_WIDTH_DEG));
    (lst_min, lst_max)
}
