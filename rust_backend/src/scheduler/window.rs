//! LST visibility windows.
//!
//! A tile's nominal window `[lst_min, lst_max]` is shrunk at the front by the
//! setup time (the telescope must arrive before the window opens) and at the
//! back by the exposure length (the exposure must end before it closes).

use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

use crate::geometry::wrap_degrees;
use crate::models::Tile;
use crate::overhead::SIDEREAL_SECONDS_PER_DEGREE;

/// Wraparound-aware open-interval test on already-shifted bounds.
///
/// For `t1 <= t2` the window is `(t1, t2)`; for `t1 > t2` it wraps through 0
/// and is `(t1, 360) ∪ [0, t2)`.
pub fn lst_window_contains(lst: Degrees, t1: Degrees, t2: Degrees) -> bool {
    let (lst, t1, t2) = (lst.value(), t1.value(), t2.value());
    if t1 <= t2 {
        lst > t1 && lst < t2
    } else {
        lst > t1 || lst < t2
    }
}

/// Converts a duration to the LST arc it covers.
pub fn seconds_to_lst(duration: Seconds) -> Degrees {
    Degrees::new(duration.value() / SIDEREAL_SECONDS_PER_DEGREE)
}

/// The part of a tile's window in which it can still be started and finished.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveWindow {
    /// `lst_min` plus the setup arc, wrapped to `[0, 360)`.
    pub start: Degrees,
    /// `lst_max` minus the exposure arc, wrapped to `[0, 360)`.
    pub end: Degrees,
    /// Remaining arc length; zero or negative when nothing is left.
    pub length: Degrees,
}

impl EffectiveWindow {
    /// Shrinks `[lst_min, lst_max]` by `lead` at the front and `tail` at the back.
    ///
    /// The window length is measured along the circle, so `lst_min > lst_max`
    /// is a window through 0 and `lst_min == lst_max` is an empty one. A window
    /// shrunk past zero length stays empty instead of turning into its
    /// complement.
    pub fn new(lst_min: Degrees, lst_max: Degrees, lead: Degrees, tail: Degrees) -> Self {
        let nominal = (lst_max.value() - lst_min.value()).rem_euclid(360.0);
        Self {
            start: wrap_degrees(Degrees::new(lst_min.value() + lead.value())),
            end: wrap_degrees(Degrees::new(lst_max.value() - tail.value())),
            length: Degrees::new(nominal - lead.value() - tail.value()),
        }
    }

    /// Window of `tile` when reaching it costs `overhead`.
    pub fn for_tile(tile: &Tile, overhead: Seconds) -> Self {
        Self::new(
            tile.lst_min,
            tile.lst_max,
            seconds_to_lst(overhead),
            seconds_to_lst(tile.max_exposure),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.length.value() <= 0.0
    }

    /// Open-interval membership. A collapsed window whose shifted bounds end
    /// up with `start > end` contains nothing; it is not read as a window
    /// through 0.
    pub fn contains(&self, lst: Degrees) -> bool {
        !self.is_empty() && lst_window_contains(lst, self.start, self.end)
    }
}
