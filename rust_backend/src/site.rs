//! Observatory site constants.

use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// Geographic location of the telescope.
///
/// Longitude is east-positive. Missing fields deserialize to Kitt Peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub name: String,
    pub longitude: Degrees,
    pub latitude: Degrees,
    pub altitude_m: f64,
}

impl Site {
    /// Mayall 4 m telescope at Kitt Peak National Observatory
    /// (SLALIB `obs.c`, 1981 Almanac).
    pub fn kitt_peak() -> Self {
        Self {
            name: "Kitt Peak Mayall".to_string(),
            longitude: Degrees::new(-(111.0 + (35.0 + 57.61 / 60.0) / 60.0)),
            latitude: Degrees::new(31.0 + (57.0 + 50.3 / 60.0) / 60.0),
            altitude_m: 2120.0,
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::kitt_peak()
    }
}
