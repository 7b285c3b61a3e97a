//! Greedy next-tile selection.
//!
//! [`TileSelector::select_next`] walks the nightly plan in order and returns the
//! first tile that can be reached and exposed inside its LST window, is clear
//! of the planets, sits below the airmass ceiling, has not been observed yet,
//! and suits the current Moon. There is no scoring: plan order is priority.

pub mod brightness;
pub mod window;

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult, ServiceError};
use crate::models::{
    MoonGeometry, NightPlan, ObservedSet, SelectedTile, Selection, SelectionContext, Tile, TileId,
};
use crate::overhead::{ra_offset, OverheadModel};
use crate::services::{
    AirmassService, AvoidanceService, BodyEphemeris, EphemerisMoon, MoonService,
    PlaneParallelAirmass, PlanetAvoidance,
};
use crate::site::Site;
use crate::time::mjd_to_lst;

pub use brightness::{brightness_compatible, SelectionThresholds};
pub use window::{lst_window_contains, EffectiveWindow};

/// What to do when a collaborator fails for one candidate tile.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceFailurePolicy {
    /// Treat the tile as ineligible and keep scanning.
    #[default]
    SkipTile,
    /// Stop the scan and return the failure.
    Abort,
}

/// Why a candidate was passed over.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Rejection {
    OutsideWindow,
    Observed,
    NearPlanet,
    Airmass(f64),
    Brightness,
    ServiceFailure,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OutsideWindow => f.write_str("outside LST window"),
            Rejection::Observed => f.write_str("already observed"),
            Rejection::NearPlanet => f.write_str("too close to a planet"),
            Rejection::Airmass(x) => write!(f, "airmass {:.2} above limit", x),
            Rejection::Brightness => f.write_str("incompatible with Moon"),
            Rejection::ServiceFailure => f.write_str("service failure"),
        }
    }
}

enum Verdict {
    Eligible(MoonGeometry),
    Rejected(Rejection),
}

/// Picks the next tile to observe from a [`NightPlan`].
pub struct TileSelector {
    site: Site,
    overhead: OverheadModel,
    thresholds: SelectionThresholds,
    failure_policy: ServiceFailurePolicy,
    avoidance: Box<dyn AvoidanceService>,
    airmass: Box<dyn AirmassService>,
    moon: Box<dyn MoonService>,
}

impl TileSelector {
    /// Selector at the default site with the reference constants.
    pub fn new(
        avoidance: Box<dyn AvoidanceService>,
        airmass: Box<dyn AirmassService>,
        moon: Box<dyn MoonService>,
    ) -> Self {
        Self {
            site: Site::default(),
            overhead: OverheadModel::default(),
            thresholds: SelectionThresholds::default(),
            failure_policy: ServiceFailurePolicy::default(),
            avoidance,
            airmass,
            moon,
        }
    }

    /// Wires planet avoidance, plane-parallel airmass and Moon geometry to one
    /// shared ephemeris backend.
    pub fn from_ephemeris<E: BodyEphemeris + 'static>(ephemeris: Arc<E>, site: Site) -> Self {
        let avoidance = PlanetAvoidance::new(Arc::clone(&ephemeris));
        let airmass = PlaneParallelAirmass::for_site(&site);
        let moon = EphemerisMoon::new(ephemeris, site.clone());
        Self::new(Box::new(avoidance), Box::new(airmass), Box::new(moon)).with_site(site)
    }

    /// Like [`TileSelector::from_ephemeris`], with every constant taken from
    /// `config`.
    pub fn from_config<E: BodyEphemeris + 'static>(
        config: &SchedulerConfig,
        ephemeris: Arc<E>,
    ) -> SchedulerResult<Self> {
        config.validate()?;
        let site = config.site.clone();
        let avoidance = PlanetAvoidance::new(Arc::clone(&ephemeris))
            .with_min_separation(Degrees::new(config.selection.min_planet_separation));
        let airmass = PlaneParallelAirmass::for_site(&site);
        let moon = EphemerisMoon::new(ephemeris, site.clone());

        Ok(
            Self::new(Box::new(avoidance), Box::new(airmass), Box::new(moon))
                .with_site(site)
                .with_overhead_model(config.overhead)
                .with_thresholds(config.selection.thresholds())
                .with_failure_policy(config.selection.failure_policy),
        )
    }

    pub fn with_site(mut self, site: Site) -> Self {
        self.site = site;
        self
    }

    pub fn with_overhead_model(mut self, overhead: OverheadModel) -> Self {
        self.overhead = overhead;
        self
    }

    pub fn with_thresholds(mut self, thresholds: SelectionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_failure_policy(mut self, policy: ServiceFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn overhead_model(&self) -> &OverheadModel {
        &self.overhead
    }

    pub fn thresholds(&self) -> &SelectionThresholds {
        &self.thresholds
    }

    pub fn failure_policy(&self) -> ServiceFailurePolicy {
        self.failure_policy
    }

    /// Returns the first eligible tile of `plan` at `context.mjd`.
    ///
    /// Running out of candidates is `Ok(Selection::NoEligibleTile)`. Errors are
    /// reserved for malformed input and, under [`ServiceFailurePolicy::Abort`],
    /// collaborator failures.
    pub fn select_next(
        &self,
        plan: &NightPlan,
        observed: &ObservedSet,
        context: &SelectionContext,
    ) -> SchedulerResult<Selection> {
        validate_context(context)?;
        plan.validate()?;

        if plan.is_empty() {
            info!("Empty plan at MJD {:.5}, nothing to select", context.mjd);
            return Ok(Selection::NoEligibleTile);
        }

        let lst = mjd_to_lst(context.mjd, self.site.longitude);
        debug!(
            "Scanning {} tiles at MJD {:.5} (LST {:.4} deg)",
            plan.len(),
            context.mjd,
            lst.value()
        );

        for tile in plan.iter() {
            let overhead = self.setup_time(tile, context);
            match self.evaluate(tile, lst, overhead, observed, context)? {
                Verdict::Eligible(moon) => {
                    info!(
                        "Selected tile {} (overhead {:.1} s, Moon {:.1} deg away at alt {:.1} deg)",
                        tile.id,
                        overhead.value(),
                        moon.distance.value(),
                        moon.altitude.value()
                    );
                    let selected = SelectedTile::from_tile(
                        tile,
                        &moon,
                        context.moon_fraction,
                        self.thresholds.reference_sn2,
                    );
                    return Ok(Selection::Selected {
                        tile: selected,
                        overhead,
                    });
                }
                Verdict::Rejected(reason) => {
                    debug!("Tile {} rejected: {}", tile.id, reason);
                }
            }
        }

        info!(
            "No eligible tile among {} at MJD {:.5} (LST {:.4} deg)",
            plan.len(),
            context.mjd,
            lst.value()
        );
        Ok(Selection::NoEligibleTile)
    }

    fn setup_time(&self, tile: &Tile, context: &SelectionContext) -> Seconds {
        let dra = ra_offset(tile.ra, context.previous.ra);
        let ddec = Degrees::new((tile.dec.value() - context.previous.dec.value()).abs());
        self.overhead.setup_time(context.slew, dra, ddec)
    }

    fn evaluate(
        &self,
        tile: &Tile,
        lst: Degrees,
        overhead: Seconds,
        observed: &ObservedSet,
        context: &SelectionContext,
    ) -> SchedulerResult<Verdict> {
        if !EffectiveWindow::for_tile(tile, overhead).contains(lst) {
            return Ok(Verdict::Rejected(Rejection::OutsideWindow));
        }
        if observed.contains(tile.id) {
            return Ok(Verdict::Rejected(Rejection::Observed));
        }

        let clear = self.avoidance.is_clear(context.mjd, tile.ra, tile.dec);
        match self.consult(tile.id, clear)? {
            Some(true) => {}
            Some(false) => return Ok(Verdict::Rejected(Rejection::NearPlanet)),
            None => return Ok(Verdict::Rejected(Rejection::ServiceFailure)),
        }

        let airmass = self.airmass.airmass(tile.ra, tile.dec, lst);
        match self.consult(tile.id, airmass)? {
            Some(x) if x < self.thresholds.max_airmass => {}
            Some(x) => return Ok(Verdict::Rejected(Rejection::Airmass(x))),
            None => return Ok(Verdict::Rejected(Rejection::ServiceFailure)),
        }

        let moon = self.moon.moon_position(context.mjd, tile.ra, tile.dec);
        let Some(moon) = self.consult(tile.id, moon)? else {
            return Ok(Verdict::Rejected(Rejection::ServiceFailure));
        };

        if !brightness_compatible(tile.conditions, &moon, context.moon_fraction, &self.thresholds) {
            return Ok(Verdict::Rejected(Rejection::Brightness));
        }

        Ok(Verdict::Eligible(moon))
    }

    /// Applies the failure policy to one collaborator answer.
    fn consult<T>(&self, tile: TileId, answer: Result<T, ServiceError>) -> SchedulerResult<Option<T>> {
        match answer {
            Ok(value) => Ok(Some(value)),
            Err(source) => match self.failure_policy {
                ServiceFailurePolicy::SkipTile => {
                    warn!("Skipping tile {}: {}", tile, source);
                    Ok(None)
                }
                ServiceFailurePolicy::Abort => Err(SchedulerError::Service { tile, source }),
            },
        }
    }
}

impl fmt::Debug for TileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileSelector")
            .field("site", &self.site)
            .field("overhead", &self.overhead)
            .field("thresholds", &self.thresholds)
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}

fn validate_context(context: &SelectionContext) -> SchedulerResult<()> {
    if !context.mjd.is_finite() {
        return Err(SchedulerError::InvalidContext(format!(
            "MJD is not finite ({})",
            context.mjd
        )));
    }
    if !(0.0..=1.0).contains(&context.moon_fraction) {
        return Err(SchedulerError::InvalidContext(format!(
            "moon fraction {} outside [0, 1]",
            context.moon_fraction
        )));
    }
    let (ra, dec) = (context.previous.ra.value(), context.previous.dec.value());
    if !ra.is_finite() || !(-90.0..=90.0).contains(&dec) {
        return Err(SchedulerError::InvalidContext(format!(
            "previous pointing ({}, {}) is not a sky position",
            ra, dec
        )));
    }
    Ok(())
}
