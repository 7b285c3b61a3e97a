//! Survey tile selection for a fiber-fed spectroscopic survey.
//!
//! Given the nightly plan, the tiles already observed and where the telescope
//! points now, [`TileSelector::select_next`] answers which tile to observe next
//! and how long it takes to get there.
//!
//! ```no_run
//! use std::sync::Arc;
//! use surveysim_rust::prelude::*;
//!
//! # fn run(plan: NightPlan, ephemeris: NightlyEphemeris) -> SchedulerResult<()> {
//! let selector = TileSelector::from_ephemeris(Arc::new(ephemeris), Site::kitt_peak());
//! let context = SelectionContext::for_plan(&plan, 57_689.2, Pointing::from_degrees(10.0, 20.0), true);
//! match selector.select_next(&plan, &ObservedSet::new(), &context)? {
//!     Selection::Selected { tile, overhead } => println!("{} after {} s", tile.id, overhead.value()),
//!     Selection::NoEligibleTile => println!("nothing to observe"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod exposure;
pub mod geometry;
pub mod models;
pub mod overhead;
pub mod scheduler;
pub mod services;
pub mod site;
pub mod time;

pub use config::SchedulerConfig;
pub use error::{SchedulerError, SchedulerResult, ServiceError};
pub use models::{
    ConditionSet, MoonGeometry, NightPlan, ObservedSet, ObservingCondition, Pointing,
    SelectedTile, Selection, SelectionContext, Tile, TileId,
};
pub use overhead::OverheadModel;
pub use scheduler::{ServiceFailurePolicy, TileSelector};
pub use site::Site;

pub mod prelude {
    pub use crate::config::SchedulerConfig;
    pub use crate::error::{SchedulerError, SchedulerResult, ServiceError};
    pub use crate::models::*;
    pub use crate::overhead::OverheadModel;
    pub use crate::scheduler::{SelectionThresholds, ServiceFailurePolicy, TileSelector};
    pub use crate::services::{
        AirmassService, AvoidanceService, BodyEphemeris, EquatorialPosition, MoonService,
        NightlyEphemeris, SolarSystemBody,
    };
    pub use crate::site::Site;
    pub use qtty::{Degrees, Seconds};
}
