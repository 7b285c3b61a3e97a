//! Data model of the tile selector.
//!
//! - [`tile`]: plan rows and their observing conditions
//! - [`plan`]: the ordered nightly plan and the observed-tile set
//! - [`selection`]: per-call context and the selection outcome

pub mod plan;
pub mod selection;
pub mod tile;

pub use plan::*;
pub use selection::*;
pub use tile::*;
