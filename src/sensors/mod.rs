//! Ground and standing-clearance sensors.
//!
//! Each sensor issues at most one physics query per tick.

mod ground;
mod obstacle;

pub use ground::{GROUND_SWEEP_RADIUS_FACTOR, GroundReport, check_ground};
pub use obstacle::can_stand_up;
