//! Standing clearance detection.

use crate::backend::PhysicsQuery;
use crate::config::ControllerConfig;
use crate::state::StandingClearanceMarker;

/// Whether the character has room to stand up.
///
/// Without a clearance marker the check is disabled and always passes.
/// Otherwise a sphere overlap at the marker collects colliders; the
/// character's own colliders and triggers are ignored, and any remaining
/// collider whose bottom is lower than `marker_y + min_clearance` blocks
/// standing.
///
/// Takes everything by shared reference, so it can be called outside the tick
/// (for example to draw a clearance indicator) without changing state.
pub fn can_stand_up<P: PhysicsQuery + ?Sized>(
    physics: &P,
    marker: Option<&StandingClearanceMarker>,
    config: &ControllerConfig,
) -> bool {
    let Some(marker) = marker else {
        return true;
    };

    let center = marker.position(physics.position());
    let ceiling = center.y + config.sensors.min_clearance;

    !physics
        .overlap_sphere(
            center,
            config.sensors.obstacle_check_radius,
            config.sensors.obstacle_layers,
        )
        .iter()
        .filter(|hit| hit.is_blocking_candidate())
        .any(|hit| hit.lower_bound < ceiling)
}
