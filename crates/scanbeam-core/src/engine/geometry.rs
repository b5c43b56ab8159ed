use crate::core::models::DirectionCosines;

/// Computes the incidence direction for a beamlet at lateral offset `y`, seen
/// from a source `target_distance` away from the target center.
///
/// `u` is always non-positive (the beam points back toward the target along
/// the primary axis) and the sign of `v` tracks the sign of the offset, so
/// every beamlet's direction vector converges on the target center. An offset
/// of zero gives `v = 0` with no direction flip.
pub fn direction_cosines(offset: f64, target_distance: f64) -> DirectionCosines {
    let theta = (offset / target_distance).atan();
    let u = -theta.cos();
    let v = (1.0 - u * u).sqrt().copysign(offset);
    DirectionCosines { u, v }
}
