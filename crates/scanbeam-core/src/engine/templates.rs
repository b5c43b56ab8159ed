use crate::core::io::egsinp::EgsinpDocument;
use crate::core::models::Beamlet;
use crate::engine::config::RunConfig;
use crate::engine::geometry;

/// Sets the template fields that are the same for every beamlet of a run:
/// the per-beamlet history count, the half beam dimensions, the clamped tube
/// radius, the anode angle, and the title.
pub fn apply_run_settings(doc: &mut EgsinpDocument, config: &RunConfig, per_beamlet: u64) {
    doc.ncase = per_beamlet;
    doc.ybeam = config.beam_width / 2.0;
    doc.zbeam = config.beam_height / 2.0;
    doc.title = config.title.clone();
    if let Some(xtube) = doc.cms.first_mut() {
        // the tube may not extend past the target
        xtube.rmax_cm = xtube.rmax_cm.min(config.target_length / 2.0);
        xtube.angelei = Some(config.target_angle);
    }
}

/// Sets the incidence direction for one beamlet.
pub fn apply_beamlet(doc: &mut EgsinpDocument, beamlet: &Beamlet, target_distance: f64) {
    let cosines = geometry::direction_cosines(beamlet.offset, target_distance);
    doc.uinc = cosines.u;
    doc.vinc = cosines.v;
}
