use std::path::PathBuf;

/// Immutable-after-load parameters for one run. Lengths are in cm, angles in
/// degrees. Loading and validation live with the caller; the engine only ever
/// reads these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub beam_width: f64,
    pub beam_height: f64,
    pub beam_gap: f64,
    pub target_distance: f64,
    pub target_length: f64,
    pub target_angle: f64,
    pub histories: u64,
    /// When set, only the positive side of the target is generated and the
    /// simulation is expected to reflect the other side by symmetry.
    pub reflect: bool,
    pub title: String,
    pub egsinp_folder: PathBuf,
    pub egsphsp_folder: PathBuf,
    pub translated_folder: PathBuf,
    /// Executable used to translate phase space files.
    pub beamdpr: String,
    /// Upper bound on simultaneously running translator processes.
    pub concurrency: usize,
}

impl RunConfig {
    /// Center-to-center distance between adjacent beamlets.
    pub fn spacing(&self) -> f64 {
        self.beam_width + self.beam_gap
    }
}

/// How the total history count is split across beamlets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryAllocation {
    /// Number of beamlets the simulation will see, counting the reflected
    /// side when the reflection optimization is on.
    pub beamlet_count: u64,
    pub per_beamlet: u64,
    pub total: u64,
}

impl HistoryAllocation {
    pub fn divide(histories: u64, generated: usize, reflect: bool) -> Self {
        let beamlet_count = generated as u64 * if reflect { 2 } else { 1 };
        let per_beamlet = if beamlet_count == 0 {
            0
        } else {
            histories / beamlet_count
        };
        Self {
            beamlet_count,
            per_beamlet,
            total: per_beamlet * beamlet_count,
        }
    }
}
