use crate::core::io::egsinp::{parse_egsinp, unparse_egsinp};
use crate::core::models::Beamlet;
use crate::engine::config::{HistoryAllocation, RunConfig};
use crate::engine::error::EngineError;
use crate::engine::{positions, templates};
use crate::workflows::EGSINP_EXT;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PrepareReport {
    pub allocation: HistoryAllocation,
    pub written: Vec<PathBuf>,
}

/// Emits one serialized simulation input per beamlet into the configured
/// output folder, named by zero-based index.
///
/// The base template is loaded once; every beamlet gets its own clone with
/// the shared run fields and its incidence direction applied, so no state
/// leaks between beamlets. Any write failure aborts the run and leaves the
/// files already written in place.
pub fn run(config: &RunConfig, template_path: &Path) -> Result<PrepareReport, EngineError> {
    let text = fs::read_to_string(template_path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            EngineError::TemplateNotFound {
                path: template_path.to_path_buf(),
            }
        } else {
            EngineError::Io(e)
        }
    })?;
    let mut base = parse_egsinp(&text)?;

    let offsets =
        positions::generate_offsets(config.target_length, config.spacing(), config.reflect);
    let allocation = HistoryAllocation::divide(config.histories, offsets.len(), config.reflect);
    info!(
        "Will generate {} templates with {} histories each for a total of {} histories",
        offsets.len(),
        allocation.per_beamlet,
        allocation.total
    );
    if config.reflect {
        info!("This total is after reflection");
    }

    templates::apply_run_settings(&mut base, config, allocation.per_beamlet);

    fs::create_dir_all(&config.egsinp_folder)?;
    let mut written = Vec::with_capacity(offsets.len());
    for beamlet in Beamlet::sequence(&offsets) {
        let mut doc = base.clone();
        templates::apply_beamlet(&mut doc, &beamlet, config.target_distance);
        let path = config
            .egsinp_folder
            .join(format!("{}.{}", beamlet.index, EGSINP_EXT));
        debug!("Writing to {}", path.display());
        fs::write(&path, unparse_egsinp(&doc))?;
        written.push(path);
    }

    Ok(PrepareReport { allocation, written })
}
