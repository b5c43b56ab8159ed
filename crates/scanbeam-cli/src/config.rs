use crate::error::{CliError, Result};
use scanbeam::engine::config::RunConfig;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_TITLE: &str = "scanning beam";
const DEFAULT_CONCURRENCY: usize = 8;

/// Options file as written on disk: every field optional so validation can
/// report all problems at once instead of stopping at the first. TOML
/// integers are accepted where floats are expected.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialRunConfig {
    beam_width: Option<f64>,
    beam_height: Option<f64>,
    beam_gap: Option<f64>,
    target_distance: Option<f64>,
    target_length: Option<f64>,
    target_angle: Option<f64>,
    histories: Option<u64>,
    reflect_later: Option<bool>,
    title: Option<String>,
    egsinp_folder: Option<PathBuf>,
    egsphsp_folder: Option<PathBuf>,
    translated_folder: Option<PathBuf>,
    beamdpr: Option<String>,
    concurrency: Option<usize>,
}

fn require<T: Default>(
    value: Option<T>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> T {
    value.unwrap_or_else(|| {
        missing.push(name);
        T::default()
    })
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading run options from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CliError::Config(format!(
                    "could not find '{}', try running `scanbeam init`",
                    path.display()
                ))
            } else {
                CliError::Io(e)
            }
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Checks every required field and applies defaults to the optional
    /// ones. Missing required fields are reported together in one error.
    pub fn validate(self) -> Result<RunConfig> {
        let mut missing = Vec::new();
        let config = RunConfig {
            beam_width: require(self.beam_width, "beam-width", &mut missing),
            beam_height: require(self.beam_height, "beam-height", &mut missing),
            beam_gap: require(self.beam_gap, "beam-gap", &mut missing),
            target_distance: require(self.target_distance, "target-distance", &mut missing),
            target_length: require(self.target_length, "target-length", &mut missing),
            target_angle: require(self.target_angle, "target-angle", &mut missing),
            histories: require(self.histories, "histories", &mut missing),
            reflect: self.reflect_later.unwrap_or(false),
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            egsinp_folder: self.egsinp_folder.unwrap_or_else(|| "egsinp".into()),
            egsphsp_folder: self.egsphsp_folder.unwrap_or_else(|| "egsphsp".into()),
            translated_folder: self
                .translated_folder
                .unwrap_or_else(|| "translated".into()),
            beamdpr: self.beamdpr.unwrap_or_else(|| "beamdpr".to_string()),
            concurrency: self.concurrency.unwrap_or(DEFAULT_CONCURRENCY),
        };
        if !missing.is_empty() {
            return Err(CliError::Config(format!(
                "missing required options: {}",
                missing.join(", ")
            )));
        }
        Ok(config)
    }
}

pub fn load(path: &Path) -> Result<RunConfig> {
    PartialRunConfig::from_file(path)?.validate()
}
