use crate::cli::PrepareArgs;
use crate::config;
use crate::error::{CliError, Result};
use scanbeam::engine::error::EngineError;
use scanbeam::workflows;
use tracing::info;

pub async fn run(args: PrepareArgs) -> Result<()> {
    let run_config = config::load(&args.config)?;
    info!("Loaded run options from {}", args.config.display());

    let report = workflows::prepare::run(&run_config, &args.template).map_err(|e| match e {
        EngineError::TemplateNotFound { path } => CliError::Config(format!(
            "could not find template '{}', try running `scanbeam init`",
            path.display()
        )),
        other => CliError::Core(other),
    })?;

    println!(
        "Wrote {} input files with {} histories each for a total of {} histories{}",
        report.written.len(),
        report.allocation.per_beamlet,
        report.allocation.total,
        if run_config.reflect {
            " (after reflection)"
        } else {
            ""
        }
    );
    Ok(())
}
