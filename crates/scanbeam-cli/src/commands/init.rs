use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

const DEFAULT_OPTIONS: &str = include_str!("../../assets/options.toml");
const DEFAULT_TEMPLATE: &str = include_str!("../../assets/template.egsinp");

fn write_default(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "'{}' already exists, pass --force to overwrite",
            path.display()
        )));
    }
    fs::write(path, content)?;
    info!("Wrote {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

pub async fn run(args: InitArgs) -> Result<()> {
    write_default(&args.config, DEFAULT_OPTIONS, args.force)?;
    write_default(&args.template, DEFAULT_TEMPLATE, args.force)?;
    Ok(())
}
