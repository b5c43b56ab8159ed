use crate::cli::TranslateArgs;
use crate::config;
use crate::error::Result;
use scanbeam::workflows;
use tracing::info;

pub async fn run(args: TranslateArgs) -> Result<()> {
    let run_config = config::load(&args.config)?;
    info!("Loaded run options from {}", args.config.display());

    workflows::translate::run(&run_config).await?;

    println!(
        "Translated phase space files written to {}",
        run_config.translated_folder.display()
    );
    Ok(())
}
