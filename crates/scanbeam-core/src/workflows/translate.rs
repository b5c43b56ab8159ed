use crate::core::models::Beamlet;
use crate::engine::command::run_command;
use crate::engine::config::RunConfig;
use crate::engine::error::EngineError;
use crate::engine::positions;
use crate::workflows::PHASESPACE_EXT;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Translates every beamlet's phase space file by its lateral offset using
/// the external `beamdpr` tool.
///
/// Runs in two phases: first every expected input file is checked, so a
/// missing one aborts the run before any command is dispatched; then all
/// invocations are issued concurrently, bounded by `config.concurrency`
/// permits. The first failure aborts the remaining invocations and is
/// propagated once the join point resolves.
pub async fn run(config: &RunConfig) -> Result<(), EngineError> {
    info!("Attempting to translate phase spaces");
    let offsets =
        positions::generate_offsets(config.target_length, config.spacing(), config.reflect);
    let beamlets = Beamlet::sequence(&offsets);

    fs::create_dir_all(&config.translated_folder)?;

    let mut jobs: Vec<(f64, PathBuf, PathBuf)> = Vec::with_capacity(beamlets.len());
    for beamlet in &beamlets {
        let input = config
            .egsphsp_folder
            .join(format!("{}.{}", beamlet.index, PHASESPACE_EXT));
        if !input.exists() {
            error!(
                "Could not find expected input phase space file {}",
                input.display()
            );
            return Err(EngineError::MissingPhaseSpace { path: input });
        }
        let output = config
            .translated_folder
            .join(format!("{}.{}", beamlet.index, PHASESPACE_EXT));
        jobs.push((beamlet.offset, input, output));
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for (offset, input, output) in jobs {
        let semaphore = Arc::clone(&semaphore);
        let argv = vec![
            config.beamdpr.clone(),
            "translate".to_string(),
            input.to_string_lossy().into_owned(),
            output.to_string_lossy().into_owned(),
            "-y".to_string(),
            format!("({})", offset),
        ];
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| EngineError::Internal(format!("semaphore closed: {e}")))?;
            let output = run_command(&argv, None).await?;
            if !output.is_empty() {
                debug!("translator output: {}", output.trim_end());
            }
            Ok::<(), EngineError>(())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                // first failure wins; abort the siblings still running
                tasks.shutdown().await;
                return Err(e);
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                tasks.shutdown().await;
                return Err(EngineError::Internal(format!(
                    "translation task failed: {e}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir, beamdpr: &str) -> RunConfig {
        RunConfig {
            beam_width: 1.0,
            beam_height: 0.5,
            beam_gap: 1.0,
            target_distance: 100.0,
            target_length: 10.0,
            target_angle: 15.0,
            histories: 1000,
            reflect: false,
            title: "scan".to_string(),
            egsinp_folder: dir.path().join("egsinp"),
            egsphsp_folder: dir.path().join("egsphsp"),
            translated_folder: dir.path().join("translated"),
            beamdpr: beamdpr.to_string(),
            concurrency: 2,
        }
    }

    fn write_phase_spaces(config: &RunConfig, indices: &[usize]) {
        fs::create_dir_all(&config.egsphsp_folder).unwrap();
        for i in indices {
            fs::write(
                config
                    .egsphsp_folder
                    .join(format!("{i}.{PHASESPACE_EXT}")),
                b"stub",
            )
            .unwrap();
        }
    }

    #[tokio::test]
    async fn translates_every_beamlet_when_all_inputs_exist() {
        let dir = TempDir::new().unwrap();
        // 4 beamlets at offsets [-3, -1, 1, 3]; "true" ignores its arguments
        let config = config(&dir, "true");
        write_phase_spaces(&config, &[0, 1, 2, 3]);

        run(&config).await.unwrap();
        assert!(config.translated_folder.is_dir());
    }

    #[tokio::test]
    async fn missing_input_aborts_before_any_dispatch() {
        let dir = TempDir::new().unwrap();
        // a translator that would leave a marker if it ever ran
        let config = config(&dir, "touch");
        write_phase_spaces(&config, &[0, 1, 3]);

        let err = run(&config).await.unwrap_err();
        match err {
            EngineError::MissingPhaseSpace { path } => {
                assert!(path.ends_with(format!("2.{PHASESPACE_EXT}")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // nothing was launched, so `touch translate ...` created no file
        assert!(!PathBuf::from("translate").exists());
        let outputs: Vec<_> = fs::read_dir(&config.translated_folder)
            .unwrap()
            .collect();
        assert!(outputs.is_empty());
    }

    #[tokio::test]
    async fn failing_translator_surfaces_command_failure() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, "false");
        write_phase_spaces(&config, &[0, 1, 2, 3]);

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, EngineError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn first_failure_aborts_slow_siblings() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        let dir = TempDir::new().unwrap();
        // beamlet 0 fails immediately, every other beamlet would sleep far
        // longer than this test is willing to wait
        let script = dir.path().join("fake-translator");
        fs::write(
            &script,
            "#!/bin/sh\ncase \"$2\" in\n*/0.egsphsp1) exit 7 ;;\n*) sleep 30 ;;\nesac\n",
        )
        .unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();

        let mut config = config(&dir, &script.to_string_lossy());
        // every invocation gets a permit up front so the sleepers are
        // genuinely running when beamlet 0 fails
        config.concurrency = 4;
        write_phase_spaces(&config, &[0, 1, 2, 3]);

        let result = tokio::time::timeout(Duration::from_secs(10), run(&config))
            .await
            .expect("failing beamlet did not abort its sleeping siblings");
        assert!(matches!(
            result.unwrap_err(),
            EngineError::CommandFailed { .. }
        ));
    }

    #[tokio::test]
    async fn no_beamlets_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, "true");
        config.target_length = 1.0; // narrower than one beamlet
        run(&config).await.unwrap();
    }
}
