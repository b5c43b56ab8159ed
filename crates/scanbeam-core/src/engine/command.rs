use crate::engine::error::EngineError;
use std::io::{ErrorKind, Read};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info};

/// Runs an external command to completion, capturing its combined standard
/// output and standard error as text.
///
/// Both streams share one pipe, so the captured text preserves the order in
/// which the child emitted it. Input bytes are fed to the child's stdin
/// concurrently with output collection; a child that fills its output pipe
/// before reading stdin cannot deadlock the runner.
///
/// A zero exit status yields the captured text. A non-zero exit status fails
/// with [`EngineError::CommandFailed`] carrying the rendered command line and
/// the captured output; failures are never retried here. No timeout is
/// imposed, but the child is configured with `kill_on_drop` so a cancelled
/// caller reaps it.
pub async fn run_command(argv: &[String], input: Option<&[u8]>) -> Result<String, EngineError> {
    let rendered = argv.join(" ");
    info!("Running \"{}\"", rendered);

    let (reader, writer) = std::io::pipe()?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| EngineError::Internal("empty command".to_string()))?;
    let mut command = Command::new(program);
    command
        .args(args)
        .stdout(writer.try_clone()?)
        .stderr(writer)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .kill_on_drop(true);

    let mut child = command.spawn()?;
    // the command object still holds copies of the write end; they must go
    // away or the reader never sees EOF
    drop(command);

    let stdin_pipe = child.stdin.take();
    let feed_stdin = async {
        if let (Some(mut pipe), Some(bytes)) = (stdin_pipe, input) {
            // a child that exits without consuming its input is not an error
            match pipe.write_all(bytes).await {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
        }
        Ok(())
    };
    let collect_output = tokio::task::spawn_blocking(move || {
        let mut reader = reader;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok::<_, std::io::Error>(bytes)
    });

    let (fed, collected, status) = tokio::join!(feed_stdin, collect_output, child.wait());
    fed?;
    let status = status?;
    let bytes = collected
        .map_err(|e| EngineError::Internal(format!("output collector failed: {e}")))??;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    if status.success() {
        Ok(text)
    } else {
        error!("Command failed: \"{}\"", rendered);
        error!("{}", text);
        Err(EngineError::CommandFailed {
            command: rendered,
            output: text,
        })
    }
}
