use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum CommandFailure {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("{program} exited with {status}: {stderr}")]
    Exited {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Runs `command` to completion. The child is killed if `timeout` elapses
/// first or the returned future is dropped.
pub async fn run_with_timeout(
    mut command: Command,
    timeout: Duration,
) -> Result<Output, CommandFailure> {
    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command.spawn().map_err(|source| CommandFailure::Spawn {
        program: program.clone(),
        source,
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => return Err(CommandFailure::Spawn { program, source }),
        Err(_) => return Err(CommandFailure::TimedOut { program, timeout }),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CommandFailure::Exited {
            program,
            status: output.status,
            stderr,
        });
    }

    Ok(output)
}

/// True when `binary` can be spawned. Some tools exit non-zero for their help
/// flag, so only `require_success` callers look at the exit status.
pub async fn binary_responds(binary: &str, args: &[&str], require_success: bool) -> bool {
    let status = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status();

    match tokio::time::timeout(Duration::from_secs(5), status).await {
        Ok(Ok(status)) => !require_success || status.success(),
        _ => false,
    }
}
