//! Bounded external-command execution.
//!
//! Every package-manager CLI the evaluator shells out to (`npm`, `go`, `gh`)
//! goes through [`run_command`]: synchronous from the caller's point of view,
//! capped by a timeout, and incapable of propagating an error. A failed or
//! missing tool degrades to a warning plus an unsuccessful [`CommandOutput`].

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::diagnostics::Diagnostics;

/// Default deadline for a single external command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn failure(stderr: String) -> Self {
        CommandOutput {
            success: false,
            stdout: String::new(),
            stderr,
        }
    }
}

/// Run `argv` to completion, capturing stdout/stderr as text.
///
/// `success` is true only on a zero exit status. Timeouts, missing
/// executables, and spawn failures are recorded as warnings on `diag` and
/// reported through the returned output; this function never errors.
pub async fn run_command(argv: &[&str], timeout: Duration, diag: &mut Diagnostics) -> CommandOutput {
    debug!(command = ?argv, timeout_s = timeout.as_secs(), "running external command");

    let mut command = Command::new(argv[0]);
    command
        .args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Ok(Err(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            diag.warn(format!("Command not found: {}", argv[0]));
            CommandOutput::failure(format!("Command not found: {}", argv[0]))
        }
        Ok(Err(err)) => {
            diag.warn(format!("Command failed: {} - {}", argv.join(" "), err));
            CommandOutput::failure(err.to_string())
        }
        Err(_) => {
            diag.warn(format!(
                "Command timed out after {}s: {}",
                timeout.as_secs(),
                argv.join(" ")
            ));
            CommandOutput::failure(format!("Timeout after {}s", timeout.as_secs()))
        }
    }
}
