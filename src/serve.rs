//! Local preview of the deployment directory.
//!
//! Runs the configured static-file server through the platform shell with
//! the deployment directory as working directory, and blocks until it
//! exits. Ctrl-C reaches the server (same process group) and stops it; the
//! handler installed here only keeps this process alive long enough to
//! notice and report a clean exit.

use crate::toolchain::{HostPlatform, describe};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("nothing to serve, {0} does not exist (run `build` first)")]
    NotBuilt(PathBuf),
    #[error("cannot install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with {status}")]
    Failed {
        command: String,
        status: ExitStatus,
    },
}

/// How the server run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    Exited,
    Interrupted,
}

/// Serve `deploy_dir` with `command` until the server exits or the user
/// presses Ctrl-C.
pub fn serve(
    deploy_dir: &Path,
    command: &str,
    platform: HostPlatform,
) -> Result<ServeOutcome, ServeError> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
    run_server(deploy_dir, command, platform, &interrupted)
}

fn run_server(
    deploy_dir: &Path,
    command: &str,
    platform: HostPlatform,
    interrupted: &AtomicBool,
) -> Result<ServeOutcome, ServeError> {
    if !deploy_dir.is_dir() {
        return Err(ServeError::NotBuilt(deploy_dir.to_path_buf()));
    }

    let mut cmd = platform.shell(command);
    cmd.current_dir(deploy_dir);
    let command = describe(&cmd);
    log::debug!("running `{command}` in {}", deploy_dir.display());

    let status = cmd
        .status()
        .map_err(|source| ServeError::Spawn {
            command: command.clone(),
            source,
        })?;

    if interrupted.load(Ordering::SeqCst) || killed_by_interrupt(status) {
        return Ok(ServeOutcome::Interrupted);
    }
    if !status.success() {
        return Err(ServeError::Failed { command, status });
    }
    Ok(ServeOutcome::Exited)
}

/// The server died from Ctrl-C. Checked on its own because the handler
/// thread may not have set the flag yet when `status()` returns.
#[cfg(unix)]
fn killed_by_interrupt(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT) || status.code() == Some(128 + SIGINT)
}

/// `STATUS_CONTROL_C_EXIT`.
#[cfg(windows)]
fn killed_by_interrupt(status: ExitStatus) -> bool {
    status.code() == Some(0xC000013A_u32 as i32)
}

#[cfg(not(any(unix, windows)))]
fn killed_by_interrupt(_status: ExitStatus) -> bool {
    false
}
