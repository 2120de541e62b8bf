//! External build collaborators: the fips build driver and the host shell.
//!
//! Nothing here compiles anything itself. The [`Toolchain`] trait is the
//! contract the deployer needs: "is the WebAssembly toolchain installed?"
//! and "generate + build this configuration". [`FipsToolchain`] answers by
//! probing the emscripten SDK directory and running the project's `fips`
//! script.

use crate::layout::Layout;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with {status}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
    },
    #[error("unsupported host platform: {0}")]
    UnsupportedPlatform(String),
}

/// Host operating system, in fips naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Osx,
    Linux,
    Win,
}

impl HostPlatform {
    pub fn detect() -> Result<Self, ToolchainError> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self, ToolchainError> {
        match os {
            "macos" => Ok(Self::Osx),
            "linux" => Ok(Self::Linux),
            "windows" => Ok(Self::Win),
            other => Err(ToolchainError::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Osx => "osx",
            Self::Linux => "linux",
            Self::Win => "win",
        }
    }

    /// The project's fips entry script.
    pub fn fips_script(self) -> &'static str {
        match self {
            Self::Win => "fips.cmd",
            Self::Osx | Self::Linux => "fips",
        }
    }

    /// A command that runs `command_line` through the platform shell.
    pub fn shell(self, command_line: &str) -> Command {
        let mut cmd = match self {
            Self::Win => {
                let mut c = Command::new("cmd");
                c.arg("/C");
                c
            }
            Self::Osx | Self::Linux => {
                let mut c = Command::new("sh");
                c.arg("-c");
                c
            }
        };
        cmd.arg(command_line);
        cmd
    }
}

/// Compiles the WebAssembly examples.
pub trait Toolchain {
    /// Whether the toolchain is installed. When it is not, the compile step
    /// and the artifact copies are skipped.
    fn is_available(&self) -> bool;

    /// Generate and build the given build configuration.
    fn build(&self, build_config: &str) -> Result<(), ToolchainError>;
}

/// Runs `./fips gen` and `./fips build` in the project directory.
#[derive(Debug, Clone)]
pub struct FipsToolchain {
    project_dir: PathBuf,
    sdk_dir: PathBuf,
    platform: HostPlatform,
}

impl FipsToolchain {
    pub fn new(layout: &Layout, platform: HostPlatform) -> Self {
        Self {
            project_dir: layout.project_dir.clone(),
            sdk_dir: layout.sdk_dir.clone(),
            platform,
        }
    }

    fn fips(&self, verb: &str, build_config: &str) -> Command {
        let mut cmd = Command::new(self.project_dir.join(self.platform.fips_script()));
        cmd.arg(verb).arg(build_config);
        cmd.current_dir(&self.project_dir);
        cmd
    }
}

impl Toolchain for FipsToolchain {
    fn is_available(&self) -> bool {
        self.sdk_dir.is_dir()
    }

    fn build(&self, build_config: &str) -> Result<(), ToolchainError> {
        run_command(self.fips("gen", build_config))?;
        run_command(self.fips("build", build_config))
    }
}

/// Render a command as `program arg1 arg2` for messages.
pub fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion with inherited stdio.
///
/// Returns an error on spawn failure or non-zero exit.
pub fn run_command(mut cmd: Command) -> Result<(), ToolchainError> {
    let command = describe(&cmd);
    log::debug!("running `{command}`");
    let status = cmd
        .status()
        .map_err(|source| ToolchainError::Spawn {
            command: command.clone(),
            source,
        })?;
    if !status.success() {
        return Err(ToolchainError::Failed { command, status });
    }
    Ok(())
}
