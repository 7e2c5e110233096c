use crate::split_command;
use bar_core::{BarError, Launcher, Result};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Spawns commands as detached child processes.
///
/// Output is discarded and the exit status is only logged; a background
/// thread reaps the child so it never lingers as a zombie.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for ProcessLauncher {
    fn execute(&self, command: &str) -> Result<()> {
        let (program, args) = split_command(command)
            .ok_or_else(|| BarError::Invocation("empty command".into()))?;

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BarError::Invocation(format!("cannot launch '{program}': {e}")))?;

        debug!(command, pid = child.id(), "Launched");

        let command = command.to_string();
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                warn!(command = command.as_str(), "Failed to reap child: {e}");
            }
        });
        Ok(())
    }
}
