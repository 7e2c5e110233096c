use crate::error::Result;

/// Launches external programs (manager apps and the like).
///
/// Fire-and-forget: output is discarded and the exit status is never checked.
pub trait Launcher: Send + Sync + std::fmt::Debug {
    fn execute(&self, command: &str) -> Result<()>;
}
