use bar_core::{BarError, Result};
use std::fmt;
use std::sync::Mutex;
use tracing::info;
use zbus::blocking::Connection;

/// Which message bus a service lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusKind {
    /// System-wide bus (bluez, NetworkManager, …).
    System,
    /// Per-login-session bus (media players, notifications, …).
    Session,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System  => f.write_str("system"),
            Self::Session => f.write_str("session"),
        }
    }
}

/// Lazily opened, process-wide bus connections: one per [`BusKind`].
///
/// Connections are cheap handles; every module gets its own clone and queries
/// it independently.
#[derive(Default)]
pub struct Buses {
    system:  Mutex<Option<Connection>>,
    session: Mutex<Option<Connection>>,
}

impl Buses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared connection for `kind`, opening it on first use.
    pub fn connection(&self, kind: BusKind) -> Result<Connection> {
        let slot = match kind {
            BusKind::System  => &self.system,
            BusKind::Session => &self.session,
        };
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = match kind {
            BusKind::System  => Connection::system(),
            BusKind::Session => Connection::session(),
        }
        .map_err(|e| BarError::Connection(format!("cannot open {kind} bus: {e}")))?;

        info!(bus = %kind, "Connected to D-Bus");
        *guard = Some(conn.clone());
        Ok(conn)
    }
}

impl fmt::Debug for Buses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = |slot: &Mutex<Option<Connection>>| {
            slot.lock().map(|g| g.is_some()).unwrap_or(false)
        };
        f.debug_struct("Buses")
            .field("system", &open(&self.system))
            .field("session", &open(&self.session))
            .finish()
    }
}
