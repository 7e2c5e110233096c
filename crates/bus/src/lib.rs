//! D-Bus backed [`PropertySource`](bar_core::PropertySource).
//!
//! Uses the blocking zbus API: modules poll from a blocking worker, never
//! from inside an async task.

pub mod connection;
pub mod convert;
pub mod source;

pub use connection::{BusKind, Buses};
pub use source::DbusSource;
