use crate::{error::Result, value::Value};

/// A remote object exposing named, typed properties and callable methods.
///
/// Every call goes to the remote side: implementations must not cache values
/// between calls.  A failed call is returned as-is; there is no retry.
pub trait PropertySource: Send + std::fmt::Debug {
    /// Human-readable address (service name and object path).
    fn address(&self) -> &str;

    fn get(&self, interface: &str, property: &str) -> Result<Value>;

    fn set(&self, interface: &str, property: &str, value: Value) -> Result<()>;

    fn invoke(&self, interface: &str, method: &str, args: &[Value]) -> Result<()>;
}
