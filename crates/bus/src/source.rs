use crate::{
    connection::{BusKind, Buses},
    convert::{from_variant, to_variant},
};
use bar_core::{BarError, PropertySource, Result, Value};
use tracing::debug;
use zbus::blocking::{fdo::DBusProxy, Connection};
use zbus::names::BusName;
use zbus::zvariant::OwnedValue;
use zbus::DBusError;

const PROPERTIES_IFACE: &str = "org.freedesktop.DBus.Properties";

/// D-Bus errors meaning the service itself is unreachable, as opposed to a
/// bad property or method name.
const UNREACHABLE_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
    "org.freedesktop.DBus.Error.NoReply",
    "org.freedesktop.DBus.Error.Disconnected",
];

/// One remote object (`service` + `path`) on a message bus.
#[derive(Debug)]
pub struct DbusSource {
    conn:    Connection,
    service: String,
    path:    String,
    address: String,
}

impl DbusSource {
    /// Attach to `service` at `path` on the shared connection for `kind`.
    ///
    /// Fails with [`BarError::Connection`] if the bus cannot be reached, the
    /// names are malformed or nothing currently owns `service`.
    pub fn connect(buses: &Buses, kind: BusKind, service: &str, path: &str) -> Result<Self> {
        let name = BusName::try_from(service)
            .map_err(|e| BarError::Connection(format!("invalid service name '{service}': {e}")))?;
        zbus::zvariant::ObjectPath::try_from(path)
            .map_err(|e| BarError::Connection(format!("invalid object path '{path}': {e}")))?;

        let conn = buses.connection(kind)?;
        let owner = DBusProxy::new(&conn)
            .and_then(|proxy| proxy.get_name_owner(name).map_err(zbus::Error::from))
            .map_err(|e| BarError::Connection(format!("{kind}:{service} is not reachable: {e}")))?;
        debug!(bus = %kind, service, %owner, "Resolved service owner");

        Ok(Self {
            conn,
            service: service.to_string(),
            path:    path.to_string(),
            address: format!("{kind}:{service}{path}"),
        })
    }

    fn call<B>(
        &self,
        interface: &str,
        method: &str,
        body: &B,
        on_error: fn(String) -> BarError,
    ) -> Result<zbus::Message>
    where
        B: serde::ser::Serialize + zbus::zvariant::DynamicType,
    {
        self.conn
            .call_method(
                Some(self.service.as_str()),
                self.path.as_str(),
                Some(interface),
                method,
                body,
            )
            .map_err(|e| classify(&self.address, e, on_error))
    }
}

impl PropertySource for DbusSource {
    fn address(&self) -> &str {
        &self.address
    }

    fn get(&self, interface: &str, property: &str) -> Result<Value> {
        let reply = self.call(PROPERTIES_IFACE, "Get", &(interface, property), BarError::Property)?;
        let variant: OwnedValue = reply
            .body()
            .deserialize()
            .map_err(|e| BarError::Property(format!("{interface}.{property}: bad reply: {e}")))?;
        from_variant(&variant)
    }

    fn set(&self, interface: &str, property: &str, value: Value) -> Result<()> {
        let variant = to_variant(&value)?;
        self.call(
            PROPERTIES_IFACE,
            "Set",
            &(interface, property, variant),
            BarError::Property,
        )?;
        Ok(())
    }

    fn invoke(&self, interface: &str, method: &str, args: &[Value]) -> Result<()> {
        let inv = BarError::Invocation;
        match args {
            [] => self.call(interface, method, &(), inv),
            [Value::Bool(b)] => self.call(interface, method, &(*b,), inv),
            [Value::Int(n)] => self.call(interface, method, &(*n,), inv),
            [Value::Str(s)] => self.call(interface, method, &(s.as_str(),), inv),
            [Value::StrList(l)] => self.call(interface, method, &(l,), inv),
            _ => Err(BarError::Invocation(format!(
                "{interface}.{method}: unsupported argument list"
            ))),
        }?;
        Ok(())
    }
}

/// Map a zbus error onto the bar's taxonomy: unreachable services and broken
/// transports are connection errors, everything else uses `on_error`.
fn classify(address: &str, err: zbus::Error, on_error: fn(String) -> BarError) -> BarError {
    let unreachable = match &err {
        zbus::Error::InputOutput(_) => true,
        zbus::Error::MethodError(name, _, _) => is_unreachable(name.as_str()),
        zbus::Error::FDO(e) => is_unreachable(e.name().as_str()),
        _ => false,
    };
    if unreachable {
        BarError::Connection(format!("{address}: {err}"))
    } else {
        on_error(format!("{address}: {err}"))
    }
}

fn is_unreachable(error_name: &str) -> bool {
    UNREACHABLE_ERRORS.contains(&error_name)
}
