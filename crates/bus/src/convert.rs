//! Conversion between D-Bus variants and [`bar_core::Value`].

use bar_core::{BarError, Result, Value};
use std::collections::BTreeMap;
use zbus::zvariant::Value as Variant;

/// Convert a received D-Bus value.
///
/// Integers of every width collapse to [`Value::Int`]; object paths and
/// signatures become strings.  Arrays must hold strings and dictionaries must
/// be string-keyed.
pub fn from_variant(variant: &Variant<'_>) -> Result<Value> {
    let value = match variant {
        Variant::Bool(b)       => Value::Bool(*b),
        Variant::U8(n)         => Value::Int(i64::from(*n)),
        Variant::I16(n)        => Value::Int(i64::from(*n)),
        Variant::U16(n)        => Value::Int(i64::from(*n)),
        Variant::I32(n)        => Value::Int(i64::from(*n)),
        Variant::U32(n)        => Value::Int(i64::from(*n)),
        Variant::I64(n)        => Value::Int(*n),
        Variant::U64(n)        => Value::Int(i64::try_from(*n).map_err(|_| {
            BarError::Property(format!("integer {n} out of range"))
        })?),
        Variant::F64(f)        => Value::Str(f.to_string()),
        Variant::Str(s)        => Value::Str(s.as_str().to_string()),
        Variant::ObjectPath(p) => Value::Str(p.as_str().to_string()),
        Variant::Signature(s)  => Value::Str(s.to_string()),
        Variant::Value(inner)  => from_variant(inner)?,
        Variant::Array(array)  => {
            let mut items = Vec::new();
            for item in array.iter() {
                match from_variant(item)? {
                    Value::Str(s) => items.push(s),
                    other => {
                        return Err(BarError::Property(format!(
                            "unsupported array element type {}",
                            other.type_name()
                        )))
                    }
                }
            }
            Value::StrList(items)
        }
        Variant::Dict(dict) => {
            let mut map = BTreeMap::new();
            for (key, value) in dict.iter() {
                let Value::Str(key) = from_variant(key)? else {
                    return Err(BarError::Property("dictionary key is not a string".into()));
                };
                map.insert(key, from_variant(value)?);
            }
            Value::Map(map)
        }
        other => {
            return Err(BarError::Property(format!(
                "unsupported D-Bus type '{}'",
                other.value_signature()
            )))
        }
    };
    Ok(value)
}

/// Convert a value to send with `Properties.Set`.
pub fn to_variant(value: &Value) -> Result<Variant<'static>> {
    match value {
        Value::Bool(b)    => Ok(Variant::Bool(*b)),
        Value::Int(n)     => Ok(Variant::I64(*n)),
        Value::Str(s)     => Ok(Variant::from(s.clone())),
        Value::StrList(l) => Ok(Variant::from(l.clone())),
        Value::Map(_)     => Err(BarError::Property("cannot send a map value".into())),
    }
}
