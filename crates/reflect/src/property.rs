//! Property access by dotted path

use fixturekit_core::{Error, Result, Value};

/// Resolve a dotted property path such as `address.city`
///
/// Each segment is a field name resolved through the class hierarchy of
/// an object, or a string key of a map. Initialized lazy proxies are
/// resolved through their target.
///
/// # Errors
///
/// Returns `Error::PropertyNotFound` when a segment does not exist, when a
/// null value or an uninitialized proxy is met before the last segment, or
/// when the path is empty.
pub fn property_value(object: &Value, path: &str) -> Result<Value> {
    let not_found = |reason: String| Error::PropertyNotFound {
        property: path.to_string(),
        object: object.to_string(),
        reason,
    };
    if path.is_empty() {
        return Err(not_found("empty property path".to_string()));
    }

    let mut current = object.clone();
    for segment in path.split('.') {
        current = unwrap_lazy(current).map_err(&not_found)?;
        let next = match &current {
            Value::Object(o) => {
                let object = o.borrow();
                if object.class().find_field(segment).is_none() {
                    return Err(not_found(format!(
                        "class {} has no field {}",
                        object.class().name(),
                        segment
                    )));
                }
                object.get(segment).cloned().unwrap_or_default()
            }
            Value::Map(m) => match m.borrow().get(&Value::from(segment)) {
                Some(value) => value.clone(),
                None => return Err(not_found(format!("map has no key {}", segment))),
            },
            Value::Null => {
                return Err(not_found(format!("null value before segment {}", segment)));
            }
            other => {
                return Err(not_found(format!(
                    "{} has no properties",
                    other.kind_name()
                )));
            }
        };
        current = next;
    }
    Ok(current)
}

fn unwrap_lazy(value: Value) -> std::result::Result<Value, String> {
    if let Value::Lazy(proxy) = &value {
        let proxy = proxy.borrow();
        return match proxy.target() {
            Some(target) => Ok(target.clone()),
            None => Err(format!(
                "proxy of {} is not initialized",
                proxy.entity_name()
            )),
        };
    }
    Ok(value)
}
