//! Lazy proxy comparison
//!
//! Uninitialized proxies are compared by entity name and identifier and
//! are never loaded. Initialized proxies are replaced by their target.

use super::Comparator;
use crate::difference::Difference;
use crate::reflection::Traversal;
use fixturekit_core::{Result, Value};

/// Handles pairs where at least one side is a lazy proxy
#[derive(Debug, Default)]
pub struct LazyProxyComparator;

/// One side of the pair after unwrapping initialized proxies
enum Side {
    Unloaded { entity: String, identifier: Value },
    Loaded(Value),
}

impl Side {
    fn of(value: &Value) -> Side {
        if let Value::Lazy(proxy) = value {
            let proxy = proxy.borrow();
            return match proxy.target() {
                Some(target) => Side::Loaded(target.clone()),
                None => Side::Unloaded {
                    entity: proxy.entity_name().to_string(),
                    identifier: proxy.identifier().clone(),
                },
            };
        }
        Side::Loaded(value.clone())
    }
}

impl Comparator for LazyProxyComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        matches!(left, Value::Lazy(_)) || matches!(right, Value::Lazy(_))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
        root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        match (Side::of(left), Side::of(right)) {
            (
                Side::Unloaded {
                    entity: left_entity,
                    identifier: left_id,
                },
                Side::Unloaded {
                    entity: right_entity,
                    identifier: right_id,
                },
            ) => {
                if left_entity != right_entity {
                    return Ok(Some(Difference::class(left, right)));
                }
                compare_identifiers(left, right, &left_id, &right_id, root)
            }
            (Side::Unloaded { entity, identifier }, Side::Loaded(object)) => {
                compare_with_object(left, right, &entity, &identifier, &object, false, root)
            }
            (Side::Loaded(object), Side::Unloaded { entity, identifier }) => {
                compare_with_object(left, right, &entity, &identifier, &object, true, root)
            }
            (Side::Loaded(left_target), Side::Loaded(right_target)) => {
                root.get_difference(&left_target, &right_target, only_first_difference)
            }
        }
    }

    fn name(&self) -> &'static str {
        "lazy_proxy"
    }
}

fn compare_identifiers(
    left: &Value,
    right: &Value,
    left_id: &Value,
    right_id: &Value,
    root: &Traversal<'_>,
) -> Result<Option<Difference>> {
    if root.get_difference(left_id, right_id, true)?.is_none() {
        return Ok(None);
    }
    let message = format!(
        "Different identifiers. Left: {}, right: {}",
        left_id, right_id
    );
    Ok(Some(Difference::scalar(message, left, right)))
}

/// Uninitialized proxy against a plain value
///
/// The object must be an instance of the proxied entity and its identifier
/// field must equal the proxy identifier.
fn compare_with_object(
    left: &Value,
    right: &Value,
    entity: &str,
    proxy_id: &Value,
    object: &Value,
    proxy_on_right: bool,
    root: &Traversal<'_>,
) -> Result<Option<Difference>> {
    let Some(class) = object.class() else {
        return Ok(Some(Difference::class(left, right)));
    };
    if !class.is_subclass_of(entity) {
        return Ok(Some(Difference::class(left, right)));
    }
    let Some(id_field) = class.identifier_field() else {
        return Ok(Some(Difference::scalar(
            format!("No identifier field found for class {}", class.name()),
            left,
            right,
        )));
    };
    let object_id = object.field(id_field).unwrap_or_default();
    if proxy_on_right {
        compare_identifiers(left, right, &object_id, proxy_id, root)
    } else {
        compare_identifiers(left, right, proxy_id, &object_id, root)
    }
}
