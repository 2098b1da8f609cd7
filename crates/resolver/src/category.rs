//! Classification of host values into extraction categories.

use std::fmt;

use value_source_types::{IterHandle, Value};

use crate::config::ResolveOptions;
use crate::scope::TypeMatcher;

/// Extraction strategy chosen for a value. Exactly one applies to any input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Already an active iterator; returned as-is.
    AlreadySequence,
    /// Ordered sequence iterated by index.
    Indexable,
    /// Character text iterated by code point.
    Text,
    /// Key-value container iterated by value.
    MapLike,
    /// Set or fixed-width numeric buffer iterated in storage order.
    SetLikeOrBuffer,
    /// Structured record iterated by property value.
    GenericObject,
    /// Nothing to iterate.
    None,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AlreadySequence => "already_sequence",
            Category::Indexable => "indexable",
            Category::Text => "text",
            Category::MapLike => "map_like",
            Category::SetLikeOrBuffer => "set_like_or_buffer",
            Category::GenericObject => "generic_object",
            Category::None => "none",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the capability probe.
///
/// On the already-a-sequence path `cursor` holds the handle the probe found,
/// so dispatch forwards to that exact cursor without asking the host again.
pub(crate) struct Probe {
    pub(crate) category: Category,
    pub(crate) cursor: Option<IterHandle>,
}

/// Ordered capability probe; the first matching check wins.
///
/// 1. live iterators (including host objects exposing a cursor)
/// 2. arrays and text
/// 3. built-in maps, sets and buffers, then host types matched by tag
/// 4. records and host objects with a property view, when enabled
/// 5. everything else
pub(crate) fn probe_value(value: &Value, matcher: &TypeMatcher, options: &ResolveOptions) -> Probe {
    if let Some(cursor) = active_cursor(value) {
        return Probe {
            category: Category::AlreadySequence,
            cursor: Some(cursor),
        };
    }
    Probe {
        category: classify_passive(value, matcher, options),
        cursor: None,
    }
}

pub(crate) fn classify_value(value: &Value, matcher: &TypeMatcher, options: &ResolveOptions) -> Category {
    probe_value(value, matcher, options).category
}

fn classify_passive(value: &Value, matcher: &TypeMatcher, options: &ResolveOptions) -> Category {
    match value {
        Value::Array(_) => return Category::Indexable,
        Value::String(_) => return Category::Text,
        _ => {}
    }
    if let Some(category) = container_category(value, matcher) {
        return category;
    }
    if options.object_properties && has_property_view(value) {
        return Category::GenericObject;
    }
    Category::None
}

fn active_cursor(value: &Value) -> Option<IterHandle> {
    match value {
        Value::Iterator(handle) => Some(handle.clone()),
        Value::Host(host) => host.cursor(),
        _ => None,
    }
}

fn container_category(value: &Value, matcher: &TypeMatcher) -> Option<Category> {
    match value {
        Value::Map(_) => Some(Category::MapLike),
        Value::Set(_) | Value::Buffer(_) => Some(Category::SetLikeOrBuffer),
        Value::Host(host) => matcher.container_category(host.type_tag()),
        _ => None,
    }
}

fn has_property_view(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Host(host) => host.properties().is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::TypeScope;
    use value_source_types::{NumericBuffer, Record, Symbol};

    fn classify(value: &Value) -> Category {
        let options = ResolveOptions::default();
        classify_value(value, &TypeScope::builtin().matcher(&options), &options)
    }

    #[test]
    fn each_builtin_kind_lands_in_one_category() {
        assert_eq!(classify(&Value::from(IterHandle::from_values(Vec::new()))), Category::AlreadySequence);
        assert_eq!(classify(&Value::array(["a"])), Category::Indexable);
        assert_eq!(classify(&Value::from("hi")), Category::Text);
        assert_eq!(classify(&Value::map([("key", "value")])), Category::MapLike);
        assert_eq!(classify(&Value::set(["a"])), Category::SetLikeOrBuffer);
        assert_eq!(classify(&Value::from(NumericBuffer::from(vec![0i32]))), Category::SetLikeOrBuffer);
        assert_eq!(classify(&Value::from(Record::new().with("key", "value"))), Category::GenericObject);
    }

    #[test]
    fn primitives_are_none() {
        for value in [
            Value::Null,
            Value::Undefined,
            Value::from(42),
            Value::from(true),
            Value::BigInt(7),
            Value::from(Symbol::new("s")),
        ] {
            assert_eq!(classify(&value), Category::None, "{value:?}");
        }
    }

    #[test]
    fn records_fall_through_when_object_properties_disabled() {
        let options = ResolveOptions::default().with_object_properties(false);
        let matcher = TypeScope::builtin().matcher(&options);
        let record = Value::from(Record::new().with("key", "value"));
        assert_eq!(classify_value(&record, &matcher, &options), Category::None);
        assert_eq!(classify_value(&Value::array(["a"]), &matcher, &options), Category::Indexable);
    }

    #[test]
    fn probe_carries_the_live_cursor() {
        let handle = IterHandle::from_values(vec![Value::from("a")]);
        let options = ResolveOptions::default();
        let probe = probe_value(&Value::from(handle.clone()), &TypeScope::builtin().matcher(&options), &options);
        assert_eq!(probe.category, Category::AlreadySequence);
        assert!(probe.cursor.is_some_and(|cursor| cursor.ptr_eq(&handle)));

        let probe = probe_value(&Value::array(["a"]), &TypeScope::builtin().matcher(&options), &options);
        assert!(probe.cursor.is_none());
    }

    #[test]
    fn display_uses_snake_case() {
        assert_eq!(Category::SetLikeOrBuffer.to_string(), "set_like_or_buffer");
    }
}
