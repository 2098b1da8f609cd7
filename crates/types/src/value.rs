//! The dynamic host value.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::{HostObject, IterHandle, NumericBuffer, Record, Symbol, TypeTag, builtin};

/// A runtime value of arbitrary shape.
///
/// Equality and hashing follow SameValueZero: primitives compare by value
/// (`NaN` equals `NaN`, `+0` equals `-0`) and every reference kind compares by
/// identity of its shared allocation. That makes `Value` usable as a map key
/// or set element.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Symbol(Symbol),
    String(String),
    Array(Arc<Vec<Value>>),
    Map(Arc<IndexMap<Value, Value>>),
    Set(Arc<IndexSet<Value>>),
    Buffer(Arc<NumericBuffer>),
    Object(Arc<Record>),
    Host(Arc<dyn HostObject>),
    Iterator(IterHandle),
}

impl Value {
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a map; a repeated key keeps its first position and last value.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(Arc::new(
            entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        ))
    }

    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Set(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    pub fn host(host: impl HostObject + 'static) -> Self {
        Value::Host(Arc::new(host))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Runtime type of a reference value; `None` for primitives.
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Value::Array(_) => Some(builtin::array().clone()),
            Value::Map(_) => Some(builtin::map().clone()),
            Value::Set(_) => Some(builtin::set().clone()),
            Value::Buffer(buffer) => Some(builtin::buffer(buffer.kind()).clone()),
            Value::Object(_) => Some(builtin::object().clone()),
            Value::Host(host) => Some(host.type_tag().clone()),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::Symbol(_) => "symbol",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Buffer(buffer) => buffer.kind().name(),
            Value::Object(_) => "object",
            Value::Host(host) => host.type_tag().name(),
            Value::Iterator(_) => "iterator",
        }
    }
}

fn same_number(left: f64, right: f64) -> bool {
    (left.is_nan() && right.is_nan()) || left == right
}

fn number_hash_bits(number: f64) -> u64 {
    if number.is_nan() {
        f64::NAN.to_bits()
    } else if number == 0.0 {
        0.0f64.to_bits()
    } else {
        number.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Number(left), Value::Number(right)) => same_number(*left, *right),
            (Value::BigInt(left), Value::BigInt(right)) => left == right,
            (Value::Symbol(left), Value::Symbol(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Array(left), Value::Array(right)) => Arc::ptr_eq(left, right),
            (Value::Map(left), Value::Map(right)) => Arc::ptr_eq(left, right),
            (Value::Set(left), Value::Set(right)) => Arc::ptr_eq(left, right),
            (Value::Buffer(left), Value::Buffer(right)) => Arc::ptr_eq(left, right),
            (Value::Object(left), Value::Object(right)) => Arc::ptr_eq(left, right),
            (Value::Host(left), Value::Host(right)) => std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right)),
            (Value::Iterator(left), Value::Iterator(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {}
            Value::Bool(flag) => flag.hash(state),
            Value::Number(number) => number_hash_bits(*number).hash(state),
            Value::BigInt(number) => number.hash(state),
            Value::Symbol(symbol) => symbol.hash(state),
            Value::String(text) => text.hash(state),
            Value::Array(items) => (Arc::as_ptr(items) as usize).hash(state),
            Value::Map(entries) => (Arc::as_ptr(entries) as usize).hash(state),
            Value::Set(items) => (Arc::as_ptr(items) as usize).hash(state),
            Value::Buffer(buffer) => (Arc::as_ptr(buffer) as usize).hash(state),
            Value::Object(record) => (Arc::as_ptr(record) as usize).hash(state),
            Value::Host(host) => (Arc::as_ptr(host) as *const () as usize).hash(state),
            Value::Iterator(handle) => handle.addr().hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::BigInt(number) => write!(f, "{number}n"),
            Value::Symbol(symbol) => write!(f, "{symbol:?}"),
            Value::String(text) => write!(f, "{text:?}"),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Map(entries) => f.debug_map().entries(entries.iter()).finish(),
            Value::Set(items) => f.debug_set().entries(items.iter()).finish(),
            Value::Buffer(buffer) => write!(f, "{}({})", buffer.kind(), buffer.len()),
            Value::Object(record) => write!(f, "{record:?}"),
            Value::Host(host) => write!(f, "{host:?}"),
            Value::Iterator(handle) => write!(f, "{handle:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Value::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Value::Number(f64::from(number))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<char> for Value {
    fn from(character: char) -> Self {
        Value::String(character.to_string())
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(Arc::new(record))
    }
}

impl From<NumericBuffer> for Value {
    fn from(buffer: NumericBuffer) -> Self {
        Value::Buffer(Arc::new(buffer))
    }
}

impl From<IterHandle> for Value {
    fn from(handle: IterHandle) -> Self {
        Value::Iterator(handle)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// JSON objects become records whose properties are all own and enumerable.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => number.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => Value::array(items),
            serde_json::Value::Object(map) => map
                .into_iter()
                .fold(Record::new(), |record, (key, value)| record.with(key, Value::from(value)))
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_use_same_value_zero() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Number(0.0), Value::Number(-0.0));
        assert_ne!(Value::Number(1.0), Value::BigInt(1));
    }

    #[test]
    fn reference_values_compare_by_identity() {
        let first = Value::array(["a"]);
        let second = Value::array(["a"]);
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn set_deduplicates_primitives_in_insertion_order() {
        let Value::Set(items) = Value::set(["b", "a", "b"]) else {
            panic!("expected set");
        };
        let collected: Vec<&Value> = items.iter().collect();
        assert_eq!(collected, vec![&Value::from("b"), &Value::from("a")]);
    }

    #[test]
    fn map_keys_accept_any_value() {
        let key = Value::array([1]);
        let Value::Map(entries) = Value::map([(key.clone(), "by-ref"), (Value::from(1), "by-number")]) else {
            panic!("expected map");
        };
        assert_eq!(entries.get(&key), Some(&Value::from("by-ref")));
        assert_eq!(entries.get(&Value::Number(1.0)), Some(&Value::from("by-number")));
    }

    #[test]
    fn json_objects_become_records() {
        let value = Value::from(json!({"key": "value", "list": [1, 2], "nothing": null}));
        let Value::Object(record) = value else {
            panic!("expected object");
        };
        assert_eq!(record.get("key"), Some(&Value::from("value")));
        assert!(matches!(record.get("list"), Some(Value::Array(items)) if items.len() == 2));
        assert_eq!(record.get("nothing"), Some(&Value::Null));
    }

    #[test]
    fn json_objects_keep_document_order() {
        let value = Value::from(json!({"zeta": "first", "alpha": "second", "mid": "third"}));
        let Value::Object(record) = value else {
            panic!("expected object");
        };
        let names: Vec<&str> = record.ordered_properties().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn primitives_have_no_type_tag() {
        assert!(Value::from(1).type_tag().is_none());
        assert!(Value::from("text").type_tag().is_none());
        assert_eq!(Value::set(Vec::<Value>::new()).type_tag().as_ref(), Some(builtin::set()));
    }
}
