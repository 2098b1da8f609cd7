//! # Value Source
//!
//! One lazy, single-pass sequence over "the values of X", whatever X is.
//!
//! The resolver classifies a [`Value`] into exactly one [`Category`] with an
//! ordered capability probe and hands back a [`Sequence`] built by the
//! matching adapter:
//!
//! | input | category | yields |
//! |-------|----------|--------|
//! | live iterator | `AlreadySequence` | the same cursor, unchanged |
//! | array | `Indexable` | items in index order |
//! | string | `Text` | one string per code point |
//! | map | `MapLike` | values only, insertion order |
//! | set, numeric buffer | `SetLikeOrBuffer` | elements in storage order |
//! | record | `GenericObject` | property values, canonical order |
//! | anything else | `None` | nothing |
//!
//! Caller-defined [`HostObject`] types join the map/set/array paths by tag,
//! either registered on a [`TypeScope`] at setup time or named per call in
//! [`ResolveOptions`].
//!
//! ## Usage
//!
//! ```rust
//! use value_source::{ResolveOptions, Value, resolve, resolve_with};
//! use value_source::types::Record;
//!
//! let map = Value::map([("key", "value")]);
//! let values: Vec<Value> = resolve(&map).collect::<anyhow::Result<_>>()?;
//! assert_eq!(values, vec![Value::from("value")]);
//!
//! let record = Value::from(Record::new().with("shown", 1).with_hidden("hidden", 2));
//! let options = ResolveOptions::default().with_non_enumerable(true);
//! assert_eq!(resolve_with(&record, &options).count(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Resolving never fails. The only error a sequence can produce is a fault
//! raised by a live iterator's own pull, which is passed through unchanged.

mod category;
pub mod config;
mod ext;
mod resolver;
mod scope;
mod sequence;

pub use value_source_types as types;
pub use value_source_types::{ElementSource, HostObject, IterHandle, TypeTag, Value};

pub use category::Category;
pub use config::{ConfigError, ResolveOptions, TypeRef, TypeRefs, load_options, load_options_from_path};
pub use ext::ValuesExt;
pub use resolver::Resolver;
pub use scope::TypeScope;
pub use sequence::Sequence;

/// Resolves `value` with default options against the built-in scope.
pub fn resolve(value: &Value) -> Sequence<'_> {
    resolver::resolve_in(TypeScope::builtin(), value, &ResolveOptions::default())
}

/// Resolves `value` with explicit options against the built-in scope.
///
/// Names in `options` can only refer to built-in types here; use a
/// [`Resolver`] with its own [`TypeScope`] to name caller-defined types.
pub fn resolve_with<'a>(value: &'a Value, options: &ResolveOptions) -> Sequence<'a> {
    resolver::resolve_in(TypeScope::builtin(), value, options)
}

/// Category `value` would be resolved as, with the given options.
pub fn classify(value: &Value, options: &ResolveOptions) -> Category {
    resolver::classify_in(TypeScope::builtin(), value, options)
}
