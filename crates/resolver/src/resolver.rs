//! Classification plus dispatch to the matching extraction adapter.

use tracing::{trace, warn};
use value_source_types::{HostObject, Value};

use crate::category::{Category, Probe, classify_value, probe_value};
use crate::config::ResolveOptions;
use crate::scope::TypeScope;
use crate::sequence::Sequence;

/// Resolver bound to an ambient [`TypeScope`] and default options.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    scope: TypeScope,
    options: ResolveOptions,
}

impl Resolver {
    pub fn new(scope: TypeScope, options: ResolveOptions) -> Self {
        Self { scope, options }
    }

    pub fn with_scope(scope: TypeScope) -> Self {
        Self::new(scope, ResolveOptions::default())
    }

    pub fn scope(&self) -> &TypeScope {
        &self.scope
    }

    /// Setup-time access for registering types.
    pub fn scope_mut(&mut self) -> &mut TypeScope {
        &mut self.scope
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn classify(&self, value: &Value) -> Category {
        self.classify_with(value, &self.options)
    }

    pub fn classify_with(&self, value: &Value, options: &ResolveOptions) -> Category {
        classify_in(&self.scope, value, options)
    }

    pub fn resolve<'a>(&self, value: &'a Value) -> Sequence<'a> {
        self.resolve_with(value, &self.options)
    }

    pub fn resolve_with<'a>(&self, value: &'a Value, options: &ResolveOptions) -> Sequence<'a> {
        resolve_in(&self.scope, value, options)
    }
}

pub(crate) fn classify_in(scope: &TypeScope, value: &Value, options: &ResolveOptions) -> Category {
    let matcher = scope.matcher(options);
    classify_value(value, &matcher, options)
}

pub(crate) fn resolve_in<'a>(scope: &TypeScope, value: &'a Value, options: &ResolveOptions) -> Sequence<'a> {
    let Probe { category, cursor } = probe_value(value, &scope.matcher(options), options);
    trace!(kind = value.kind_name(), category = %category, "value classified");
    if let Some(handle) = cursor {
        return Sequence::shared(handle);
    }
    match (category, value) {
        (Category::Indexable, Value::Array(items)) => Sequence::items(items),
        (Category::Text, Value::String(text)) => Sequence::chars(text),
        (Category::MapLike, Value::Map(entries)) => Sequence::map_values(entries.values()),
        (Category::SetLikeOrBuffer, Value::Set(items)) => Sequence::set_items(items.iter()),
        (Category::SetLikeOrBuffer, Value::Buffer(buffer)) => Sequence::buffer(buffer),
        (Category::Indexable | Category::MapLike | Category::SetLikeOrBuffer, Value::Host(host)) => host_values(category, host.as_ref()),
        (Category::GenericObject, Value::Object(record)) => {
            Sequence::properties(record, options.include_inherited, options.include_non_enumerable)
        }
        (Category::GenericObject, Value::Host(host)) => match host.properties() {
            Some(record) => Sequence::properties(record, options.include_inherited, options.include_non_enumerable),
            None => Sequence::empty(),
        },
        _ => Sequence::empty(),
    }
}

fn host_values<'a>(category: Category, host: &'a dyn HostObject) -> Sequence<'a> {
    match host.values() {
        Some(source) => Sequence::host(category, source),
        None => {
            warn!(
                type_name = host.type_tag().name(),
                category = %category,
                "registered host type exposes no values operation; yielding nothing"
            );
            Sequence::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use value_source_types::{IterHandle, Record, TypeTag};

    #[derive(Debug)]
    struct Opaque {
        tag: TypeTag,
    }

    impl HostObject for Opaque {
        fn type_tag(&self) -> &TypeTag {
            &self.tag
        }
    }

    #[test]
    fn registered_host_without_values_yields_nothing() {
        let tag = TypeTag::new("Opaque");
        let mut resolver = Resolver::default();
        resolver.scope_mut().register_set_type(&tag);
        let value = Value::host(Opaque { tag });
        let mut sequence = resolver.resolve(&value);
        assert_eq!(sequence.category(), Category::None);
        assert_eq!(sequence.pull().expect("pull"), None);
        assert_eq!(resolver.classify(&value), Category::SetLikeOrBuffer);
    }

    #[test]
    fn unregistered_host_without_capabilities_is_none() {
        let value = Value::host(Opaque { tag: TypeTag::new("Opaque") });
        assert_eq!(Resolver::default().classify(&value), Category::None);
    }

    #[test]
    fn resolver_defaults_apply_to_resolve() {
        let record = Value::from(Record::new().with("own", 1).with_prototype(Record::new().with("inherited", 2)));
        let resolver = Resolver::new(TypeScope::new(), ResolveOptions::default().with_inherited(true));
        let values: Vec<Value> = resolver.resolve(&record).map(|item| item.expect("value")).collect();
        assert_eq!(values, vec![Value::from(1), Value::from(2)]);
    }

    /// Hands out a new cursor on every call, counting the calls.
    #[derive(Debug)]
    struct FreshCursor {
        tag: TypeTag,
        calls: AtomicUsize,
    }

    impl HostObject for FreshCursor {
        fn type_tag(&self) -> &TypeTag {
            &self.tag
        }

        fn cursor(&self) -> Option<IterHandle> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Some(IterHandle::from_values(vec![Value::from(call as u32)]))
        }
    }

    #[test]
    fn host_cursor_is_requested_once_per_resolve() {
        let value = Value::host(FreshCursor {
            tag: TypeTag::new("FreshCursor"),
            calls: AtomicUsize::new(0),
        });
        let values: Vec<Value> = Resolver::default().resolve(&value).map(|item| item.expect("value")).collect();
        assert_eq!(values, vec![Value::from(0)]);
        let Value::Host(host) = &value else {
            panic!("expected host");
        };
        assert_eq!(host.cursor().and_then(|handle| handle.pull().ok().flatten()), Some(Value::from(1)));
    }

    #[test]
    fn already_sequence_keeps_the_handle() {
        let handle = IterHandle::from_values(vec![Value::from("a")]);
        let value = Value::from(handle.clone());
        let sequence = Resolver::default().resolve(&value);
        assert!(sequence.shares_cursor_with(&handle));
    }
}
