//! Method-call form of the resolver, so a value can be its own receiver.

use value_source_types::Value;

use crate::category::Category;
use crate::config::ResolveOptions;
use crate::resolver::{classify_in, resolve_in};
use crate::scope::TypeScope;
use crate::sequence::Sequence;

/// `value.values()` is `resolve(&value)`.
pub trait ValuesExt {
    fn values(&self) -> Sequence<'_>;

    fn values_with(&self, options: &ResolveOptions) -> Sequence<'_>;

    fn category(&self) -> Category;
}

impl ValuesExt for Value {
    fn values(&self) -> Sequence<'_> {
        self.values_with(&ResolveOptions::default())
    }

    fn values_with(&self, options: &ResolveOptions) -> Sequence<'_> {
        resolve_in(TypeScope::builtin(), self, options)
    }

    fn category(&self) -> Category {
        classify_in(TypeScope::builtin(), self, &ResolveOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_form_matches_free_function() {
        let value = Value::array(["test"]);
        let mut sequence = value.values();
        assert_eq!(sequence.pull().expect("pull"), Some(Value::from("test")));
        assert_eq!(sequence.pull().expect("pull"), None);
        assert_eq!(value.category(), Category::Indexable);
    }
}
