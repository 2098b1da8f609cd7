//! Lazy walk over record property values.

use std::collections::HashSet;

use value_source_types::{Property, Record, Value};

/// Yields property values level by level: the record itself, then (when
/// inherited properties are requested) each prototype in turn.
///
/// Within a level, keys follow the record's canonical order. A name seen at a
/// nearer level shadows the same name further up the chain, even when the
/// nearer property is hidden.
pub(crate) struct PropertyValues<'a> {
    level: Option<&'a Record>,
    pending: std::vec::IntoIter<(&'a str, &'a Property)>,
    seen: HashSet<&'a str>,
    include_inherited: bool,
    include_non_enumerable: bool,
}

impl<'a> PropertyValues<'a> {
    pub(crate) fn new(record: &'a Record, include_inherited: bool, include_non_enumerable: bool) -> Self {
        Self {
            level: Some(record),
            pending: record.ordered_properties().into_iter(),
            seen: HashSet::new(),
            include_inherited,
            include_non_enumerable,
        }
    }

    fn advance_level(&mut self) -> bool {
        if !self.include_inherited {
            self.level = None;
            return false;
        }
        self.level = self.level.and_then(Record::prototype);
        match self.level {
            Some(record) => {
                self.pending = record.ordered_properties().into_iter();
                true
            }
            None => false,
        }
    }
}

impl Iterator for PropertyValues<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            let Some((name, property)) = self.pending.next() else {
                if self.advance_level() {
                    continue;
                }
                return None;
            };
            if self.include_inherited && !self.seen.insert(name) {
                continue;
            }
            if !property.enumerable && !self.include_non_enumerable {
                continue;
            }
            return Some(property.value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(record: &Record, inherited: bool, hidden: bool) -> Vec<Value> {
        PropertyValues::new(record, inherited, hidden).collect()
    }

    #[test]
    fn nearer_names_shadow_inherited_ones() {
        let base = Record::new().with("shared", "base").with("only_base", "base-only");
        let record = Record::new().with_hidden("shared", "own-hidden").with_prototype(base);
        assert_eq!(collect(&record, true, false), vec![Value::from("base-only")]);
        assert_eq!(
            collect(&record, true, true),
            vec![Value::from("own-hidden"), Value::from("base-only")]
        );
    }

    #[test]
    fn walks_every_prototype_level() {
        let root = Record::new().with("root", 3);
        let middle = Record::new().with("middle", 2).with_prototype(root);
        let record = Record::new().with("own", 1).with_prototype(middle);
        assert_eq!(collect(&record, false, false), vec![Value::from(1)]);
        assert_eq!(collect(&record, true, false), vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn exhausted_walk_stays_exhausted() {
        let record = Record::new().with("only", 1).with_prototype(Record::new());
        let mut values = PropertyValues::new(&record, true, false);
        assert_eq!(values.next(), Some(Value::from(1)));
        assert_eq!(values.next(), None);
        assert_eq!(values.next(), None);
    }
}
