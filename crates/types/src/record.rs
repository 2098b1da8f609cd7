//! Generic keyed objects with an optional prototype.
//!
//! A [`Record`] is the host model for a structured object accessed through
//! named properties. Each property carries an `enumerable` flag, and a record
//! may delegate to a prototype record whose properties count as inherited.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{Symbol, Value};

/// Key of a record property.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PropertyKey {
    Name(String),
    Symbol(Symbol),
}

impl PropertyKey {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Name(name) => Some(name),
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

/// Value slot of a record property.
#[derive(Clone, Debug)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

impl Property {
    pub fn enumerable(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            enumerable: true,
        }
    }

    pub fn hidden(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            enumerable: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Record {
    properties: IndexMap<PropertyKey, Property>,
    prototype: Option<Arc<Record>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an enumerable own property.
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(PropertyKey::Name(name.into()), Property::enumerable(value))
    }

    /// Adds a non-enumerable own property.
    pub fn with_hidden(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(PropertyKey::Name(name.into()), Property::hidden(value))
    }

    pub fn with_symbol(self, symbol: Symbol, value: impl Into<Value>) -> Self {
        self.define(PropertyKey::Symbol(symbol), Property::enumerable(value))
    }

    pub fn with_prototype(mut self, prototype: impl Into<Arc<Record>>) -> Self {
        self.prototype = Some(prototype.into());
        self
    }

    /// Defines or replaces a property. A replaced property keeps its original
    /// insertion position.
    pub fn define(mut self, key: PropertyKey, property: Property) -> Self {
        self.properties.insert(key, property);
        self
    }

    /// Own property lookup; the prototype chain is not consulted.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties
            .get(&PropertyKey::Name(name.to_string()))
            .map(|property| &property.value)
    }

    pub fn property(&self, key: &PropertyKey) -> Option<&Property> {
        self.properties.get(key)
    }

    pub fn prototype(&self) -> Option<&Record> {
        self.prototype.as_deref()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Own string-keyed properties in canonical enumeration order.
    ///
    /// Array-index keys come first in ascending numeric order, followed by the
    /// remaining names in insertion order. Symbol keys are skipped.
    pub fn ordered_properties(&self) -> Vec<(&str, &Property)> {
        let mut indexed = Vec::new();
        let mut named = Vec::new();
        for (key, property) in &self.properties {
            let Some(name) = key.as_name() else {
                continue;
            };
            match array_index(name) {
                Some(index) => indexed.push((index, name, property)),
                None => named.push((name, property)),
            }
        }
        indexed.sort_by_key(|(index, _, _)| *index);
        indexed
            .into_iter()
            .map(|(_, name, property)| (name, property))
            .chain(named)
            .collect()
    }
}

/// Parses a canonical array index: decimal, no leading zeros, below 2^32 - 1.
fn array_index(name: &str) -> Option<u32> {
    if name.is_empty() || (name.len() > 1 && name.starts_with('0')) {
        return None;
    }
    if !name.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    name.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}
