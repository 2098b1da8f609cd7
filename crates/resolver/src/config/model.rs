//! Data models for resolve options.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use value_source_types::TypeTag;

/// Reference to a runtime type: either a concrete tag or a name looked up in
/// the ambient [`TypeScope`](crate::TypeScope) at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Tag(TypeTag),
    Name(String),
}

impl TypeRef {
    /// Human-readable form used in log fields.
    pub fn describe(&self) -> &str {
        match self {
            TypeRef::Tag(tag) => tag.name(),
            TypeRef::Name(name) => name,
        }
    }
}

impl From<TypeTag> for TypeRef {
    fn from(tag: TypeTag) -> Self {
        TypeRef::Tag(tag)
    }
}

impl From<&TypeTag> for TypeRef {
    fn from(tag: &TypeTag) -> Self {
        TypeRef::Tag(tag.clone())
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        TypeRef::Name(name)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(TypeRef::Name(name))
    }
}

/// One or many [`TypeRef`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRefs(Vec<TypeRef>);

impl TypeRefs {
    pub fn iter(&self) -> std::slice::Iter<'_, TypeRef> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a TypeRefs {
    type Item = &'a TypeRef;
    type IntoIter = std::slice::Iter<'a, TypeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<TypeRef> for TypeRefs {
    fn from(type_ref: TypeRef) -> Self {
        TypeRefs(vec![type_ref])
    }
}

impl From<TypeTag> for TypeRefs {
    fn from(tag: TypeTag) -> Self {
        TypeRefs(vec![TypeRef::Tag(tag)])
    }
}

impl From<&TypeTag> for TypeRefs {
    fn from(tag: &TypeTag) -> Self {
        TypeRefs(vec![TypeRef::from(tag)])
    }
}

impl From<&str> for TypeRefs {
    fn from(name: &str) -> Self {
        TypeRefs(vec![TypeRef::from(name)])
    }
}

impl<T: Into<TypeRef>> From<Vec<T>> for TypeRefs {
    fn from(items: Vec<T>) -> Self {
        TypeRefs(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TypeRef>, const N: usize> From<[T; N]> for TypeRefs {
    fn from(items: [T; N]) -> Self {
        TypeRefs(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TypeRef>> FromIterator<T> for TypeRefs {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TypeRefs(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefCollection {
    One(TypeRef),
    Many(Vec<TypeRef>),
}

impl<'de> Deserialize<'de> for TypeRefs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let maybe_collection = Option::<TypeRefCollection>::deserialize(deserializer)?;
        let refs = match maybe_collection {
            Some(TypeRefCollection::One(type_ref)) => vec![type_ref],
            Some(TypeRefCollection::Many(items)) => items,
            None => Vec::new(),
        };
        Ok(TypeRefs(refs))
    }
}

/// Per-call options for the resolver.
///
/// Field names in JSON follow the established option names: `inObj`,
/// `reflectObj`, `arrays`, `maps`, `sets`, plus `objectProperties` for the
/// generic-object capability.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolveOptions {
    /// Include properties inherited through the prototype chain.
    #[serde(rename = "inObj", default)]
    pub include_inherited: bool,

    /// Include non-enumerable properties.
    #[serde(rename = "reflectObj", default)]
    pub include_non_enumerable: bool,

    /// Additional types iterated as indexable sequences.
    #[serde(default)]
    pub arrays: TypeRefs,

    /// Additional types iterated as maps (values only).
    #[serde(default)]
    pub maps: TypeRefs,

    /// Additional types iterated as sets.
    #[serde(default)]
    pub sets: TypeRefs,

    /// Whether plain records are iterated by property value. When disabled,
    /// records fall through to the empty sequence.
    #[serde(default = "default_object_properties")]
    pub object_properties: bool,
}

fn default_object_properties() -> bool {
    true
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            include_inherited: false,
            include_non_enumerable: false,
            arrays: TypeRefs::default(),
            maps: TypeRefs::default(),
            sets: TypeRefs::default(),
            object_properties: default_object_properties(),
        }
    }
}

impl ResolveOptions {
    pub fn with_inherited(mut self, include_inherited: bool) -> Self {
        self.include_inherited = include_inherited;
        self
    }

    pub fn with_non_enumerable(mut self, include_non_enumerable: bool) -> Self {
        self.include_non_enumerable = include_non_enumerable;
        self
    }

    pub fn with_object_properties(mut self, enabled: bool) -> Self {
        self.object_properties = enabled;
        self
    }

    pub fn arrays(mut self, arrays: impl Into<TypeRefs>) -> Self {
        self.arrays = arrays.into();
        self
    }

    pub fn maps(mut self, maps: impl Into<TypeRefs>) -> Self {
        self.maps = maps.into();
        self
    }

    pub fn sets(mut self, sets: impl Into<TypeRefs>) -> Self {
        self.sets = sets.into();
        self
    }

    /// Parses options from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Errors that can occur while loading resolve options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
