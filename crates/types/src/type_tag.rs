//! Runtime type descriptors.
//!
//! A [`TypeTag`] is an identity handle: two tags are equal only when they point
//! at the same descriptor, regardless of name. Descriptors may extend a base
//! descriptor, which gives the instance-of relation used when matching
//! caller-defined types against registered map/set/array types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::buffer::BufferKind;

/// Named runtime type with an optional base type.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    base: Option<TypeTag>,
}

/// Cheap-to-clone identity handle on a [`TypeDescriptor`].
#[derive(Clone)]
pub struct TypeTag(Arc<TypeDescriptor>);

impl TypeTag {
    /// Creates a root type with no base.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(TypeDescriptor {
            name: name.into(),
            base: None,
        }))
    }

    /// Creates a type that extends `base`.
    ///
    /// Instances of the new type satisfy [`TypeTag::is_a`] for `base` and every
    /// ancestor of `base`.
    pub fn extending(name: impl Into<String>, base: &TypeTag) -> Self {
        Self(Arc::new(TypeDescriptor {
            name: name.into(),
            base: Some(base.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn base(&self) -> Option<&TypeTag> {
        self.0.base.as_ref()
    }

    /// Returns true when `self` is `ancestor` or transitively extends it.
    pub fn is_a(&self, ancestor: &TypeTag) -> bool {
        self.lineage().any(|tag| tag == ancestor)
    }

    /// Walks from this type up through its bases.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.lineage().map(TypeTag::name).collect();
        write!(f, "TypeTag({})", names.join(" < "))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Iterator over a type and its ancestors.
pub struct Lineage<'a> {
    next: Option<&'a TypeTag>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a TypeTag;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base();
        Some(current)
    }
}

/// Tags for the runtime's built-in types.
pub mod builtin {
    use super::*;

    static OBJECT: Lazy<TypeTag> = Lazy::new(|| TypeTag::new("Object"));
    static ARRAY: Lazy<TypeTag> = Lazy::new(|| TypeTag::extending("Array", &OBJECT));
    static MAP: Lazy<TypeTag> = Lazy::new(|| TypeTag::extending("Map", &OBJECT));
    static SET: Lazy<TypeTag> = Lazy::new(|| TypeTag::extending("Set", &OBJECT));
    static TYPED_ARRAY: Lazy<TypeTag> = Lazy::new(|| TypeTag::extending("TypedArray", &OBJECT));
    static BUFFERS: Lazy<Vec<TypeTag>> = Lazy::new(|| {
        BufferKind::ALL
            .iter()
            .map(|kind| TypeTag::extending(kind.name(), &TYPED_ARRAY))
            .collect()
    });

    pub fn object() -> &'static TypeTag {
        &OBJECT
    }

    pub fn array() -> &'static TypeTag {
        &ARRAY
    }

    pub fn map() -> &'static TypeTag {
        &MAP
    }

    pub fn set() -> &'static TypeTag {
        &SET
    }

    /// Abstract base shared by every fixed-width numeric buffer kind.
    pub fn typed_array() -> &'static TypeTag {
        &TYPED_ARRAY
    }

    pub fn buffer(kind: BufferKind) -> &'static TypeTag {
        &BUFFERS[kind.ordinal()]
    }

    /// Every built-in tag, in the order a fresh scope registers them.
    pub fn all() -> impl Iterator<Item = &'static TypeTag> {
        [object(), array(), map(), set(), typed_array()]
            .into_iter()
            .chain(BUFFERS.iter())
    }
}
