//! The ambient type scope.
//!
//! A [`TypeScope`] maps type names to tags so that options can name types
//! textually, and holds setup-time registrations of extra array-like,
//! map-like and set-like types that apply to every call made through a
//! [`Resolver`](crate::Resolver) owning the scope.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::debug;
use value_source_types::{TypeTag, builtin};

use crate::category::Category;
use crate::config::{ResolveOptions, TypeRef, TypeRefs};

static BUILTIN_SCOPE: Lazy<TypeScope> = Lazy::new(TypeScope::new);

#[derive(Debug, Clone)]
pub struct TypeScope {
    names: IndexMap<String, TypeTag>,
    arrays: Vec<TypeTag>,
    maps: Vec<TypeTag>,
    sets: Vec<TypeTag>,
}

impl Default for TypeScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScope {
    /// A scope that knows the built-in type names and has no registrations.
    pub fn new() -> Self {
        let names = builtin::all().map(|tag| (tag.name().to_string(), tag.clone())).collect();
        Self {
            names,
            arrays: Vec::new(),
            maps: Vec::new(),
            sets: Vec::new(),
        }
    }

    /// Shared scope with built-ins only.
    pub fn builtin() -> &'static TypeScope {
        &BUILTIN_SCOPE
    }

    /// Makes `tag` resolvable by its name. A later definition with the same
    /// name replaces the earlier one.
    pub fn define(&mut self, tag: &TypeTag) -> &mut Self {
        if let Some(previous) = self.names.insert(tag.name().to_string(), tag.clone())
            && previous != *tag
        {
            debug!(name = tag.name(), "type name rebound in scope");
        }
        self
    }

    pub fn register_array_type(&mut self, tag: &TypeTag) -> &mut Self {
        self.define(tag);
        push_unique(&mut self.arrays, tag);
        self
    }

    pub fn register_map_type(&mut self, tag: &TypeTag) -> &mut Self {
        self.define(tag);
        push_unique(&mut self.maps, tag);
        self
    }

    pub fn register_set_type(&mut self, tag: &TypeTag) -> &mut Self {
        self.define(tag);
        push_unique(&mut self.sets, tag);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeTag> {
        self.names.get(name)
    }

    /// Resolves a reference against this scope. Tags resolve to themselves.
    pub fn resolve_ref(&self, type_ref: &TypeRef) -> Option<TypeTag> {
        match type_ref {
            TypeRef::Tag(tag) => Some(tag.clone()),
            TypeRef::Name(name) => self.lookup(name).cloned(),
        }
    }

    /// Builds the per-call matcher: built-in bases, then scope registrations,
    /// then the references named in `options`.
    pub(crate) fn matcher(&self, options: &ResolveOptions) -> TypeMatcher {
        TypeMatcher {
            arrays: self.collect(builtin::array(), &self.arrays, &options.arrays),
            maps: self.collect(builtin::map(), &self.maps, &options.maps),
            sets: self.collect(builtin::set(), &self.sets, &options.sets),
        }
    }

    fn collect(&self, base: &TypeTag, registered: &[TypeTag], requested: &TypeRefs) -> Vec<TypeTag> {
        let mut tags = Vec::with_capacity(1 + registered.len() + requested.len());
        tags.push(base.clone());
        tags.extend(registered.iter().cloned());
        for type_ref in requested {
            match self.resolve_ref(type_ref) {
                Some(tag) => tags.push(tag),
                None => debug!(type_name = type_ref.describe(), "type name not found in scope; ignoring"),
            }
        }
        tags
    }
}

fn push_unique(tags: &mut Vec<TypeTag>, tag: &TypeTag) {
    if !tags.contains(tag) {
        tags.push(tag.clone());
    }
}

/// Resolved type lists for a single call.
#[derive(Debug, Clone)]
pub(crate) struct TypeMatcher {
    arrays: Vec<TypeTag>,
    maps: Vec<TypeTag>,
    sets: Vec<TypeTag>,
}

impl TypeMatcher {
    /// Container category for a host type, checked arrays, maps, then sets.
    /// Every fixed-width buffer kind counts as set-like.
    pub(crate) fn container_category(&self, tag: &TypeTag) -> Option<Category> {
        if self.arrays.iter().any(|candidate| tag.is_a(candidate)) {
            return Some(Category::Indexable);
        }
        if self.maps.iter().any(|candidate| tag.is_a(candidate)) {
            return Some(Category::MapLike);
        }
        if self.sets.iter().any(|candidate| tag.is_a(candidate)) || tag.is_a(builtin::typed_array()) {
            return Some(Category::SetLikeOrBuffer);
        }
        None
    }
}
