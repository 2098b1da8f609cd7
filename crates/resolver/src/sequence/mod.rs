//! The lazy, single-pass output of the resolver.

mod properties;

use std::fmt;
use std::iter::FusedIterator;

use value_source_types::{ElementSource, IterHandle, NumericBuffer, Record, Value};

use crate::category::Category;

pub(crate) use properties::PropertyValues;

enum Cursor<'a> {
    Shared(IterHandle),
    Items(std::slice::Iter<'a, Value>),
    Chars(std::str::Chars<'a>),
    MapValues(indexmap::map::Values<'a, Value, Value>),
    SetItems(indexmap::set::Iter<'a, Value>),
    Buffer { buffer: &'a NumericBuffer, index: usize },
    Properties(PropertyValues<'a>),
    Host(Box<dyn ElementSource + 'a>),
    Done,
}

/// Forward-only producer over the values of a resolved input.
///
/// Pull with [`Sequence::pull`] or iterate; items are `anyhow::Result`s because
/// a live iterator handed to the resolver may fault, and such faults are
/// passed through unchanged. Every other path is infallible. Once a sequence
/// reports exhaustion it keeps doing so.
pub struct Sequence<'a> {
    category: Category,
    cursor: Cursor<'a>,
}

impl<'a> Sequence<'a> {
    /// A sequence that is exhausted from the start.
    pub fn empty() -> Self {
        Self {
            category: Category::None,
            cursor: Cursor::Done,
        }
    }

    pub(crate) fn shared(handle: IterHandle) -> Self {
        Self::with_cursor(Category::AlreadySequence, Cursor::Shared(handle))
    }

    pub(crate) fn items(items: &'a [Value]) -> Self {
        Self::with_cursor(Category::Indexable, Cursor::Items(items.iter()))
    }

    pub(crate) fn chars(text: &'a str) -> Self {
        Self::with_cursor(Category::Text, Cursor::Chars(text.chars()))
    }

    pub(crate) fn map_values(values: indexmap::map::Values<'a, Value, Value>) -> Self {
        Self::with_cursor(Category::MapLike, Cursor::MapValues(values))
    }

    pub(crate) fn set_items(items: indexmap::set::Iter<'a, Value>) -> Self {
        Self::with_cursor(Category::SetLikeOrBuffer, Cursor::SetItems(items))
    }

    pub(crate) fn buffer(buffer: &'a NumericBuffer) -> Self {
        Self::with_cursor(Category::SetLikeOrBuffer, Cursor::Buffer { buffer, index: 0 })
    }

    pub(crate) fn properties(record: &'a Record, include_inherited: bool, include_non_enumerable: bool) -> Self {
        Self::with_cursor(
            Category::GenericObject,
            Cursor::Properties(PropertyValues::new(record, include_inherited, include_non_enumerable)),
        )
    }

    pub(crate) fn host(category: Category, source: Box<dyn ElementSource + 'a>) -> Self {
        Self::with_cursor(category, Cursor::Host(source))
    }

    fn with_cursor(category: Category, cursor: Cursor<'a>) -> Self {
        Self { category, cursor }
    }

    /// Category the input was classified as.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The live iterator this sequence forwards to, on the already-a-sequence
    /// path.
    pub fn handle(&self) -> Option<&IterHandle> {
        match &self.cursor {
            Cursor::Shared(handle) => Some(handle),
            _ => None,
        }
    }

    /// True when pulling from this sequence advances `handle`.
    pub fn shares_cursor_with(&self, handle: &IterHandle) -> bool {
        self.handle().is_some_and(|own| own.ptr_eq(handle))
    }

    /// Pulls the next element.
    ///
    /// # Errors
    /// Only a fault raised by a live iterator's own pull, returned unchanged.
    pub fn pull(&mut self) -> anyhow::Result<Option<Value>> {
        let next = match &mut self.cursor {
            Cursor::Shared(handle) => return handle.pull(),
            Cursor::Items(items) => items.next().cloned(),
            Cursor::Chars(chars) => chars.next().map(Value::from),
            Cursor::MapValues(values) => values.next().cloned(),
            Cursor::SetItems(items) => items.next().cloned(),
            Cursor::Buffer { buffer, index } => {
                let element = buffer.get(*index);
                *index += 1;
                element
            }
            Cursor::Properties(values) => values.next(),
            Cursor::Host(source) => source.pull()?,
            Cursor::Done => None,
        };
        if next.is_none() {
            self.cursor = Cursor::Done;
        }
        Ok(next)
    }
}

impl Iterator for Sequence<'_> {
    type Item = anyhow::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().transpose()
    }
}

impl FusedIterator for Sequence<'_> {}

impl ElementSource for Sequence<'_> {
    fn pull(&mut self) -> anyhow::Result<Option<Value>> {
        Sequence::pull(self)
    }
}

impl fmt::Debug for Sequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.cursor {
            Cursor::Shared(handle) if handle.is_exhausted() => "exhausted",
            Cursor::Done => "exhausted",
            _ => "live",
        };
        f.debug_struct("Sequence")
            .field("category", &self.category)
            .field("state", &state)
            .finish()
    }
}
