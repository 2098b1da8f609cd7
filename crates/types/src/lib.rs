//! # Value Source Types
//!
//! The dynamic host value model inspected by the `value-source` resolver.
//!
//! [`Value`] is a closed enum over the shapes a dynamic runtime produces:
//! primitives, arrays, insertion-ordered maps and sets, fixed-width numeric
//! buffers, keyed records with prototypes, caller-defined host objects and
//! live iterators. Reference kinds are shared through `Arc`, so cloning a
//! value never copies its contents and identity is preserved.
//!
//! Caller-defined types plug in through [`HostObject`], and are identified by
//! a [`TypeTag`] that may extend a built-in tag (see [`builtin`]).

mod buffer;
mod host;
mod record;
mod symbol;
mod type_tag;
mod value;

pub use buffer::{BufferError, BufferKind, NumericBuffer};
pub use host::{ElementSource, HostObject, IterHandle, IterSource};
pub use record::{Property, PropertyKey, Record};
pub use symbol::Symbol;
pub use type_tag::{Lineage, TypeDescriptor, TypeTag, builtin};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_types_are_thread_safe() {
        assert_send_sync::<Value>();
        assert_send_sync::<IterHandle>();
        assert_send_sync::<TypeTag>();
        assert_send_sync::<Record>();
    }
}
