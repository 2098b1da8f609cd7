//! Pull-based element sources and caller-defined host types.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{Record, TypeTag, Value};

/// Anything that can be pulled one element at a time.
///
/// `Ok(Some(value))` yields an element, `Ok(None)` signals exhaustion and
/// `Err` reports a fault raised by the source itself.
pub trait ElementSource {
    fn pull(&mut self) -> anyhow::Result<Option<Value>>;
}

/// Adapts a plain [`Iterator`] of values into an [`ElementSource`].
#[derive(Debug, Clone)]
pub struct IterSource<I>(pub I);

impl<I> ElementSource for IterSource<I>
where
    I: Iterator<Item = Value>,
{
    fn pull(&mut self) -> anyhow::Result<Option<Value>> {
        Ok(self.0.next())
    }
}

struct HandleState {
    source: Box<dyn ElementSource + Send>,
    exhausted: bool,
}

/// A live iterator shared by reference.
///
/// Clones share one cursor: pulling through any clone advances all of them.
/// After the first exhaustion signal the handle stays exhausted and the
/// underlying source is not polled again.
#[derive(Clone)]
pub struct IterHandle {
    state: Arc<Mutex<HandleState>>,
}

impl IterHandle {
    pub fn new(source: impl ElementSource + Send + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(HandleState {
                source: Box::new(source),
                exhausted: false,
            })),
        }
    }

    /// Wraps an in-memory sequence of values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        Self::new(IterSource(values.into_iter()))
    }

    /// Pulls the next element.
    ///
    /// Faults from the source are returned as-is and leave the handle live.
    pub fn pull(&self) -> anyhow::Result<Option<Value>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.exhausted {
            return Ok(None);
        }
        let next = state.source.pull()?;
        if next.is_none() {
            state.exhausted = true;
        }
        Ok(next)
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).exhausted
    }

    /// True when both handles share the same cursor.
    pub fn ptr_eq(&self, other: &IterHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.state) as usize
    }
}

impl fmt::Debug for IterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterHandle")
            .field("addr", &format_args!("{:#x}", self.addr()))
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}

/// A caller-defined runtime type.
///
/// The resolver only probes the capabilities below; every one except
/// [`HostObject::type_tag`] is optional.
pub trait HostObject: fmt::Debug + Send + Sync {
    /// Runtime type of the instance, matched against registered types.
    fn type_tag(&self) -> &TypeTag;

    /// The `values` operation of the map/set contract.
    fn values(&self) -> Option<Box<dyn ElementSource + '_>> {
        None
    }

    /// Property view used when the instance is treated as a generic object.
    fn properties(&self) -> Option<&Record> {
        None
    }

    /// Set when the instance is itself an active iterator.
    ///
    /// Called once per resolve; the returned handle is the one the sequence
    /// forwards to.
    fn cursor(&self) -> Option<IterHandle> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Flaky {
        calls: usize,
    }

    impl ElementSource for Flaky {
        fn pull(&mut self) -> anyhow::Result<Option<Value>> {
            self.calls += 1;
            match self.calls {
                1 => Err(anyhow!("transient")),
                2 => Ok(Some(Value::from("recovered"))),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn clones_share_one_cursor() {
        let handle = IterHandle::from_values(vec![Value::from("a"), Value::from("b")]);
        let alias = handle.clone();
        assert!(handle.ptr_eq(&alias));
        assert_eq!(handle.pull().expect("pull"), Some(Value::from("a")));
        assert_eq!(alias.pull().expect("pull"), Some(Value::from("b")));
        assert_eq!(handle.pull().expect("pull"), None);
        assert!(alias.is_exhausted());
    }

    #[test]
    fn exhaustion_is_sticky() {
        let mut emitted = false;
        let source = std::iter::from_fn(move || {
            emitted = !emitted;
            if emitted { None } else { Some(Value::Null) }
        });
        let handle = IterHandle::from_values(source);
        assert_eq!(handle.pull().expect("pull"), None);
        assert_eq!(handle.pull().expect("pull"), None);
    }

    #[test]
    fn faults_pass_through_and_leave_handle_live() {
        let handle = IterHandle::new(Flaky { calls: 0 });
        let error = handle.pull().unwrap_err();
        assert_eq!(error.to_string(), "transient");
        assert!(!handle.is_exhausted());
        assert_eq!(handle.pull().expect("pull"), Some(Value::from("recovered")));
        assert_eq!(handle.pull().expect("pull"), None);
    }

    #[test]
    fn independent_handles_are_distinct() {
        let first = IterHandle::from_values(Vec::new());
        let second = IterHandle::from_values(Vec::new());
        assert!(!first.ptr_eq(&second));
    }
}
