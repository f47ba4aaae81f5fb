use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

struct Inner<T> {
    cache: RefCell<Option<T>>,
    dirty: Rc<Cell<bool>>,
    compute: Box<dyn Fn() -> T>,
    computations: Cell<u64>,
    _source: Subscription,
}

/// Lazily derived, memoized value.
///
/// A change of the source only marks the cache dirty; the derivation runs on
/// the next read.
pub struct Computed<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone + 'static> Computed<T> {
    pub fn new<S>(source: &Observable<S>, derive: impl Fn(&S) -> T + 'static) -> Self
    where
        S: Clone + PartialEq + 'static,
    {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = source.subscribe(move |_| flag.set(true));

        let source = source.clone();
        let compute: Box<dyn Fn() -> T> = Box::new(move || source.with(|value| derive(value)));

        Self {
            inner: Rc::new(Inner {
                cache: RefCell::new(None),
                dirty,
                compute,
                computations: Cell::new(0),
                _source: subscription,
            }),
        }
    }

    /// Clone of the up-to-date value.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Borrow the up-to-date value, recomputing first if the source changed.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let mut cache = self.inner.cache.borrow_mut();
        if self.inner.dirty.replace(false) {
            *cache = None;
        }
        let value = cache.get_or_insert_with(|| {
            self.inner.computations.set(self.inner.computations.get() + 1);
            (self.inner.compute)()
        });
        f(value)
    }

    /// Whether the next read will recompute.
    pub fn is_stale(&self) -> bool {
        self.inner.dirty.get() || self.inner.cache.borrow().is_none()
    }

    /// How many times the derivation has run.
    pub fn computations(&self) -> u64 {
        self.inner.computations.get()
    }
}

impl<T> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("dirty", &self.inner.dirty.get())
            .field("computations", &self.inner.computations.get())
            .finish()
    }
}
