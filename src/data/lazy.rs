//! data::lazy — shared, memoized zero-argument computations.
//!
//! Purpose
//! -------
//! Let a transform return a fully-described result immediately while paying
//! for the numeric work only when a consumer reads the payload. Chained
//! transforms capture their sources inside [`Deferred`] thunks, building a
//! DAG of closures that is evaluated on first read.
//!
//! Key behaviors
//! -------------
//! - The thunk runs at most once, even under concurrent readers
//!   (`once_cell::sync::Lazy`).
//! - Clones share the same cell: evaluating one clone evaluates them all.
//! - A thunk may yield `None`; that absent outcome is memoized like any other.
//!
//! Invariants & assumptions
//! ------------------------
//! - Thunks must be `Send + 'static`; they usually own `Arc`-backed clones of
//!   their source values.
//! - A panicking thunk poisons the cell; later reads panic as well.
use once_cell::sync::Lazy;
use std::{fmt, sync::Arc};

type Thunk<T> = Box<dyn FnOnce() -> Option<T> + Send>;

/// Deferred — a shared lazily-evaluated `Option<T>`.
pub struct Deferred<T> {
    cell: Arc<Lazy<Option<T>, Thunk<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Deferred { cell: Arc::clone(&self.cell) }
    }
}

impl<T: Send + 'static> Deferred<T> {
    /// Wrap a computation; it runs on the first call to [`Deferred::get`].
    pub fn new<F>(compute: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        let thunk: Thunk<T> = Box::new(move || {
            log::trace!("evaluating deferred computation");
            compute()
        });
        Deferred { cell: Arc::new(Lazy::new(thunk)) }
    }

    /// Wrap an already-computed value.
    pub fn ready(value: Option<T>) -> Self {
        let thunk: Thunk<T> = Box::new(move || value);
        let cell = Lazy::new(thunk);
        Lazy::force(&cell);
        Deferred { cell: Arc::new(cell) }
    }
}

impl<T> Deferred<T> {
    /// Force evaluation (once) and borrow the result.
    pub fn get(&self) -> Option<&T> {
        Lazy::force(&self.cell).as_ref()
    }

    /// Whether the computation has already run.
    pub fn is_evaluated(&self) -> bool {
        Lazy::get(&self.cell).is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Lazy::get(&self.cell) {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}
