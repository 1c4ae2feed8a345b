//! Locking strategies for the [`Map`](crate::Map) and [`Set`](crate::Set) facades.
//!
//! The tree engine itself is never synchronized. A facade picks a strategy
//! once, as a type parameter, and wraps every single call in one shared
//! (reads) or exclusive (writes) acquisition. Nothing spans two calls, so a
//! lookup followed by an insert is not atomic unless the caller holds its own
//! lock around both.

use std::cell::RefCell;

/// A container that hands out shared or exclusive access to its contents.
pub trait Lock<T> {
    /// Wrap `inner`.
    fn new(inner: T) -> Self;

    /// Run `f` with shared access.
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Run `f` with exclusive access.
    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    /// Exclusive access through a unique borrow, without locking.
    fn get_mut(&mut self) -> &mut T;

    /// Unwrap the contents.
    fn into_inner(self) -> T;
}

/// Selects the [`Lock`] a facade stores its tree in.
pub trait Locking {
    /// Lock type wrapping a `T`.
    type Cell<T>: Lock<T>;

    /// Name shown in logs and debug output.
    const NAME: &'static str;
}

/// Single-threaded strategy: no lock is taken.
///
/// Facades using it are not `Sync`, so the compiler rejects sharing them
/// across threads. Calling back into the same facade from inside a
/// `read`/`write`/`traverse` closure panics instead of aliasing the tree.
#[derive(Debug, Clone, Copy)]
pub enum Unsynchronized {}

/// Thread-safe strategy backed by a reader-writer lock.
///
/// Calling back into the same facade from inside a `read`/`write`/`traverse`
/// closure can deadlock.
#[derive(Debug, Clone, Copy)]
pub enum Synchronized {}

impl Locking for Unsynchronized {
    type Cell<T> = NoLock<T>;

    const NAME: &'static str = "unsynchronized";
}

impl Locking for Synchronized {
    type Cell<T> = RwLock<T>;

    const NAME: &'static str = "synchronized";
}

/// Lock used by [`Unsynchronized`].
#[derive(Debug, Default)]
pub struct NoLock<T>(RefCell<T>);

impl<T> Lock<T> for NoLock<T> {
    #[inline]
    fn new(inner: T) -> Self {
        NoLock(RefCell::new(inner))
    }

    #[inline]
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    #[inline]
    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        self.0.get_mut()
    }

    #[inline]
    fn into_inner(self) -> T {
        self.0.into_inner()
    }
}

/// Lock used by [`Synchronized`].
#[derive(Debug, Default)]
pub struct RwLock<T>(parking_lot::RwLock<T>);

impl<T> Lock<T> for RwLock<T> {
    #[inline]
    fn new(inner: T) -> Self {
        RwLock(parking_lot::RwLock::new(inner))
    }

    #[inline]
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.read())
    }

    #[inline]
    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.write())
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        self.0.get_mut()
    }

    #[inline]
    fn into_inner(self) -> T {
        self.0.into_inner()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bump<L: Lock<u32>>(lock: &L) -> u32 {
        lock.write(|v| *v += 1);
        lock.read(|v| *v)
    }

    #[test]
    fn both_strategies_give_read_and_write_access() {
        assert_eq!(bump(&NoLock::new(1)), 2);
        assert_eq!(bump(&RwLock::new(41)), 42);
    }

    #[test]
    #[should_panic]
    fn reentrant_write_under_no_lock_panics() {
        let lock = NoLock::new(0);
        lock.read(|_| lock.write(|v| *v += 1));
    }
}
