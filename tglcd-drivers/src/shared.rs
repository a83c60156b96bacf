//! Shared panel access
//!
//! The driver itself holds no lock. On a host where the refresh hook and
//! the UI run in different execution contexts, wrap the panel here so that
//! every exchange runs start to finish under one critical section and two
//! select windows can never interleave on the bus.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Panel behind a blocking mutex
///
/// ```ignore
/// let panel: SharedPanel<CriticalSectionRawMutex, _> = SharedPanel::new(adapter);
///
/// // Refresh context
/// panel.lock(|p| p.on_refresh(false));
/// // UI context
/// let buttons = panel.lock(|p| p.read_buttons());
/// ```
pub struct SharedPanel<M: RawMutex, P> {
    inner: Mutex<M, RefCell<P>>,
}

impl<M: RawMutex, P> SharedPanel<M, P> {
    /// Wrap a panel
    pub const fn new(panel: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(panel)),
        }
    }

    /// Run `f` with exclusive access to the panel
    ///
    /// Calling `lock` again from inside `f` panics.
    pub fn lock<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Unwrap the panel
    pub fn into_inner(self) -> P {
        self.inner.into_inner().into_inner()
    }
}
