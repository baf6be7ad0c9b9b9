//! Exclusive write lock on the configuration service.
//!
//! The service's write lock is a cross-process, named mutual exclusion over
//! all mutating operations. Acquisition waits up to a bounded timeout; when
//! another client holds the lock the failure carries its name.

use tracing::{debug, warn};

use crate::error::{NetCfgError, Result};
use crate::service::ServiceLock;

/// Default wait for the write lock, in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u32 = 5000;

/// Default client label registered with the lock.
pub const DEFAULT_CLIENT_LABEL: &str = "PruneNetCfg";

/// A guard that holds the service write lock.
/// The lock is released exactly once: explicitly through
/// [`WriteLockGuard::release`] or when the guard is dropped.
pub struct WriteLockGuard<L: ServiceLock> {
    lock: L,
    held: bool,
}

impl<L: ServiceLock> WriteLockGuard<L> {
    /// Attempt to acquire the write lock.
    ///
    /// Returns [`NetCfgError::WriteLocked`] if another client holds it, or the
    /// service error for any other failure. Nothing is released on failure.
    pub fn acquire(lock: L, timeout_ms: u32, client: &str) -> Result<Self> {
        debug!(timeout_ms, client, "Acquiring NetCfg write lock");

        match lock.acquire(timeout_ms, client) {
            Ok(()) => Ok(Self { lock, held: true }),
            Err(e @ NetCfgError::WriteLocked { .. }) => {
                warn!(error = %e, "Write lock contention");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Release the lock. A no-op once released.
    pub fn release(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        if let Err(e) = self.lock.release() {
            warn!(error = %e, "Failed to release NetCfg write lock");
        } else {
            debug!("Released NetCfg write lock");
        }
    }
}

impl<L: ServiceLock> Drop for WriteLockGuard<L> {
    fn drop(&mut self) {
        self.release();
    }
}
