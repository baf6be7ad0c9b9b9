//! Configuration service session lifecycle.
//!
//! A [`ConfigSession`] owns one service handle and its initialize/uninitialize
//! pair. Uninitialize runs only when initialize succeeded, either through
//! [`ConfigSession::close`] or on drop.

use tracing::{debug, warn};

use crate::error::Result;
use crate::service::{NetCfg, ServiceRuntime};

/// A live, initialized handle to the configuration service.
///
/// Not reentrant and not shared across threads; open a new session for each
/// phase of work.
pub struct ConfigSession<S: NetCfg> {
    service: S,
    live: bool,
}

impl<S: NetCfg> ConfigSession<S> {
    /// Create a service handle and initialize it.
    pub fn open<R>(runtime: &R) -> Result<Self>
    where
        R: ServiceRuntime<Service = S>,
    {
        let service = runtime.create_service()?;
        Self::initialize(service)
    }

    /// Initialize an already created service handle.
    ///
    /// Used when something must happen between creation and initialization,
    /// such as taking the write lock.
    pub fn initialize(service: S) -> Result<Self> {
        service.initialize()?;
        debug!("Configuration session opened");
        Ok(Self {
            service,
            live: true,
        })
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Uninitialize the service and report the outcome.
    pub fn close(mut self) -> Result<()> {
        self.live = false;
        debug!("Closing configuration session");
        self.service.uninitialize()
    }
}

impl<S: NetCfg> Drop for ConfigSession<S> {
    fn drop(&mut self) {
        if self.live {
            self.live = false;
            if let Err(e) = self.service.uninitialize() {
                warn!(error = %e, "Failed to uninitialize configuration session");
            }
        }
    }
}
