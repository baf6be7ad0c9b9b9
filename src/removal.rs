//! Locked, batch removal of selected components.
//!
//! The transaction opens its own service handle, takes the write lock,
//! initializes the session, deinstalls each selected id in order and finally
//! applies the batch once. A single item that cannot be resolved or
//! deinstalled is reported and skipped; only session, lock and commit
//! failures fail the transaction.
//!
//! ```text
//! NotStarted ──► LockAcquired ──► PerItemPhase(0..n) ──► Committed
//!     │                                            └───► CommitFailed
//!     └──► AbortedBeforeLock
//! ```

use std::io::Write;

use tracing::{debug, info, warn};

use crate::console::report_failure;
use crate::error::{NetCfgError, Result};
use crate::lock::WriteLockGuard;
use crate::selection::SelectionSet;
use crate::service::{ClassSetup, NetCfg, NetComponent, ServiceRuntime};
use crate::session::ConfigSession;
use crate::translate::format_status;

const SITE: &str = "deinstall_components";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    NotStarted,
    LockAcquired,
    /// Processing the item at this index of the selection.
    PerItemPhase(usize),
    Committed,
    CommitFailed,
    /// The session or the lock could not be obtained; nothing was touched.
    AbortedBeforeLock,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Committed | Self::CommitFailed | Self::AbortedBeforeLock
        )
    }
}

/// Per-item outcome of a transaction that reached the commit step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// Ids whose deinstall call succeeded
    pub removed: Vec<String>,
    /// Ids that were not found or failed to deinstall
    pub skipped: Vec<String>,
}

/// One removal run against the configuration service.
pub struct RemovalTransaction<'r, R> {
    runtime: &'r R,
    timeout_ms: u32,
    client: String,
    state: TransactionState,
}

impl<'r, R: ServiceRuntime> RemovalTransaction<'r, R> {
    pub fn new(runtime: &'r R, timeout_ms: u32, client: &str) -> Self {
        Self {
            runtime,
            timeout_ms,
            client: client.to_string(),
            state: TransactionState::NotStarted,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Deinstall every id in `selection`, in order, then commit.
    ///
    /// Progress and per-item failures are written to `out`. Returns the
    /// report once the commit succeeded; otherwise the error that ended the
    /// transaction, with [`state`](Self::state) telling where it stopped.
    pub fn run<W: Write + ?Sized>(
        &mut self,
        selection: &SelectionSet,
        out: &mut W,
    ) -> Result<RemovalReport> {
        let service = self.runtime.create_service().map_err(|e| {
            report_failure(out, SITE, &e);
            self.abort(e)
        })?;

        // The lock has to be held before the session is initialized.
        let lock = service.write_lock().map_err(|e| {
            report_failure(out, SITE, &e);
            self.abort(e)
        })?;
        let _guard = match WriteLockGuard::acquire(lock, self.timeout_ms, &self.client) {
            Ok(guard) => guard,
            Err(e) => {
                match &e {
                    NetCfgError::WriteLocked { owner } => {
                        let _ = writeln!(
                            out,
                            "NetCfg is already write-locked by {}.",
                            owner.as_deref().unwrap_or("<unknown client>")
                        );
                    }
                    other => {
                        let _ = writeln!(
                            out,
                            "Failed to acquire NetCfg write lock (hr=0x{:08X}).",
                            other.code()
                        );
                    }
                }
                return Err(self.abort(e));
            }
        };

        let session = ConfigSession::initialize(service).map_err(|e| {
            report_failure(out, SITE, &e);
            self.abort(e)
        })?;
        self.state = TransactionState::LockAcquired;
        debug!(count = selection.len(), "Write lock acquired, removing components");

        let mut report = RemovalReport::default();
        for (index, id) in selection.iter().enumerate() {
            self.state = TransactionState::PerItemPhase(index);
            let _ = writeln!(out, "Removing {}", id);

            match deinstall_one(session.service(), id) {
                Ok(true) => report.removed.push(id.to_string()),
                Ok(false) => {
                    warn!(id, "Component no longer present, skipping");
                    let _ = writeln!(out, "{}: {} not found", SITE, id);
                    report.skipped.push(id.to_string());
                }
                Err(e) => {
                    warn!(id, error = %e, "Failed to deinstall component");
                    report_failure(out, SITE, &e);
                    report.skipped.push(id.to_string());
                }
            }
        }

        if let Err(e) = session.service().apply() {
            self.state = TransactionState::CommitFailed;
            warn!(error = %format_status(e.code()), "Commit failed");
            report_failure(out, SITE, &e);
            return Err(e);
        }
        self.state = TransactionState::Committed;

        if let Err(e) = session.close() {
            warn!(error = %e, "Failed to close configuration session after commit");
        }

        info!(
            removed = report.removed.len(),
            skipped = report.skipped.len(),
            "Removal committed"
        );
        Ok(report)
    }

    fn abort(&mut self, e: NetCfgError) -> NetCfgError {
        self.state = TransactionState::AbortedBeforeLock;
        e
    }
}

/// Resolve `id` in this session and deinstall it through its class setup.
/// `Ok(false)` when the id no longer resolves.
fn deinstall_one<S: NetCfg>(service: &S, id: &str) -> Result<bool> {
    let Some(component) = service.find_component(id)? else {
        return Ok(false);
    };
    let class = component.class_guid()?;
    let setup = service.query_class_setup(&class)?;
    setup.deinstall(&component)?;
    Ok(true)
}
