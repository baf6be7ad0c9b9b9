//! Prune command implementation.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;
use crate::removal::RemovalTransaction;
use crate::selection::SelectionCollector;
use crate::service::ServiceRuntime;

/// Present every matching component to `collector`, then remove the
/// accepted ones in a single locked transaction.
pub fn run<R, W>(
    runtime: &R,
    settings: &Settings,
    out: &mut W,
    collector: &mut dyn SelectionCollector,
) -> Result<()>
where
    R: ServiceRuntime,
    W: Write + ?Sized,
{
    let selected = super::list_candidates(runtime, settings, out, Some(collector))?;

    if selected.is_empty() {
        info!("No components selected, nothing to remove");
        out.flush()?;
        return Ok(());
    }

    let mut transaction = RemovalTransaction::new(runtime, settings.timeout_ms, &settings.client);
    match transaction.run(&selected, out) {
        Ok(report) => {
            if !report.skipped.is_empty() {
                info!(skipped = ?report.skipped, "Some components were not removed");
            }
            out.flush()?;
            Ok(())
        }
        Err(e) => {
            writeln!(out, "Failed to deinstall all components: hr=0x{:08X}", e.code())?;
            out.flush()?;
            Err(e).with_context(|| {
                format!("Removal stopped in state {:?}", transaction.state())
            })
        }
    }
}
