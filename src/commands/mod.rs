//! CLI command implementations.
//!
//! Both flows start with the same listing phase: open a session, enumerate
//! (or walk below a reference component), print every candidate and
//! optionally ask a collector about it, then close the session. Removal runs
//! afterwards in a session of its own.

pub mod list;
pub mod prune;

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::bindings::walk;
use crate::config::Settings;
use crate::console::report_failure;
use crate::enumerate::enumerate;
use crate::error::NetCfgError;
use crate::selection::{present, SelectionCollector, SelectionSet};
use crate::service::{NetCfg, ServiceRuntime};
use crate::session::ConfigSession;

const ENUMERATE_SITE: &str = "enumerate_components";
const WALK_SITE: &str = "walk_bindings";

/// Print the failure line for a fatal error and turn it into a flow error.
fn fatal<W: Write + ?Sized>(out: &mut W, site: &str, e: NetCfgError) -> anyhow::Error {
    report_failure(out, site, &e);
    anyhow::Error::new(e).context(format!("{} failed", site))
}

/// Run the listing phase and return the ids the collector accepted.
fn list_candidates<R, W>(
    runtime: &R,
    settings: &Settings,
    out: &mut W,
    collector: Option<&mut dyn SelectionCollector>,
) -> Result<SelectionSet>
where
    R: ServiceRuntime,
    W: Write + ?Sized,
{
    let filter = settings.filter.as_deref();
    let session = ConfigSession::<R::Service>::open(runtime).map_err(|e| fatal(out, ENUMERATE_SITE, e))?;

    let selected = match &settings.below {
        None => {
            let components = enumerate(session.service(), &settings.class, filter)
                .map_err(|e| fatal(out, ENUMERATE_SITE, e))?;
            present(components, ENUMERATE_SITE, out, collector)?
        }
        Some(reference) => {
            let component = session
                .service()
                .find_component(reference)
                .map_err(|e| fatal(out, WALK_SITE, e))?
                .ok_or_else(|| {
                    let _ = writeln!(out, "{}: {} not found", WALK_SITE, reference);
                    anyhow::anyhow!("Component {} not found", reference)
                })?;

            match walk(&component, filter) {
                Ok(lower) => present(lower, WALK_SITE, out, collector)?,
                Err(e) => {
                    debug!(id = %reference, error = %e, "Binding walk abandoned");
                    report_failure(out, WALK_SITE, &e);
                    SelectionSet::new()
                }
            }
        }
    };

    session.close().map_err(|e| fatal(out, ENUMERATE_SITE, e))?;
    Ok(selected)
}
