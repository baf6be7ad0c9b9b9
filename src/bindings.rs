//! Binding-path traversal below a reference component.
//!
//! Starting from one component (typically an adapter), walk its enabled
//! binding paths and surface the lower component of every interface on each
//! path. This discovers the protocol and service stack bound beneath the
//! reference, not only the components listed at top level.

use tracing::{debug, warn};

use crate::enumerate::{snapshot, ComponentInfo};
use crate::error::{NetCfgError, Result};
use crate::service::{BindingInterface, BindingPath, ComponentBindings, NetComponent, ServiceEnum};

type PathOf<B> = <B as ComponentBindings>::Path;
type InterfacesOf<B> = <PathOf<B> as BindingPath>::Interfaces;

/// Lazy sequence of components reached through the reference's binding paths.
///
/// Per-item failures (a path that cannot be inspected, an interface whose
/// lower component cannot be resolved, unreadable properties) are yielded as
/// `Err` and the walk moves on. Only disabled paths are skipped silently.
pub struct LowerComponents<B: ComponentBindings> {
    paths: Option<B::Paths>,
    interfaces: Option<InterfacesOf<B>>,
    filter: Option<String>,
}

impl<B> LowerComponents<B>
where
    B: ComponentBindings,
    B::Component: NetComponent,
{
    fn next_from_interfaces(&mut self) -> Option<Result<ComponentInfo>> {
        while let Some(interfaces) = self.interfaces.as_mut() {
            match interfaces.next() {
                Ok(Some(interface)) => match interface.lower_component() {
                    Ok(lower) => {
                        if let Some(item) = snapshot(&lower, self.filter.as_deref()) {
                            return Some(item);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Skipping interface without lower component");
                        return Some(Err(e));
                    }
                },
                Ok(None) => self.interfaces = None,
                Err(e) => {
                    self.interfaces = None;
                    return Some(Err(e));
                }
            }
        }
        None
    }

    /// Advance to the next enabled path. `Some(Err)` reports a path that had
    /// to be skipped; `None` means no paths remain.
    fn open_next_path(&mut self) -> Option<Result<()>> {
        loop {
            let paths = self.paths.as_mut()?;
            let path = match paths.next() {
                Ok(Some(path)) => path,
                Ok(None) => {
                    self.paths = None;
                    return None;
                }
                Err(e) => {
                    self.paths = None;
                    return Some(Err(e));
                }
            };

            match path.is_enabled() {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Skipping disabled binding path");
                    continue;
                }
                Err(e) => return Some(Err(e)),
            }

            let interfaces = path.interfaces().and_then(|mut interfaces| {
                interfaces.reset()?;
                Ok(interfaces)
            });
            return Some(interfaces.map(|i| self.interfaces = Some(i)));
        }
    }
}

impl<B> Iterator for LowerComponents<B>
where
    B: ComponentBindings,
    B::Component: NetComponent,
{
    type Item = Result<ComponentInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.next_from_interfaces() {
                return Some(item);
            }
            match self.open_next_path()? {
                Ok(()) => continue,
                Err(e) => {
                    warn!(error = %e, "Skipping binding path");
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Start a walk below `reference`.
///
/// Returns `Err` when the walk has to be abandoned for this reference: the
/// component lacks the binding-path capability or its paths cannot be
/// enumerated. That is not fatal to the caller.
pub fn walk<C>(reference: &C, filter: Option<&str>) -> Result<LowerComponents<C::Bindings>>
where
    C: NetComponent,
{
    let bindings = reference.bindings().ok_or(NetCfgError::Unsupported)?;
    let mut paths = bindings.paths_below()?;
    paths.reset()?;

    Ok(LowerComponents {
        paths: Some(paths),
        interfaces: None,
        filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
    })
}
