//! Top-level component enumeration.
//!
//! Enumeration tolerates partial failure: when one component's properties
//! cannot be read, that component is reported and skipped and the pass
//! continues with the next one.

use tracing::{debug, warn};
use uguid::Guid;

use crate::error::{NetCfgError, Result};
use crate::service::{NetCfg, NetComponent, ServiceEnum};

/// Read-only snapshot of one component as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Unique id, resolvable only within the session that produced it
    pub id: String,
    pub display_name: String,
    pub bind_name: String,
    /// Device status bitmask
    pub device_status: u32,
    pub class_guid: Guid,
    pub instance_guid: Guid,
}

/// Case-sensitive substring match on the display name. An absent or empty
/// filter matches everything.
pub fn matches_filter(display_name: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(f) => display_name.contains(f),
        None => true,
    }
}

/// Snapshot `component` if it passes `filter`.
///
/// Id and display name are read first so filtered-out components cost no
/// further round trips. Returns `None` when the filter rejects it.
pub(crate) fn snapshot<C: NetComponent>(
    component: &C,
    filter: Option<&str>,
) -> Option<Result<ComponentInfo>> {
    let head = component
        .id()
        .and_then(|id| component.display_name().map(|name| (id, name)));
    let (id, display_name) = match head {
        Ok(head) => head,
        Err(e) => {
            warn!(error = %e, "Skipping component without readable id or name");
            return Some(Err(e));
        }
    };

    if !matches_filter(&display_name, filter) {
        debug!(id = %id, "Filtered out");
        return None;
    }

    let rest = (|| -> Result<ComponentInfo> {
        Ok(ComponentInfo {
            bind_name: component.bind_name()?,
            device_status: component.device_status()?,
            class_guid: component.class_guid()?,
            instance_guid: component.instance_guid()?,
            id: id.clone(),
            display_name,
        })
    })();

    if let Err(e) = &rest {
        warn!(id = %id, error = %e, "Skipping component with unreadable properties");
    }
    Some(rest)
}

/// Lazy, single-pass sequence of top-level components.
///
/// Yields `Err` for a component that had to be skipped. A failure of the
/// underlying enumerator is yielded once and ends the sequence.
pub struct Components<E> {
    inner: E,
    filter: Option<String>,
    done: bool,
}

impl<E> Iterator for Components<E>
where
    E: ServiceEnum,
    E::Item: NetComponent,
{
    type Item = Result<ComponentInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.inner.next() {
                Ok(Some(component)) => {
                    if let Some(item) = snapshot(&component, self.filter.as_deref()) {
                        return Some(item);
                    }
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    warn!(error = %e, "Component enumeration stopped early");
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Enumerate the top-level components of `class`, optionally filtered.
///
/// Failing to start the enumeration is fatal; failures on individual items
/// are surfaced through the returned sequence.
pub fn enumerate<S: NetCfg>(
    service: &S,
    class: &Guid,
    filter: Option<&str>,
) -> Result<Components<S::Components>> {
    let mut inner = service.enum_components(class)?;
    inner.reset()?;

    Ok(Components {
        inner,
        filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
        done: false,
    })
}

/// Collect the ids of a finished pass, dropping skipped items.
pub fn ids<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = std::result::Result<ComponentInfo, NetCfgError>>,
{
    items.into_iter().filter_map(|r| r.ok()).map(|c| c.id).collect()
}
