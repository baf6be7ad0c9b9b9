//! Configuration service abstraction.
//!
//! The network configuration service is an external collaborator. This
//! module describes the part of it the tool depends on as a family of traits,
//! so the session, lock, enumeration and removal logic can run against the
//! real OS backend or against the in-memory fake used by the tests.
//!
//! All calls are synchronous and block the calling thread.

#[cfg(test)]
pub mod fake;
#[cfg(not(windows))]
mod unsupported;
#[cfg(windows)]
pub mod windows;

#[cfg(not(windows))]
pub use unsupported::UnsupportedRuntime as PlatformRuntime;
#[cfg(windows)]
pub use windows::ComRuntime as PlatformRuntime;

use uguid::Guid;

use crate::error::Result;

/// A single-pass enumerator handed out by the service.
///
/// Must be reset before each fresh pass. `next` returns `Ok(None)` once the
/// sequence is exhausted.
pub trait ServiceEnum {
    type Item;

    fn reset(&mut self) -> Result<()>;

    fn next(&mut self) -> Result<Option<Self::Item>>;
}

/// One installed network component as exposed by the service.
///
/// Every property read goes back to the service and may fail independently.
pub trait NetComponent {
    type Bindings: ComponentBindings<Component = Self>;

    fn id(&self) -> Result<String>;
    fn display_name(&self) -> Result<String>;
    fn bind_name(&self) -> Result<String>;
    fn device_status(&self) -> Result<u32>;
    fn class_guid(&self) -> Result<Guid>;
    fn instance_guid(&self) -> Result<Guid>;

    /// Query the binding-path capability. `None` means the component cannot
    /// be graph-walked.
    fn bindings(&self) -> Option<Self::Bindings>;
}

/// Binding-path capability of a component.
pub trait ComponentBindings {
    type Component;
    type Path: BindingPath<Component = Self::Component>;
    type Paths: ServiceEnum<Item = Self::Path>;

    /// Enumerate the paths leading below this component.
    fn paths_below(&self) -> Result<Self::Paths>;
}

pub trait BindingPath {
    type Component;
    type Interface: BindingInterface<Component = Self::Component>;
    type Interfaces: ServiceEnum<Item = Self::Interface>;

    fn is_enabled(&self) -> Result<bool>;

    /// Interfaces of this path, in path order.
    fn interfaces(&self) -> Result<Self::Interfaces>;
}

pub trait BindingInterface {
    type Component;

    fn lower_component(&self) -> Result<Self::Component>;
}

/// Class-specific installer capability.
pub trait ClassSetup {
    type Component;

    /// Remove one component. Runs with no owning window and no reserved
    /// context.
    fn deinstall(&self, component: &Self::Component) -> Result<()>;
}

/// Exclusive write-lock capability of the service.
pub trait ServiceLock {
    /// Wait up to `timeout_ms` for exclusive write access, registering as
    /// `client`. Contention surfaces as [`NetCfgError::WriteLocked`].
    ///
    /// [`NetCfgError::WriteLocked`]: crate::error::NetCfgError::WriteLocked
    fn acquire(&self, timeout_ms: u32, client: &str) -> Result<()>;

    fn release(&self) -> Result<()>;
}

/// A handle to the configuration service.
pub trait NetCfg {
    type Component: NetComponent;
    type Components: ServiceEnum<Item = Self::Component>;
    type ClassSetup: ClassSetup<Component = Self::Component>;
    type Lock: ServiceLock;

    fn initialize(&self) -> Result<()>;
    fn uninitialize(&self) -> Result<()>;

    fn enum_components(&self, class: &Guid) -> Result<Self::Components>;

    /// Look a component up by id. `Ok(None)` when no such component exists.
    fn find_component(&self, id: &str) -> Result<Option<Self::Component>>;

    fn query_class_setup(&self, class: &Guid) -> Result<Self::ClassSetup>;

    /// Obtain the lock capability. Does not acquire anything.
    fn write_lock(&self) -> Result<Self::Lock>;

    /// Apply all queued changes.
    fn apply(&self) -> Result<()>;
}

/// Process-wide service runtime. Creates independent service handles.
pub trait ServiceRuntime {
    type Service: NetCfg;

    fn create_service(&self) -> Result<Self::Service>;
}
