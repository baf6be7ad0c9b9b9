//! In-memory configuration service for tests.
//!
//! Holds an inventory of components and binding paths, injects failures on
//! request, and records every session, lock and mutation call so tests can
//! assert on ordering and counts.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use uguid::Guid;

use super::{
    BindingInterface, BindingPath, ClassSetup, ComponentBindings, NetCfg, NetComponent,
    ServiceEnum, ServiceLock, ServiceRuntime,
};
use crate::error::{NetCfgError, Result};
use crate::translate::{GUID_DEVCLASS_NET, NETCFG_E_NO_WRITE_LOCK};

pub const E_FAKE: u32 = 0x8000_FFFF;

/// Property of a component that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Id,
    DisplayName,
    BindName,
    DeviceStatus,
    ClassGuid,
    InstanceGuid,
}

#[derive(Debug, Clone)]
pub struct FakePath {
    pub enabled: bool,
    /// Ids of the lower components, one per interface.
    pub lower: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FakeComponentSpec {
    pub id: String,
    pub display_name: String,
    pub bind_name: String,
    pub status: u32,
    pub class: Guid,
    pub instance: Guid,
    /// Returned by top-level enumeration of its class.
    pub top_level: bool,
    pub failing: Option<Property>,
    /// `None` when the component lacks the binding capability.
    pub paths: Option<Vec<FakePath>>,
}

impl FakeComponentSpec {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            bind_name: format!("{{{}}}", id.to_ascii_uppercase()),
            status: 0,
            class: GUID_DEVCLASS_NET,
            instance: Guid::ZERO,
            top_level: true,
            failing: None,
            paths: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.top_level = false;
        self
    }

    pub fn failing(mut self, property: Property) -> Self {
        self.failing = Some(property);
        self
    }

    pub fn with_class(mut self, class: Guid) -> Self {
        self.class = class;
        self
    }

    pub fn with_paths(mut self, paths: Vec<FakePath>) -> Self {
        self.paths = Some(paths);
        self
    }
}

/// Call recorded by the fake, tagged with the service serial where relevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateService(usize),
    Initialize(usize),
    Uninitialize(usize),
    AcquireLock { timeout_ms: u32, client: String },
    ReleaseLock,
    FindComponent(String),
    Deinstall(String),
    Apply,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub components: Vec<FakeComponentSpec>,
    pub calls: Vec<Call>,
    pub fail_create: Option<u32>,
    pub fail_initialize: Option<u32>,
    pub fail_uninitialize: Option<u32>,
    pub fail_enum: Option<u32>,
    /// Top-level enumeration stops with an error after this many items.
    pub fail_next_after: Option<usize>,
    /// Contention: the lock is held by this client.
    pub lock_owner: Option<String>,
    pub fail_lock: Option<u32>,
    pub fail_deinstall: HashSet<String>,
    pub fail_class_setup: HashSet<Guid>,
    pub fail_apply: Option<u32>,
    services: usize,
    lock_held: bool,
}

impl FakeState {
    fn spec(&self, id: &str) -> Option<FakeComponentSpec> {
        self.components.iter().find(|c| c.id == id).cloned()
    }

    fn check_property(&self, id: &str, property: Property) -> Result<()> {
        match self.spec(id) {
            Some(spec) if spec.failing == Some(property) => Err(NetCfgError::status(E_FAKE)),
            Some(_) => Ok(()),
            None => Err(NetCfgError::status(E_FAKE)),
        }
    }
}

/// Shared handle onto the fake's state.
#[derive(Debug, Clone, Default)]
pub struct FakeRuntime {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeRuntime {
    pub fn new(components: Vec<FakeComponentSpec>) -> Self {
        let runtime = Self::default();
        runtime.state.borrow_mut().components = components;
        runtime
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn deinstalled(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Deinstall(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn lock_held(&self) -> bool {
        self.state.borrow().lock_held
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl ServiceRuntime for FakeRuntime {
    type Service = FakeService;

    fn create_service(&self) -> Result<FakeService> {
        if let Some(code) = self.state.borrow().fail_create {
            return Err(NetCfgError::status(code));
        }
        let serial = {
            let mut state = self.state.borrow_mut();
            state.services += 1;
            state.services
        };
        self.record(Call::CreateService(serial));
        Ok(FakeService {
            runtime: self.clone(),
            serial,
        })
    }
}

#[derive(Debug)]
pub struct FakeService {
    runtime: FakeRuntime,
    pub serial: usize,
}

impl FakeService {
    fn component(&self, id: &str) -> FakeComponent {
        FakeComponent {
            runtime: self.runtime.clone(),
            id: id.to_string(),
        }
    }
}

impl NetCfg for FakeService {
    type Component = FakeComponent;
    type Components = FakeEnum<FakeComponent>;
    type ClassSetup = FakeClassSetup;
    type Lock = FakeLock;

    fn initialize(&self) -> Result<()> {
        if let Some(code) = self.runtime.state.borrow().fail_initialize {
            return Err(NetCfgError::status(code));
        }
        self.runtime.record(Call::Initialize(self.serial));
        Ok(())
    }

    fn uninitialize(&self) -> Result<()> {
        self.runtime.record(Call::Uninitialize(self.serial));
        match self.runtime.state.borrow().fail_uninitialize {
            Some(code) => Err(NetCfgError::status(code)),
            None => Ok(()),
        }
    }

    fn enum_components(&self, class: &Guid) -> Result<FakeEnum<FakeComponent>> {
        let state = self.runtime.state.borrow();
        if let Some(code) = state.fail_enum {
            return Err(NetCfgError::status(code));
        }
        let items = state
            .components
            .iter()
            .filter(|c| c.top_level && c.class == *class)
            .map(|c| Ok(self.component(&c.id)))
            .collect::<Vec<_>>();
        let items = match state.fail_next_after {
            Some(n) if n < items.len() => {
                let mut truncated: Vec<_> = items.into_iter().take(n).collect();
                truncated.push(Err(NetCfgError::status(E_FAKE)));
                truncated
            }
            _ => items,
        };
        Ok(FakeEnum::new(items))
    }

    fn find_component(&self, id: &str) -> Result<Option<FakeComponent>> {
        self.runtime.record(Call::FindComponent(id.to_string()));
        let found = self.runtime.state.borrow().spec(id).is_some();
        Ok(found.then(|| self.component(id)))
    }

    fn query_class_setup(&self, class: &Guid) -> Result<FakeClassSetup> {
        if self.runtime.state.borrow().fail_class_setup.contains(class) {
            return Err(NetCfgError::Unsupported);
        }
        Ok(FakeClassSetup {
            runtime: self.runtime.clone(),
        })
    }

    fn write_lock(&self) -> Result<FakeLock> {
        Ok(FakeLock {
            runtime: self.runtime.clone(),
        })
    }

    fn apply(&self) -> Result<()> {
        self.runtime.record(Call::Apply);
        match self.runtime.state.borrow().fail_apply {
            Some(code) => Err(NetCfgError::status(code)),
            None => Ok(()),
        }
    }
}

/// Enumerator over a precomputed list; entries may be errors.
#[derive(Debug)]
pub struct FakeEnum<T> {
    items: Vec<Result<T>>,
    pos: usize,
    ready: bool,
}

impl<T> FakeEnum<T> {
    fn new(items: Vec<Result<T>>) -> Self {
        Self {
            items,
            pos: 0,
            ready: false,
        }
    }
}

impl<T: Clone> ServiceEnum for FakeEnum<T> {
    type Item = T;

    fn reset(&mut self) -> Result<()> {
        self.pos = 0;
        self.ready = true;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<T>> {
        if !self.ready {
            return Err(NetCfgError::status(E_FAKE));
        }
        let item = self.items.get(self.pos).cloned();
        self.pos += 1;
        item.transpose()
    }
}

#[derive(Debug, Clone)]
pub struct FakeComponent {
    runtime: FakeRuntime,
    id: String,
}

impl FakeComponent {
    fn read<T>(&self, property: Property, f: impl FnOnce(&FakeComponentSpec) -> T) -> Result<T> {
        let state = self.runtime.state.borrow();
        state.check_property(&self.id, property)?;
        let spec = state.spec(&self.id).ok_or(NetCfgError::status(E_FAKE))?;
        Ok(f(&spec))
    }
}

impl NetComponent for FakeComponent {
    type Bindings = FakeBindings;

    fn id(&self) -> Result<String> {
        self.read(Property::Id, |s| s.id.clone())
    }

    fn display_name(&self) -> Result<String> {
        self.read(Property::DisplayName, |s| s.display_name.clone())
    }

    fn bind_name(&self) -> Result<String> {
        self.read(Property::BindName, |s| s.bind_name.clone())
    }

    fn device_status(&self) -> Result<u32> {
        self.read(Property::DeviceStatus, |s| s.status)
    }

    fn class_guid(&self) -> Result<Guid> {
        self.read(Property::ClassGuid, |s| s.class)
    }

    fn instance_guid(&self) -> Result<Guid> {
        self.read(Property::InstanceGuid, |s| s.instance)
    }

    fn bindings(&self) -> Option<FakeBindings> {
        let paths = self.runtime.state.borrow().spec(&self.id)?.paths?;
        Some(FakeBindings {
            runtime: self.runtime.clone(),
            paths,
        })
    }
}

#[derive(Debug)]
pub struct FakeBindings {
    runtime: FakeRuntime,
    paths: Vec<FakePath>,
}

impl ComponentBindings for FakeBindings {
    type Component = FakeComponent;
    type Path = FakeBindingPath;
    type Paths = FakeEnum<FakeBindingPath>;

    fn paths_below(&self) -> Result<FakeEnum<FakeBindingPath>> {
        let items = self
            .paths
            .iter()
            .map(|p| {
                Ok(FakeBindingPath {
                    runtime: self.runtime.clone(),
                    path: p.clone(),
                })
            })
            .collect();
        Ok(FakeEnum::new(items))
    }
}

#[derive(Debug, Clone)]
pub struct FakeBindingPath {
    runtime: FakeRuntime,
    path: FakePath,
}

impl BindingPath for FakeBindingPath {
    type Component = FakeComponent;
    type Interface = FakeInterface;
    type Interfaces = FakeEnum<FakeInterface>;

    fn is_enabled(&self) -> Result<bool> {
        Ok(self.path.enabled)
    }

    fn interfaces(&self) -> Result<FakeEnum<FakeInterface>> {
        let items = self
            .path
            .lower
            .iter()
            .map(|id| {
                Ok(FakeInterface {
                    runtime: self.runtime.clone(),
                    lower: id.clone(),
                })
            })
            .collect();
        Ok(FakeEnum::new(items))
    }
}

#[derive(Debug, Clone)]
pub struct FakeInterface {
    runtime: FakeRuntime,
    lower: String,
}

impl BindingInterface for FakeInterface {
    type Component = FakeComponent;

    fn lower_component(&self) -> Result<FakeComponent> {
        if self.runtime.state.borrow().spec(&self.lower).is_none() {
            return Err(NetCfgError::status(E_FAKE));
        }
        Ok(FakeComponent {
            runtime: self.runtime.clone(),
            id: self.lower.clone(),
        })
    }
}

#[derive(Debug)]
pub struct FakeClassSetup {
    runtime: FakeRuntime,
}

impl ClassSetup for FakeClassSetup {
    type Component = FakeComponent;

    fn deinstall(&self, component: &FakeComponent) -> Result<()> {
        self.runtime.record(Call::Deinstall(component.id.clone()));
        if self.runtime.state.borrow().fail_deinstall.contains(&component.id) {
            return Err(NetCfgError::status(E_FAKE));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeLock {
    runtime: FakeRuntime,
}

impl ServiceLock for FakeLock {
    fn acquire(&self, timeout_ms: u32, client: &str) -> Result<()> {
        self.runtime.record(Call::AcquireLock {
            timeout_ms,
            client: client.to_string(),
        });
        let mut state = self.runtime.state.borrow_mut();
        if let Some(owner) = &state.lock_owner {
            return Err(NetCfgError::WriteLocked {
                owner: Some(owner.clone()),
            });
        }
        if let Some(code) = state.fail_lock {
            return Err(NetCfgError::status(code));
        }
        state.lock_held = true;
        Ok(())
    }

    fn release(&self) -> Result<()> {
        self.runtime.record(Call::ReleaseLock);
        let mut state = self.runtime.state.borrow_mut();
        if !state.lock_held {
            return Err(NetCfgError::status(NETCFG_E_NO_WRITE_LOCK));
        }
        state.lock_held = false;
        Ok(())
    }
}
