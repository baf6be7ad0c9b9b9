//! Backend for platforms without a network configuration service.

use uguid::Guid;

use super::{
    BindingInterface, BindingPath, ClassSetup, ComponentBindings, NetCfg, NetComponent,
    ServiceEnum, ServiceLock, ServiceRuntime,
};
use crate::error::{NetCfgError, Result};

/// Runtime whose every service creation fails with
/// [`NetCfgError::Unavailable`].
#[derive(Debug, Default)]
pub struct UnsupportedRuntime;

impl UnsupportedRuntime {
    pub fn init() -> Result<Self> {
        Ok(Self)
    }
}

impl ServiceRuntime for UnsupportedRuntime {
    type Service = Never;

    fn create_service(&self) -> Result<Never> {
        Err(NetCfgError::Unavailable(format!(
            "no network configuration service on {}",
            std::env::consts::OS
        )))
    }
}

/// Uninhabited service type; no value of it can exist.
#[derive(Debug)]
pub enum Never {}

impl ServiceEnum for Never {
    type Item = Never;

    fn reset(&mut self) -> Result<()> {
        match *self {}
    }

    fn next(&mut self) -> Result<Option<Never>> {
        match *self {}
    }
}

impl NetComponent for Never {
    type Bindings = Never;

    fn id(&self) -> Result<String> {
        match *self {}
    }
    fn display_name(&self) -> Result<String> {
        match *self {}
    }
    fn bind_name(&self) -> Result<String> {
        match *self {}
    }
    fn device_status(&self) -> Result<u32> {
        match *self {}
    }
    fn class_guid(&self) -> Result<Guid> {
        match *self {}
    }
    fn instance_guid(&self) -> Result<Guid> {
        match *self {}
    }
    fn bindings(&self) -> Option<Never> {
        match *self {}
    }
}

impl ComponentBindings for Never {
    type Component = Never;
    type Path = Never;
    type Paths = Never;

    fn paths_below(&self) -> Result<Never> {
        match *self {}
    }
}

impl BindingPath for Never {
    type Component = Never;
    type Interface = Never;
    type Interfaces = Never;

    fn is_enabled(&self) -> Result<bool> {
        match *self {}
    }
    fn interfaces(&self) -> Result<Never> {
        match *self {}
    }
}

impl BindingInterface for Never {
    type Component = Never;

    fn lower_component(&self) -> Result<Never> {
        match *self {}
    }
}

impl ClassSetup for Never {
    type Component = Never;

    fn deinstall(&self, _component: &Never) -> Result<()> {
        match *self {}
    }
}

impl ServiceLock for Never {
    fn acquire(&self, _timeout_ms: u32, _client: &str) -> Result<()> {
        match *self {}
    }
    fn release(&self) -> Result<()> {
        match *self {}
    }
}

impl NetCfg for Never {
    type Component = Never;
    type Components = Never;
    type ClassSetup = Never;
    type Lock = Never;

    fn initialize(&self) -> Result<()> {
        match *self {}
    }
    fn uninitialize(&self) -> Result<()> {
        match *self {}
    }
    fn enum_components(&self, _class: &Guid) -> Result<Never> {
        match *self {}
    }
    fn find_component(&self, _id: &str) -> Result<Option<Never>> {
        match *self {}
    }
    fn query_class_setup(&self, _class: &Guid) -> Result<Never> {
        match *self {}
    }
    fn write_lock(&self) -> Result<Never> {
        match *self {}
    }
    fn apply(&self) -> Result<()> {
        match *self {}
    }
}
