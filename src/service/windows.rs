//! Configuration service backed by the Windows network configuration COM API.
//!
//! Calls whose result distinguishes `S_OK` from `S_FALSE`, or which carry
//! optional out-parameters, go through the interface vtable so that the
//! exact status code stays visible.

use std::ffi::c_void;
use std::ptr;

use uguid::Guid;
use windows::core::{Interface, GUID, HRESULT, HSTRING, PCWSTR, PWSTR};
use windows::Win32::NetworkManagement::NetManagement::{
    CLSID_CNetCfg, IEnumNetCfgBindingInterface, IEnumNetCfgBindingPath, IEnumNetCfgComponent,
    INetCfg, INetCfgBindingInterface, INetCfgBindingPath, INetCfgClass, INetCfgClassSetup,
    INetCfgComponent, INetCfgComponentBindings, INetCfgLock,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoTaskMemFree, CoUninitialize, CLSCTX_SERVER,
    COINIT_APARTMENTTHREADED,
};

use super::{
    BindingInterface, BindingPath, ClassSetup, ComponentBindings, NetCfg, NetComponent,
    ServiceEnum, ServiceLock, ServiceRuntime,
};
use crate::error::{NetCfgError, Result, E_FAIL};
use crate::translate::NETCFG_E_NO_WRITE_LOCK;

const S_FALSE: HRESULT = HRESULT(1);

/// `EBP_BELOW`: binding paths that lead below the component.
const EBP_BELOW: u32 = 0x2;

fn status(e: windows::core::Error) -> NetCfgError {
    NetCfgError::status(e.code().0 as u32)
}

fn check(hr: HRESULT) -> Result<()> {
    if hr.is_err() {
        Err(NetCfgError::status(hr.0 as u32))
    } else {
        Ok(())
    }
}

fn to_guid(g: GUID) -> Guid {
    let mut bytes = [0u8; 16];
    bytes[0..4].copy_from_slice(&g.data1.to_le_bytes());
    bytes[4..6].copy_from_slice(&g.data2.to_le_bytes());
    bytes[6..8].copy_from_slice(&g.data3.to_le_bytes());
    bytes[8..16].copy_from_slice(&g.data4);
    Guid::from_bytes(bytes)
}

fn from_guid(g: &Guid) -> GUID {
    let b = g.to_bytes();
    GUID::from_values(
        u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        u16::from_le_bytes([b[4], b[5]]),
        u16::from_le_bytes([b[6], b[7]]),
        [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]],
    )
}

/// Copy a service-allocated string and free it.
///
/// # Safety
/// `p` must be null or a string allocated with `CoTaskMemAlloc`.
unsafe fn take_string(p: PWSTR) -> Result<String> {
    if p.is_null() {
        return Err(NetCfgError::status(E_FAIL));
    }
    let s = p.to_string();
    CoTaskMemFree(Some(p.0 as *const c_void));
    s.map_err(|_| NetCfgError::status(E_FAIL))
}

/// Process-wide COM apartment. Uninitialized when dropped.
pub struct ComRuntime {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ComRuntime {
    pub fn init() -> Result<Self> {
        // SAFETY: paired with CoUninitialize in Drop, on the same thread.
        unsafe { check(CoInitializeEx(None, COINIT_APARTMENTTHREADED))? };
        Ok(Self {
            _not_send: std::marker::PhantomData,
        })
    }
}

impl Drop for ComRuntime {
    fn drop(&mut self) {
        // SAFETY: CoInitializeEx succeeded in `init`.
        unsafe { CoUninitialize() };
    }
}

impl ServiceRuntime for ComRuntime {
    type Service = ComNetCfg;

    fn create_service(&self) -> Result<ComNetCfg> {
        // SAFETY: COM is initialized for the lifetime of `self`.
        let netcfg: INetCfg =
            unsafe { CoCreateInstance(&CLSID_CNetCfg, None, CLSCTX_SERVER) }.map_err(status)?;
        Ok(ComNetCfg(netcfg))
    }
}

pub struct ComNetCfg(INetCfg);

impl NetCfg for ComNetCfg {
    type Component = ComComponent;
    type Components = ComComponents;
    type ClassSetup = ComClassSetup;
    type Lock = ComLock;

    fn initialize(&self) -> Result<()> {
        unsafe { self.0.Initialize(ptr::null()) }.map_err(status)
    }

    fn uninitialize(&self) -> Result<()> {
        unsafe { self.0.Uninitialize() }.map_err(status)
    }

    fn enum_components(&self, class: &Guid) -> Result<ComComponents> {
        let class = from_guid(class);
        let inner = unsafe { self.0.EnumComponents(&class) }.map_err(status)?;
        Ok(ComComponents(inner))
    }

    fn find_component(&self, id: &str) -> Result<Option<ComComponent>> {
        let id = HSTRING::from(id);
        let mut raw: *mut c_void = ptr::null_mut();
        // SAFETY: `id` outlives the call; on success `raw` holds an owned reference.
        let hr = unsafe {
            (Interface::vtable(&self.0).FindComponent)(
                Interface::as_raw(&self.0),
                PCWSTR(id.as_ptr()),
                &mut raw,
            )
        };
        check(hr)?;
        if hr == S_FALSE || raw.is_null() {
            return Ok(None);
        }
        Ok(Some(ComComponent(unsafe { INetCfgComponent::from_raw(raw) })))
    }

    fn query_class_setup(&self, class: &Guid) -> Result<ComClassSetup> {
        let class = from_guid(class);
        let mut raw: *mut c_void = ptr::null_mut();
        // SAFETY: requesting INetCfgClass; `raw` receives an owned reference.
        let hr = unsafe {
            (Interface::vtable(&self.0).QueryNetCfgClass)(
                Interface::as_raw(&self.0),
                &class,
                &INetCfgClass::IID,
                &mut raw,
            )
        };
        check(hr)?;
        if raw.is_null() {
            return Err(NetCfgError::Unsupported);
        }
        let class = unsafe { INetCfgClass::from_raw(raw) };
        let setup = class
            .cast::<INetCfgClassSetup>()
            .map_err(|_| NetCfgError::Unsupported)?;
        Ok(ComClassSetup(setup))
    }

    fn write_lock(&self) -> Result<ComLock> {
        self.0
            .cast::<INetCfgLock>()
            .map(ComLock)
            .map_err(|_| NetCfgError::Unsupported)
    }

    fn apply(&self) -> Result<()> {
        unsafe { self.0.Apply() }.map_err(status)
    }
}

macro_rules! com_enum {
    ($name:ident, $enum:ty, $elem:ty, $wrap:ident) => {
        pub struct $name($enum);

        impl ServiceEnum for $name {
            type Item = $wrap;

            fn reset(&mut self) -> Result<()> {
                unsafe { self.0.Reset() }.map_err(status)
            }

            fn next(&mut self) -> Result<Option<$wrap>> {
                let mut raw: *mut c_void = ptr::null_mut();
                // SAFETY: one slot requested; `raw` receives an owned reference when S_OK.
                let hr = unsafe {
                    (Interface::vtable(&self.0).Next)(
                        Interface::as_raw(&self.0),
                        1,
                        &mut raw,
                        ptr::null_mut(),
                    )
                };
                check(hr)?;
                if hr != HRESULT(0) || raw.is_null() {
                    return Ok(None);
                }
                Ok(Some($wrap(unsafe { <$elem>::from_raw(raw) })))
            }
        }
    };
}

com_enum!(ComComponents, IEnumNetCfgComponent, INetCfgComponent, ComComponent);
com_enum!(ComBindingPaths, IEnumNetCfgBindingPath, INetCfgBindingPath, ComBindingPath);
com_enum!(
    ComBindingInterfaces,
    IEnumNetCfgBindingInterface,
    INetCfgBindingInterface,
    ComBindingInterface
);

pub struct ComComponent(INetCfgComponent);

impl NetComponent for ComComponent {
    type Bindings = ComBindings;

    fn id(&self) -> Result<String> {
        unsafe { take_string(self.0.GetId().map_err(status)?) }
    }

    fn display_name(&self) -> Result<String> {
        unsafe { take_string(self.0.GetDisplayName().map_err(status)?) }
    }

    fn bind_name(&self) -> Result<String> {
        unsafe { take_string(self.0.GetBindName().map_err(status)?) }
    }

    fn device_status(&self) -> Result<u32> {
        unsafe { self.0.GetDeviceStatus() }.map_err(status)
    }

    fn class_guid(&self) -> Result<Guid> {
        unsafe { self.0.GetClassGuid() }.map(to_guid).map_err(status)
    }

    fn instance_guid(&self) -> Result<Guid> {
        unsafe { self.0.GetInstanceGuid() }.map(to_guid).map_err(status)
    }

    fn bindings(&self) -> Option<ComBindings> {
        self.0.cast::<INetCfgComponentBindings>().ok().map(ComBindings)
    }
}

pub struct ComBindings(INetCfgComponentBindings);

impl ComponentBindings for ComBindings {
    type Component = ComComponent;
    type Path = ComBindingPath;
    type Paths = ComBindingPaths;

    fn paths_below(&self) -> Result<ComBindingPaths> {
        unsafe { self.0.EnumBindingPaths(EBP_BELOW) }
            .map(ComBindingPaths)
            .map_err(status)
    }
}

pub struct ComBindingPath(INetCfgBindingPath);

impl BindingPath for ComBindingPath {
    type Component = ComComponent;
    type Interface = ComBindingInterface;
    type Interfaces = ComBindingInterfaces;

    fn is_enabled(&self) -> Result<bool> {
        // SAFETY: no arguments beyond `this`.
        let hr = unsafe { (Interface::vtable(&self.0).IsEnabled)(Interface::as_raw(&self.0)) };
        check(hr)?;
        Ok(hr == HRESULT(0))
    }

    fn interfaces(&self) -> Result<ComBindingInterfaces> {
        unsafe { self.0.EnumBindingInterfaces() }
            .map(ComBindingInterfaces)
            .map_err(status)
    }
}

pub struct ComBindingInterface(INetCfgBindingInterface);

impl BindingInterface for ComBindingInterface {
    type Component = ComComponent;

    fn lower_component(&self) -> Result<ComComponent> {
        unsafe { self.0.GetLowerComponent() }
            .map(ComComponent)
            .map_err(status)
    }
}

pub struct ComClassSetup(INetCfgClassSetup);

impl ClassSetup for ComClassSetup {
    type Component = ComComponent;

    fn deinstall(&self, component: &ComComponent) -> Result<()> {
        // SAFETY: no OBO token and no refs buffer requested.
        let hr = unsafe {
            (Interface::vtable(&self.0).DeInstall)(
                Interface::as_raw(&self.0),
                Interface::as_raw(&component.0),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        check(hr)
    }
}

pub struct ComLock(INetCfgLock);

impl ServiceLock for ComLock {
    fn acquire(&self, timeout_ms: u32, client: &str) -> Result<()> {
        let client = HSTRING::from(client);
        let mut owner = PWSTR::null();
        // SAFETY: `client` outlives the call; `owner` is freed by take_string.
        let hr = unsafe {
            (Interface::vtable(&self.0).AcquireWriteLock)(
                Interface::as_raw(&self.0),
                timeout_ms,
                PCWSTR(client.as_ptr()),
                &mut owner,
            )
        };
        let owner = if owner.is_null() {
            None
        } else {
            unsafe { take_string(owner) }.ok()
        };

        if hr == S_FALSE || hr.0 as u32 == NETCFG_E_NO_WRITE_LOCK {
            return Err(NetCfgError::WriteLocked { owner });
        }
        check(hr)
    }

    fn release(&self) -> Result<()> {
        unsafe { self.0.ReleaseWriteLock() }.map_err(status)
    }
}
