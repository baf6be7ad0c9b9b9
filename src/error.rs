//! Error types for PruneNetCfg.

use thiserror::Error;

use crate::translate::{format_status, NETCFG_E_NO_WRITE_LOCK};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetCfgError {
    /// The configuration service returned a failing status code.
    #[error("{}", format_status(*code))]
    Status { code: u32 },

    /// Another client holds the write lock.
    #[error("NetCfg is already write-locked by {}", owner.as_deref().unwrap_or("<unknown client>"))]
    WriteLocked { owner: Option<String> },

    /// The object does not expose the requested capability.
    #[error("capability not supported")]
    Unsupported,

    /// No configuration service backend exists on this platform.
    #[error("configuration service unavailable: {0}")]
    Unavailable(String),
}

impl NetCfgError {
    pub fn status(code: u32) -> Self {
        Self::Status { code }
    }

    /// Status code reported for this error, used in the `0x%08X` diagnostics.
    pub fn code(&self) -> u32 {
        match self {
            Self::Status { code } => *code,
            Self::WriteLocked { .. } => NETCFG_E_NO_WRITE_LOCK,
            Self::Unsupported => E_NOINTERFACE,
            Self::Unavailable(_) => E_FAIL,
        }
    }
}

pub const E_FAIL: u32 = 0x8000_4005;
pub const E_NOINTERFACE: u32 = 0x8000_4002;

pub type Result<T> = std::result::Result<T, NetCfgError>;
