//! # PruneNetCfg - list and remove installed network components
//!
//! Talks to the operating system's network configuration service to list
//! installed network components (adapters, protocols, clients and services),
//! lets the user pick some of them, and removes the picked ones in a single
//! committed batch under the service's exclusive write lock.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       PruneNetCfg                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap) + Settings                                      │
//! │    └── Commands: list, prune (-d)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Listing phase (ConfigSession)                              │
//! │    ├── enumerate: top-level components of one class         │
//! │    ├── bindings: components bound below a reference         │
//! │    └── selection: prompt / predicate -> SelectionSet        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Removal phase (RemovalTransaction)                         │
//! │    ├── WriteLockGuard, then ConfigSession                   │
//! │    ├── find + deinstall per selected id                     │
//! │    └── apply once                                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Service contract (NetCfg traits)                           │
//! │    ├── windows: COM backend                                 │
//! │    └── unsupported: every other platform                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use prunenetcfg::enumerate::enumerate;
//! use prunenetcfg::service::PlatformRuntime;
//! use prunenetcfg::session::ConfigSession;
//! use prunenetcfg::translate::GUID_DEVCLASS_NET;
//!
//! fn main() -> anyhow::Result<()> {
//!     let runtime = PlatformRuntime::init()?;
//!     let session = ConfigSession::open(&runtime)?;
//!
//!     for component in enumerate(session.service(), &GUID_DEVCLASS_NET, Some("Realtek"))? {
//!         match component {
//!             Ok(info) => println!("{} {}", info.id, info.display_name),
//!             Err(e) => eprintln!("skipped: {}", e),
//!         }
//!     }
//!
//!     session.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`bindings`] - Binding-path walk below a reference component
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Run settings built from CLI flags
//! - [`console`] - Component blocks, prompt text and failure lines
//! - [`enumerate`] - Top-level component enumeration
//! - [`error`] - Service error type
//! - [`lock`] - Write-lock guard
//! - [`removal`] - Locked batch removal
//! - [`selection`] - Removal candidate selection
//! - [`service`] - Configuration service contract and backends
//! - [`session`] - Initialized service sessions
//! - [`translate`] - Status code and class GUID tables

pub mod bindings;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod enumerate;
pub mod error;
pub mod lock;
pub mod removal;
pub mod selection;
pub mod service;
pub mod session;
pub mod translate;

pub use cli::Cli;
pub use config::{Mode, Settings};
pub use error::NetCfgError;
