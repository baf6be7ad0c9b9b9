//! Validated run settings derived from the command line.

use anyhow::{Context, Result};
use uguid::Guid;

use crate::cli::Cli;
use crate::translate::parse_class;

/// Longest accepted write-lock timeout, in milliseconds.
pub const MAX_LOCK_TIMEOUT_MS: u32 = 600_000;

/// Longest accepted client label, in characters.
const MAX_CLIENT_LABEL_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the matching components and exit without touching anything
    List,
    /// Select components and remove them under the write lock
    Prune,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    /// Display-name filter; `None` matches everything
    pub filter: Option<String>,
    pub class: Guid,
    /// Reference component for a binding walk
    pub below: Option<String>,
    pub timeout_ms: u32,
    pub client: String,
    /// Accept every candidate without prompting
    pub assume_yes: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let class = parse_class(&cli.class)
            .with_context(|| format!("Invalid --class value '{}'", cli.class))?;

        let settings = Self {
            mode: if cli.delete { Mode::Prune } else { Mode::List },
            filter: cli.filter.clone().filter(|f| !f.is_empty()),
            class,
            below: cli.below.clone(),
            timeout_ms: cli.timeout,
            client: cli.client.clone(),
            assume_yes: cli.yes,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_LOCK_TIMEOUT_MS {
            anyhow::bail!(
                "Invalid lock timeout {} ms: must be between 1 and {}",
                self.timeout_ms,
                MAX_LOCK_TIMEOUT_MS
            );
        }

        if self.client.trim().is_empty() {
            anyhow::bail!("Client label cannot be empty");
        }
        if self.client.chars().count() > MAX_CLIENT_LABEL_LEN {
            anyhow::bail!(
                "Client label too long (max {} characters)",
                MAX_CLIENT_LABEL_LEN
            );
        }
        if self.client.chars().any(char::is_control) {
            anyhow::bail!("Client label contains control characters");
        }

        if let Some(below) = &self.below {
            if below.trim().is_empty() {
                anyhow::bail!("--below requires a component id");
            }
        }

        Ok(())
    }
}
