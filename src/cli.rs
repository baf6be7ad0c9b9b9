//! CLI argument parsing with clap.

use clap::Parser;

use crate::lock::{DEFAULT_CLIENT_LABEL, DEFAULT_LOCK_TIMEOUT_MS};

#[derive(Parser, Debug)]
#[command(name = "prunenetcfg")]
#[command(author, version, about = "List and remove installed network components")]
pub struct Cli {
    /// Prompt for each listed component and remove the accepted ones
    #[arg(short, long)]
    pub delete: bool,

    /// Only components whose display name contains this text (case-sensitive)
    pub filter: Option<String>,

    /// Component class: net, nettrans, netclient, netservice or a class GUID
    #[arg(long, default_value = "net")]
    pub class: String,

    /// Walk the binding paths below this component id instead of listing
    /// top-level components
    #[arg(long, value_name = "ID")]
    pub below: Option<String>,

    /// Write-lock timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_LOCK_TIMEOUT_MS)]
    pub timeout: u32,

    /// Client label recorded as the write-lock holder
    #[arg(long, default_value = DEFAULT_CLIENT_LABEL)]
    pub client: String,

    /// Accept every listed component without prompting (requires --delete)
    #[arg(short, long, requires = "delete")]
    pub yes: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}
