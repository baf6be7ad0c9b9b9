//! Console rendering of components and diagnostics.
//!
//! Everything here writes to a caller-supplied `Write` so the flows can be
//! tested against a buffer. Log records go through `tracing` instead.

use std::io::{self, Write};

use crate::enumerate::ComponentInfo;
use crate::error::NetCfgError;
use crate::translate::{class_name, format_guid, format_status};

/// Prompt shown for each removal candidate.
pub const REMOVE_PROMPT: &str = "Remove? [Y]es, [N]o: ";

/// Write the six-line component block followed by a blank line.
pub fn write_component<W: Write + ?Sized>(out: &mut W, info: &ComponentInfo) -> io::Result<()> {
    writeln!(out, "- Id:       {}", info.id)?;
    writeln!(out, "- Name:     {}", info.display_name)?;
    writeln!(out, "- BindName: {}", info.bind_name)?;
    writeln!(out, "- Status:   {}", info.device_status)?;
    writeln!(
        out,
        "- Class:    {} ({})",
        format_guid(&info.class_guid),
        class_name(&info.class_guid)
    )?;
    writeln!(out, "- Instance: {}", format_guid(&info.instance_guid))?;
    writeln!(out)
}

/// `<site>: Failed: 0x<code> (<name>)`
pub fn failure_line(site: &str, err: &NetCfgError) -> String {
    format!("{}: Failed: {}", site, format_status(err.code()))
}

/// Print a failure line for `site`. Console write errors are ignored; the
/// failure itself is what the caller propagates.
pub fn report_failure<W: Write + ?Sized>(out: &mut W, site: &str, err: &NetCfgError) {
    let _ = writeln!(out, "{}", failure_line(site, err));
}
