//! Static translation tables: status codes, device class GUIDs, GUID strings.
//!
//! Unknown values never fail translation; they render as an explicit
//! placeholder instead.

use uguid::{guid, Guid};

pub const NETCFG_E_ALREADY_INITIALIZED: u32 = 0x8004_A020;
pub const NETCFG_E_NOT_INITIALIZED: u32 = 0x8004_A021;
pub const NETCFG_E_IN_USE: u32 = 0x8004_A022;
pub const NETCFG_E_NO_WRITE_LOCK: u32 = 0x8004_A024;
pub const NETCFG_E_NEED_REBOOT: u32 = 0x8004_A025;
pub const NETCFG_E_ACTIVE_RAS_CONNECTIONS: u32 = 0x8004_A026;
pub const NETCFG_E_ADAPTER_NOT_FOUND: u32 = 0x8004_A027;
pub const NETCFG_E_COMPONENT_REMOVED_PENDING_REBOOT: u32 = 0x8004_A028;
pub const NETCFG_E_MAX_FILTER_LIMIT: u32 = 0x8004_A029;
pub const NETCFG_E_VMSWITCH_ACTIVE_OVER_ADAPTER: u32 = 0x8004_A02A;
pub const NETCFG_E_DUPLICATE_INSTANCEID: u32 = 0x8004_A02B;
pub const NETCFG_S_REBOOT: u32 = 0x0004_A020;
pub const NETCFG_S_DISABLE_QUERY: u32 = 0x0004_A022;
pub const NETCFG_S_STILL_REFERENCED: u32 = 0x0004_A023;
pub const NETCFG_S_CAUSED_SETUP_CHANGE: u32 = 0x0004_A024;
pub const NETCFG_S_COMMIT_NOW: u32 = 0x0004_A025;

const STATUS_NAMES: &[(u32, &str)] = &[
    (NETCFG_E_ALREADY_INITIALIZED, "NETCFG_E_ALREADY_INITIALIZED"),
    (NETCFG_E_NOT_INITIALIZED, "NETCFG_E_NOT_INITIALIZED"),
    (NETCFG_E_IN_USE, "NETCFG_E_IN_USE"),
    (NETCFG_E_NO_WRITE_LOCK, "NETCFG_E_NO_WRITE_LOCK"),
    (NETCFG_E_NEED_REBOOT, "NETCFG_E_NEED_REBOOT"),
    (NETCFG_E_ACTIVE_RAS_CONNECTIONS, "NETCFG_E_ACTIVE_RAS_CONNECTIONS"),
    (NETCFG_E_ADAPTER_NOT_FOUND, "NETCFG_E_ADAPTER_NOT_FOUND"),
    (
        NETCFG_E_COMPONENT_REMOVED_PENDING_REBOOT,
        "NETCFG_E_COMPONENT_REMOVED_PENDING_REBOOT",
    ),
    (NETCFG_E_MAX_FILTER_LIMIT, "NETCFG_E_MAX_FILTER_LIMIT"),
    (
        NETCFG_E_VMSWITCH_ACTIVE_OVER_ADAPTER,
        "NETCFG_E_VMSWITCH_ACTIVE_OVER_ADAPTER",
    ),
    (NETCFG_E_DUPLICATE_INSTANCEID, "NETCFG_E_DUPLICATE_INSTANCEID"),
    (NETCFG_S_REBOOT, "NETCFG_S_REBOOT"),
    (NETCFG_S_DISABLE_QUERY, "NETCFG_S_DISABLE_QUERY"),
    (NETCFG_S_STILL_REFERENCED, "NETCFG_S_STILL_REFERENCED"),
    (NETCFG_S_CAUSED_SETUP_CHANGE, "NETCFG_S_CAUSED_SETUP_CHANGE"),
    (NETCFG_S_COMMIT_NOW, "NETCFG_S_COMMIT_NOW"),
];

pub const GUID_DEVCLASS_NET: Guid = guid!("4d36e972-e325-11ce-bfc1-08002be10318");
pub const GUID_DEVCLASS_NETCLIENT: Guid = guid!("4d36e973-e325-11ce-bfc1-08002be10318");
pub const GUID_DEVCLASS_NETSERVICE: Guid = guid!("4d36e974-e325-11ce-bfc1-08002be10318");
pub const GUID_DEVCLASS_NETTRANS: Guid = guid!("4d36e975-e325-11ce-bfc1-08002be10318");

/// Known classes: short CLI name, GUID, symbolic name.
const CLASSES: &[(&str, Guid, &str)] = &[
    ("net", GUID_DEVCLASS_NET, "GUID_DEVCLASS_NET"),
    ("nettrans", GUID_DEVCLASS_NETTRANS, "GUID_DEVCLASS_NETTRANS"),
    ("netclient", GUID_DEVCLASS_NETCLIENT, "GUID_DEVCLASS_NETCLIENT"),
    ("netservice", GUID_DEVCLASS_NETSERVICE, "GUID_DEVCLASS_NETSERVICE"),
];

/// Symbolic name of a configuration status code.
pub fn status_name(code: u32) -> &'static str {
    STATUS_NAMES
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, name)| *name)
        .unwrap_or("<unknown error>")
}

/// Render a status code as `0x%08X (<name>)`.
pub fn format_status(code: u32) -> String {
    format!("0x{:08X} ({})", code, status_name(code))
}

/// Symbolic name of a network device class.
pub fn class_name(class: &Guid) -> &'static str {
    CLASSES
        .iter()
        .find(|(_, guid, _)| guid == class)
        .map(|(_, _, name)| *name)
        .unwrap_or("<unknown class>")
}

/// Registry form of a GUID: upper-case hex in braces.
///
/// # Examples
/// ```
/// use prunenetcfg::translate::{format_guid, GUID_DEVCLASS_NET};
/// assert_eq!(
///     format_guid(&GUID_DEVCLASS_NET),
///     "{4D36E972-E325-11CE-BFC1-08002BE10318}"
/// );
/// ```
pub fn format_guid(guid: &Guid) -> String {
    format!("{{{}}}", guid).to_ascii_uppercase()
}

/// Parse a class given either by short name (`net`, `nettrans`, ...) or as a
/// GUID string with or without braces.
pub fn parse_class(s: &str) -> anyhow::Result<Guid> {
    let lowered = s.trim().to_ascii_lowercase();
    if let Some((_, guid, _)) = CLASSES.iter().find(|(name, _, _)| *name == lowered) {
        return Ok(*guid);
    }

    let bare = lowered.trim_start_matches('{').trim_end_matches('}');
    bare.parse::<Guid>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid class '{}'. Use net, nettrans, netclient, netservice or a GUID",
            s
        )
    })
}
