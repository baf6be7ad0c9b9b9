//! List command implementation.

use std::io::Write;

use anyhow::Result;

use crate::config::Settings;
use crate::service::ServiceRuntime;

/// Print every matching component. Never mutates anything.
pub fn run<R, W>(runtime: &R, settings: &Settings, out: &mut W) -> Result<()>
where
    R: ServiceRuntime,
    W: Write + ?Sized,
{
    super::list_candidates(runtime, settings, out, None)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::service::fake::{Call, FakeComponentSpec, FakePath, FakeRuntime, E_FAKE};
    use clap::Parser;

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["prunenetcfg"];
        argv.extend_from_slice(args);
        Settings::from_cli(&Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    fn list(runtime: &FakeRuntime, args: &[&str]) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run(runtime, &settings(args), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn two_adapters() -> FakeRuntime {
        FakeRuntime::new(vec![
            FakeComponentSpec::new("a", "Realtek PCIe"),
            FakeComponentSpec::new("b", "Intel Wifi"),
        ])
    }

    #[test]
    fn test_list_all_without_mutation() {
        let runtime = two_adapters();
        let (result, text) = list(&runtime, &[]);

        assert!(result.is_ok());
        assert_eq!(text.matches("- Id:").count(), 2);
        assert!(text.contains("- Name:     Realtek PCIe"));
        assert!(text.contains("- Name:     Intel Wifi"));
        assert!(!text.contains("Remove?"));

        assert_eq!(
            runtime.calls(),
            vec![Call::CreateService(1), Call::Initialize(1), Call::Uninitialize(1)]
        );
    }

    #[test]
    fn test_list_filtered() {
        let runtime = two_adapters();
        let (result, text) = list(&runtime, &["Intel"]);

        assert!(result.is_ok());
        assert_eq!(text.matches("- Id:").count(), 1);
        assert!(text.contains("- Id:       b"));
    }

    #[test]
    fn test_list_reports_skipped_item_and_succeeds() {
        let runtime = two_adapters();
        runtime.state.borrow_mut().fail_next_after = Some(1);
        let (result, text) = list(&runtime, &[]);

        assert!(result.is_ok());
        assert_eq!(text.matches("- Id:").count(), 1);
        assert!(text.contains("enumerate_components: Failed: 0x8000FFFF (<unknown error>)"));
    }

    #[test]
    fn test_list_initialize_failure_is_fatal() {
        let runtime = two_adapters();
        runtime.state.borrow_mut().fail_initialize = Some(E_FAKE);
        let (result, text) = list(&runtime, &[]);

        assert!(result.is_err());
        assert!(text.starts_with("enumerate_components: Failed: 0x8000FFFF"));
        assert_eq!(runtime.count(&Call::Uninitialize(1)), 0);
    }

    #[test]
    fn test_list_enumeration_setup_failure_is_fatal() {
        let runtime = two_adapters();
        runtime.state.borrow_mut().fail_enum = Some(E_FAKE);
        let (result, _) = list(&runtime, &[]);

        assert!(result.is_err());
        assert_eq!(runtime.count(&Call::Uninitialize(1)), 1);
    }

    #[test]
    fn test_list_uninitialize_failure_is_fatal() {
        let runtime = two_adapters();
        runtime.state.borrow_mut().fail_uninitialize = Some(E_FAKE);
        let (result, text) = list(&runtime, &[]);

        assert!(result.is_err());
        assert_eq!(text.matches("- Id:").count(), 2);
        assert_eq!(runtime.count(&Call::Uninitialize(1)), 1);
    }

    #[test]
    fn test_list_below_reference() {
        let runtime = FakeRuntime::new(vec![
            FakeComponentSpec::new("adapter", "Realtek PCIe").with_paths(vec![FakePath {
                enabled: true,
                lower: vec!["ms_tcpip".to_string()],
            }]),
            FakeComponentSpec::new("ms_tcpip", "Internet Protocol Version 4").hidden(),
        ]);
        let (result, text) = list(&runtime, &["--below", "adapter"]);

        assert!(result.is_ok());
        assert_eq!(text.matches("- Id:").count(), 1);
        assert!(text.contains("- Id:       ms_tcpip"));
    }

    #[test]
    fn test_list_below_without_bindings_is_not_fatal() {
        let runtime = two_adapters();
        let (result, text) = list(&runtime, &["--below", "a"]);

        assert!(result.is_ok());
        assert!(text.contains("walk_bindings: Failed: 0x80004002"));
    }

    #[test]
    fn test_list_below_unknown_reference_is_fatal() {
        let runtime = two_adapters();
        let (result, text) = list(&runtime, &["--below", "missing"]);

        assert!(result.is_err());
        assert!(text.contains("walk_bindings: missing not found"));
        assert_eq!(runtime.count(&Call::Uninitialize(1)), 1);
    }
}
