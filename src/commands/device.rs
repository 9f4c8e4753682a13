//! `rigging device` - apply configuration to one or every configured device

use crate::Context;
use crate::catalog;
use crate::cli::DeviceArgs;
use crate::commands::{self, RunFailed};
use crate::ui::{self, ConsoleReporter};
use anyhow::{Result, bail};
use declarative::{
    Catalog, Event, ExecuteOptions, ExecuteReport, ProviderRegistry, Reporter, execute,
};
use devicekit::{DeviceEntry, connect};

pub fn run(ctx: &Context, args: DeviceArgs) -> Result<()> {
    let config = commands::device_config(&ctx.settings, &args.target)?;
    let entries: Vec<DeviceEntry> = match &args.target.target {
        Some(target) => vec![config.resolve(target)?.clone()],
        None => config.entries().to_vec(),
    };
    if entries.is_empty() {
        bail!(
            "No devices configured in {}",
            config
                .source()
                .map_or_else(|| "device.conf".to_string(), |p| p.display().to_string())
        );
    }

    let catalog = match &args.apply {
        Some(path) => catalog::load(path)?.filter_by_target(args.only.as_deref()),
        None => Catalog::new(),
    };
    if let Some(path) = &args.apply
        && catalog.is_empty()
    {
        ui::warn(&format!("No resources to apply from {}", path.display()));
    }
    let registry = crate::resource::registry();
    let opts = commands::execute_options(&args.run, args.jobs, &ctx.settings);
    let mut reporter = ConsoleReporter::new(ctx.quiet);

    let mut failed = 0;
    for entry in &entries {
        failed += apply_to(entry, &catalog, &registry, &opts, &mut reporter);
    }

    if failed > 0 {
        return Err(RunFailed(failed).into());
    }
    Ok(())
}

/// Apply the catalog to one device; returns how many resources failed
fn apply_to(
    entry: &DeviceEntry,
    catalog: &Catalog,
    registry: &ProviderRegistry,
    opts: &ExecuteOptions,
    reporter: &mut dyn Reporter,
) -> usize {
    reporter.report(&Event::Info(format!(
        "starting applying configuration to {} at {}",
        entry.name, entry.url
    )));

    let device = match connect(entry) {
        Ok(device) => device,
        Err(e) => {
            ui::error(&format!("Could not connect to {}: {}", entry.name, e));
            return 1;
        }
    };

    let device = device.as_ref();
    let report = execute(catalog, registry, device, device, opts, reporter);
    log_summary(entry, &report);
    report.summary.failed
}

fn log_summary(entry: &DeviceEntry, report: &ExecuteReport) {
    let summary = &report.summary;
    log::info!(
        "{}: {} resource(s), {} changed, {} skipped, {} failed",
        entry.name,
        summary.total(),
        summary.total_changes(),
        summary.skipped,
        summary.failed
    );
    let diff = report.diff_summary();
    if diff.has_changes() {
        log::debug!("{}: {} attribute change(s)", entry.name, diff.total());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::{CollectingReporter, ResourceId, ResourceRequest};
    use devicekit::JSON_FILE;
    use std::fs;
    use tempfile::TempDir;

    fn wibble_catalog() -> Catalog {
        [ResourceRequest::new(
            "device_provider",
            ResourceId::new("wibble").unwrap(),
            declarative::AttributeSet::new()
                .with("ensure", "present")
                .with("string", "changed"),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_apply_reports_start_line() {
        let entry = DeviceEntry::new(
            "the_node",
            devicekit::TEST_DEVICE,
            "file:///etc/credentials.txt",
        );
        let mut reporter = CollectingReporter::new();

        let failed = apply_to(
            &entry,
            &Catalog::new(),
            &crate::resource::registry(),
            &ExecuteOptions::default(),
            &mut reporter,
        );

        assert_eq!(failed, 0);
        assert_eq!(
            reporter.lines(),
            vec!["Info: starting applying configuration to the_node at file:///etc/credentials.txt"]
        );
    }

    #[test]
    fn test_apply_counts_failures() {
        let entry = DeviceEntry::new("the_node", devicekit::TEST_DEVICE, "memory://lab");
        let opts = ExecuteOptions {
            strict: declarative::StrictnessLevel::Error,
            ..ExecuteOptions::default()
        };
        let mut reporter = CollectingReporter::new();

        let failed = apply_to(
            &entry,
            &wibble_catalog(),
            &crate::resource::registry(),
            &opts,
            &mut reporter,
        );

        assert_eq!(failed, 1);
        assert_eq!(reporter.events.len(), 2);
        assert!(matches!(reporter.events[1], Event::Failed { .. }));
    }

    #[test]
    fn test_apply_persists_to_json_device() {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join("state.json");
        let entry = DeviceEntry::new(
            "lab",
            JSON_FILE,
            format!("file://{}", store.display()),
        );
        let mut reporter = CollectingReporter::new();

        let failed = apply_to(
            &entry,
            &wibble_catalog(),
            &crate::resource::registry(),
            &ExecuteOptions::default(),
            &mut reporter,
        );

        assert_eq!(failed, 0);
        assert_eq!(
            reporter.lines()[1..],
            [
                "Notice: /Device_provider[wibble]/ensure: defined 'ensure' as 'present'",
                "Notice: /Device_provider[wibble]/string: defined 'string' as 'changed'",
            ]
        );
        let content = fs::read_to_string(&store).unwrap();
        assert!(content.contains("\"wibble\""));
    }

    #[test]
    fn test_unsupported_device_counts_as_failure() {
        let entry = DeviceEntry::new("router", "ssh", "ssh://router");
        let mut reporter = CollectingReporter::new();

        let failed = apply_to(
            &entry,
            &Catalog::new(),
            &crate::resource::registry(),
            &ExecuteOptions::default(),
            &mut reporter,
        );
        assert_eq!(failed, 1);
    }
}
