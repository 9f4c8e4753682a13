//! `rigging resource` - list, inspect, or manage resources of one type

use crate::Context;
use crate::cli::ResourceArgs;
use crate::commands::{self, RunFailed};
use crate::ui::ConsoleReporter;
use anyhow::{Result, bail};
use declarative::{
    AttributeSet, Event, Provider, Reconciler, Reporter, ResourceId, ResourceRequest, Value,
    render_resource,
};
use devicekit::Device;
use regex::Regex;
use std::sync::LazyLock;

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z0-9_]*)=(.*)$").expect("ATTRIBUTE_RE is a valid regex pattern")
});

/// Parse `name=value` arguments into desired attributes
pub fn parse_attributes(args: &[String]) -> Result<AttributeSet> {
    let mut attrs = AttributeSet::new();
    for arg in args {
        let Some(caps) = ATTRIBUTE_RE.captures(arg) else {
            bail!("Expected name=value, got '{arg}'");
        };
        attrs.insert(&caps[1], Value::str(&caps[2]));
    }
    Ok(attrs)
}

pub fn run(ctx: &Context, args: ResourceArgs) -> Result<()> {
    let registry = crate::resource::registry();
    let provider = registry.require(&args.resource_type)?;
    let device = commands::open_device(&ctx.settings, &args.target)?;

    let Some(title) = &args.title else {
        return list(provider, device.as_ref(), args.json);
    };
    let id = ResourceId::new(title.as_str())?;
    let desired = parse_attributes(&args.attributes)?;
    let reconciler = Reconciler::new(commands::strictness(&args.run, &ctx.settings))
        .noop(args.run.noop || ctx.settings.noop);
    let mut reporter = ConsoleReporter::new(ctx.quiet);

    if desired.is_empty() {
        show(&reconciler, provider, device.as_ref(), &id, &mut reporter)
    } else {
        let request = ResourceRequest::new(provider.type_name(), id, desired);
        let device = device.as_ref();
        let outcome = reconciler.reconcile(provider, device, device, &request, &mut reporter);
        if outcome.is_success() {
            Ok(())
        } else {
            Err(RunFailed(1).into())
        }
    }
}

/// Every resource of the type, as the device reports it
fn list(provider: &dyn Provider, device: &dyn Device, json: bool) -> Result<()> {
    let schema = provider.schema();
    let mut resources = provider
        .list(device)?
        .iter()
        .map(|attrs| schema.coerce(attrs))
        .collect::<declarative::Result<Vec<_>>>()?;
    resources.sort_by_key(|attrs| attrs.get(schema.namevar()).map(Value::to_string));

    if json {
        println!("{}", serde_json::to_string_pretty(&resources)?);
    } else {
        for attrs in &resources {
            println!("{}", render_resource(schema, attrs));
        }
    }
    Ok(())
}

/// One resource, checked against its canonical form
fn show(
    reconciler: &Reconciler,
    provider: &dyn Provider,
    device: &dyn Device,
    id: &ResourceId,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    match reconciler.inspect(provider, device, id, reporter) {
        Ok(inspection) => {
            println!("{}", render_resource(provider.schema(), &inspection.observed));
            Ok(())
        }
        Err(e) => {
            reporter.report(&Event::Failed {
                resource_type: provider.type_name().to_string(),
                resource_id: id.to_string(),
                message: e.to_string(),
            });
            Err(RunFailed(1).into())
        }
    }
}
